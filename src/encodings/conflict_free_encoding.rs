use super::{Polarity, PropositionalMapping, SatEncoding, TseitinTransformer};
use crate::{
    adf::AbstractDialecticalFramework,
    sat::{clause, SatSolver},
    utils::LabelType,
};

/// The encoding of conflict-free interpretations.
///
/// For each argument `s`, the following constraints are added:
/// * `t_s` and `f_s` are not set together;
/// * if `t_s` is set, the acceptance condition of `s` is true on the link atoms, which are all set to true for the children of `s`;
/// * if `f_s` is set, the acceptance condition of `s` is false on the link atoms, which are all set to false for the children of `s`.
///
/// The link atoms of undecided parents are free, so a satisfied (resp. unsatisfied) argument only requires its condition to be satisfiable (resp. falsifiable).
pub struct ConflictFreeEncoding<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
}

impl<'a, T> ConflictFreeEncoding<'a, T>
where
    T: LabelType,
{
    /// Builds a new encoding for the given ADF.
    pub fn new(adf: &'a AbstractDialecticalFramework<T>, mapping: &'a PropositionalMapping) -> Self {
        Self { adf, mapping }
    }
}

impl<T> SatEncoding for ConflictFreeEncoding<'_, T>
where
    T: LabelType,
{
    fn encode(&self, solver: &mut dyn SatSolver) {
        for s in 0..self.adf.n_arguments() {
            let t_s = self.mapping.true_atom(s);
            let f_s = self.mapping.false_atom(s);
            solver.add_clause(clause![t_s.negative(), f_s.negative()]);
            let leaf = |r: usize| self.mapping.link(r, s).positive();
            let acc_name =
                TseitinTransformer::new(Polarity::Both, &leaf).transform(self.adf.condition(s), solver);
            solver.add_clause(clause![t_s.negative(), acc_name]);
            solver.add_clause(clause![f_s.negative(), acc_name.negate()]);
            for c in self.adf.children(s) {
                let link = self.mapping.link(s, *c);
                solver.add_clause(clause![t_s.negative(), link.positive()]);
                solver.add_clause(clause![f_s.negative(), link.negative()]);
            }
        }
    }
}

/// The encoding of two-valued models.
///
/// This is the conflict-free encoding, with the additional constraint that each argument is decided.
pub struct TwoValuedEncoding<'a, T>
where
    T: LabelType,
{
    conflict_free: ConflictFreeEncoding<'a, T>,
    mapping: &'a PropositionalMapping,
}

impl<'a, T> TwoValuedEncoding<'a, T>
where
    T: LabelType,
{
    /// Builds a new encoding for the given ADF.
    pub fn new(adf: &'a AbstractDialecticalFramework<T>, mapping: &'a PropositionalMapping) -> Self {
        Self {
            conflict_free: ConflictFreeEncoding::new(adf, mapping),
            mapping,
        }
    }
}

impl<T> SatEncoding for TwoValuedEncoding<'_, T>
where
    T: LabelType,
{
    fn encode(&self, solver: &mut dyn SatSolver) {
        self.conflict_free.encode(solver);
        for s in 0..self.mapping.n_arguments() {
            solver.add_clause(clause![
                self.mapping.true_atom(s),
                self.mapping.false_atom(s)
            ]);
        }
    }
}
