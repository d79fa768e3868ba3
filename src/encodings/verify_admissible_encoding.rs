use super::{Polarity, PropositionalMapping, RelativeSatEncoding, TseitinTransformer};
use crate::{
    adf::AbstractDialecticalFramework,
    sat::{clause, SatSolver},
    semantics::{Interpretation, Status},
    utils::LabelType,
};

/// The encoding searching for a counterexample to the admissibility of an interpretation.
///
/// The link atoms coming from decided arguments are fixed according to the interpretation, while the others remain free.
/// A single clause then requires the condition of some satisfied argument to be false, or the condition of some unsatisfied argument to be true.
/// The interpretation is admissible iff the resulting problem is unsatisfiable.
pub struct VerifyAdmissibleEncoding<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
}

impl<'a, T> VerifyAdmissibleEncoding<'a, T>
where
    T: LabelType,
{
    /// Builds a new encoding for the given ADF.
    pub fn new(adf: &'a AbstractDialecticalFramework<T>, mapping: &'a PropositionalMapping) -> Self {
        Self { adf, mapping }
    }
}

impl<T> RelativeSatEncoding for VerifyAdmissibleEncoding<'_, T>
where
    T: LabelType,
{
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation) {
        let mut counterexample_cl = vec![];
        for (s, status) in interpretation.iter() {
            if status == Status::Undecided {
                continue;
            }
            for r in self.adf.parents(s) {
                match interpretation.status(*r) {
                    Status::Satisfied => solver.add_clause(clause![self.mapping.link(*r, s)]),
                    Status::Unsatisfied => {
                        solver.add_clause(clause![self.mapping.link(*r, s).negative()])
                    }
                    Status::Undecided => {}
                }
            }
            let leaf = |r: usize| self.mapping.link(r, s).positive();
            if status == Status::Satisfied {
                let name = TseitinTransformer::new(Polarity::Negative, &leaf)
                    .transform(self.adf.condition(s), solver);
                counterexample_cl.push(name.negate());
            } else {
                let name = TseitinTransformer::new(Polarity::Positive, &leaf)
                    .transform(self.adf.condition(s), solver);
                counterexample_cl.push(name);
            }
        }
        solver.add_clause(counterexample_cl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        sat::DefaultSatSolverFactory,
    };

    fn is_admissible(
        adf: &AbstractDialecticalFramework<&str>,
        interpretation: &Interpretation,
    ) -> bool {
        let mapping = PropositionalMapping::new(adf);
        let mut state = mapping.new_state(&DefaultSatSolverFactory);
        VerifyAdmissibleEncoding::new(adf, &mapping).encode(&mut state, interpretation);
        !state.satisfiable()
    }

    #[test]
    fn test_verify_admissible() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b", "c"]);
        let a = builder.arg(&"a").unwrap();
        let b = builder.arg(&"b").unwrap();
        builder.set_condition(&"a", AC::neg(b.clone())).unwrap();
        builder.set_condition(&"b", AC::neg(a.clone())).unwrap();
        builder
            .set_condition(&"c", AC::or(a, b).unwrap())
            .unwrap();
        let adf = builder.build().unwrap();
        assert!(is_admissible(&adf, &Interpretation::empty(3)));
        assert!(is_admissible(
            &adf,
            &Interpretation::builder(3).satisfied(0).unsatisfied(1).build()
        ));
        assert!(!is_admissible(
            &adf,
            &Interpretation::builder(3).satisfied(0).build()
        ));
        assert!(is_admissible(
            &adf,
            &Interpretation::builder(3)
                .satisfied(0)
                .unsatisfied(1)
                .satisfied(2)
                .build()
        ));
        assert!(!is_admissible(
            &adf,
            &Interpretation::builder(3).satisfied(2).build()
        ));
    }
}
