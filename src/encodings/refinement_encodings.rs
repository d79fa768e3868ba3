use super::{PropositionalMapping, RelativeSatEncoding};
use crate::{
    sat::{clause, Literal, SatSolver},
    semantics::{Interpretation, Status},
};

/// Excludes exactly the given interpretation.
///
/// The clause requires a satisfied argument to be no more satisfied,
/// or an unsatisfied argument to be no more unsatisfied,
/// or an undecided argument to become decided.
pub struct RefineUnequalEncoding<'a> {
    mapping: &'a PropositionalMapping,
}

impl<'a> RefineUnequalEncoding<'a> {
    /// Builds a new encoding.
    pub fn new(mapping: &'a PropositionalMapping) -> Self {
        Self { mapping }
    }
}

impl RelativeSatEncoding for RefineUnequalEncoding<'_> {
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation) {
        let mut cl = Vec::with_capacity(interpretation.n_arguments() * 2);
        for (arg, status) in interpretation.iter() {
            let t = self.mapping.true_atom(arg);
            let f = self.mapping.false_atom(arg);
            match status {
                Status::Satisfied => cl.push(t.negative()),
                Status::Unsatisfied => cl.push(f.negative()),
                Status::Undecided => {
                    cl.push(t.positive());
                    cl.push(f.positive());
                }
            }
        }
        solver.add_clause(cl);
    }
}

/// Excludes the given interpretation and all the interpretations it is more informative than.
///
/// The clause requires a satisfied argument to become unsatisfied,
/// or an unsatisfied argument to become satisfied,
/// or an undecided argument to become decided.
pub struct RefineLargerEncoding<'a> {
    mapping: &'a PropositionalMapping,
}

impl<'a> RefineLargerEncoding<'a> {
    /// Builds a new encoding.
    pub fn new(mapping: &'a PropositionalMapping) -> Self {
        Self { mapping }
    }
}

impl RelativeSatEncoding for RefineLargerEncoding<'_> {
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation) {
        let mut cl = Vec::with_capacity(interpretation.n_arguments() * 2);
        for (arg, status) in interpretation.iter() {
            let t = self.mapping.true_atom(arg);
            let f = self.mapping.false_atom(arg);
            match status {
                Status::Satisfied => cl.push(f.positive()),
                Status::Unsatisfied => cl.push(t.positive()),
                Status::Undecided => {
                    cl.push(t.positive());
                    cl.push(f.positive());
                }
            }
        }
        solver.add_clause(cl);
    }
}

/// Restricts the solutions to the interpretations strictly more informative than the given one.
///
/// The decisions of the interpretation are fixed, and at least one of its undecided arguments must be decided.
/// If the interpretation is two-valued, the solver becomes unsatisfiable.
pub struct LargerInterpretationEncoding<'a> {
    mapping: &'a PropositionalMapping,
}

impl<'a> LargerInterpretationEncoding<'a> {
    /// Builds a new encoding.
    pub fn new(mapping: &'a PropositionalMapping) -> Self {
        Self { mapping }
    }
}

impl RelativeSatEncoding for LargerInterpretationEncoding<'_> {
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation) {
        let mut undecided_cl = vec![];
        for (arg, status) in interpretation.iter() {
            let t = self.mapping.true_atom(arg);
            let f = self.mapping.false_atom(arg);
            match status {
                Status::Satisfied => solver.add_clause(clause![t]),
                Status::Unsatisfied => solver.add_clause(clause![f]),
                Status::Undecided => {
                    solver.add_clause(clause![t.negative(), f.negative()]);
                    undecided_cl.push(t.positive());
                    undecided_cl.push(f.positive());
                }
            }
        }
        solver.add_clause(undecided_cl);
    }
}

/// Fixes the decisions of the given interpretation.
///
/// Its undecided arguments are left unconstrained.
pub struct FixPartialEncoding<'a> {
    mapping: &'a PropositionalMapping,
}

impl<'a> FixPartialEncoding<'a> {
    /// Builds a new encoding.
    pub fn new(mapping: &'a PropositionalMapping) -> Self {
        Self { mapping }
    }

    /// Returns the literals fixing the decisions of the given interpretation.
    ///
    /// They may be used as assumptions instead of unit clauses.
    pub fn literals(&self, interpretation: &Interpretation) -> Vec<Literal> {
        interpretation
            .iter()
            .filter_map(|(arg, status)| match status {
                Status::Satisfied => Some(self.mapping.true_atom(arg).positive()),
                Status::Unsatisfied => Some(self.mapping.false_atom(arg).positive()),
                Status::Undecided => None,
            })
            .collect()
    }
}

impl RelativeSatEncoding for FixPartialEncoding<'_> {
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation) {
        self.literals(interpretation)
            .into_iter()
            .for_each(|l| solver.add_clause(clause![l]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        encodings::{ConflictFreeEncoding, SatEncoding},
        sat::{default_solver, SatSolverState},
    };
    use std::collections::HashSet;

    fn three_free_args() -> (PropositionalMapping, SatSolverState) {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b", "c"]);
        for l in ["a", "b", "c"] {
            builder.set_condition(&l, AC::Tautology).unwrap();
        }
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut state = SatSolverState::new(default_solver());
        state.reserve(mapping.n_vars());
        for arg in 0..3 {
            state.add(clause![
                mapping.true_atom(arg).negative(),
                mapping.false_atom(arg).negative()
            ]);
        }
        (mapping, state)
    }

    fn enumerate(mapping: &PropositionalMapping, state: &mut SatSolverState) -> HashSet<Interpretation> {
        let atoms = mapping.argument_atoms();
        let mut result = HashSet::new();
        while let Some(w) = state.witness(&atoms) {
            let i = Interpretation::from_witness(&w, mapping);
            RefineUnequalEncoding::new(mapping).encode(state, &i);
            assert!(result.insert(i));
        }
        result
    }

    #[test]
    fn test_refine_unequal_enumerates_all() {
        let (mapping, mut state) = three_free_args();
        assert_eq!(27, enumerate(&mapping, &mut state).len());
    }

    #[test]
    fn test_refine_larger() {
        let (mapping, mut state) = three_free_args();
        let i = Interpretation::builder(3).satisfied(0).unsatisfied(1).build();
        RefineLargerEncoding::new(&mapping).encode(&mut state, &i);
        let remaining = enumerate(&mapping, &mut state);
        assert_eq!(27 - 4, remaining.len());
        assert!(remaining.iter().all(|j| !i.extends(j)));
    }

    #[test]
    fn test_larger_interpretation() {
        let (mapping, mut state) = three_free_args();
        let i = Interpretation::builder(3).satisfied(0).build();
        LargerInterpretationEncoding::new(&mapping).encode(&mut state, &i);
        let remaining = enumerate(&mapping, &mut state);
        assert_eq!(8, remaining.len());
        assert!(remaining.iter().all(|j| j.extends(&i) && j != &i));
    }

    #[test]
    fn test_larger_than_two_valued() {
        let (mapping, mut state) = three_free_args();
        let i = Interpretation::builder(3)
            .satisfied(0)
            .satisfied(1)
            .unsatisfied(2)
            .build();
        LargerInterpretationEncoding::new(&mapping).encode(&mut state, &i);
        assert!(!state.satisfiable());
    }

    #[test]
    fn test_fix_partial() {
        let (mapping, mut state) = three_free_args();
        let i = Interpretation::builder(3).unsatisfied(2).build();
        FixPartialEncoding::new(&mapping).encode(&mut state, &i);
        let remaining = enumerate(&mapping, &mut state);
        assert_eq!(9, remaining.len());
        assert!(remaining.iter().all(|j| j.extends(&i)));
    }

    #[test]
    fn test_with_conflict_freeness() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder
            .set_condition(&"a", AC::neg(builder.arg(&"b").unwrap()))
            .unwrap();
        builder.set_condition(&"b", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut state = mapping.new_state(&crate::sat::DefaultSatSolverFactory);
        ConflictFreeEncoding::new(&adf, &mapping).encode(&mut state);
        let i = Interpretation::builder(2).satisfied(1).build();
        LargerInterpretationEncoding::new(&mapping).encode(&mut state, &i);
        let remaining = enumerate(&mapping, &mut state);
        let expected = Interpretation::builder(2).unsatisfied(0).satisfied(1).build();
        assert_eq!(vec![expected], remaining.into_iter().collect::<Vec<_>>());
    }
}
