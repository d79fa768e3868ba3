use super::Verifier;
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{
        ConflictFreeEncoding, FixPartialEncoding, PropositionalMapping, RefineLargerEncoding,
        RelativeSatEncoding, SatEncoding,
    },
    sat::{clause, Literal, SatSolverFactory, SatSolverState},
    semantics::Interpretation,
    utils::LabelType,
};

/// A verifier checking that conflict-free interpretations are naive, that is maximal conflict-free interpretations.
///
/// A single state encoding conflict-freeness is used for all the verifications.
/// For each candidate, a clause guarded by a fresh toggle atom requires one of its undecided arguments to be decided;
/// the candidate is naive iff this clause cannot be satisfied while the candidate decisions are assumed.
/// The toggle is then disabled for good.
pub struct NaiveVerifier<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    state: Option<SatSolverState>,
    last_failed: bool,
    closed: bool,
}

impl<'a, T> NaiveVerifier<'a, T>
where
    T: LabelType,
{
    /// Builds a new verifier for the naive semantics.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            state: None,
            last_failed: false,
            closed: false,
        }
    }

    fn state(&mut self) -> &mut SatSolverState {
        if self.closed {
            panic!("cannot use a closed verifier");
        }
        let (adf, mapping, factory) = (self.adf, self.mapping, self.factory);
        self.state.get_or_insert_with(|| {
            let mut state = mapping.new_state(factory);
            ConflictFreeEncoding::new(adf, mapping).encode(&mut state);
            state
        })
    }
}

impl<T> Verifier for NaiveVerifier<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.state();
    }

    fn verify(&mut self, candidate: &Interpretation) -> bool {
        let mapping = self.mapping;
        let state = self.state();
        let toggle = state.new_var();
        let mut larger_cl = vec![toggle.negative()];
        for arg in candidate.undecided() {
            larger_cl.push(mapping.true_atom(arg).positive());
            larger_cl.push(mapping.false_atom(arg).positive());
        }
        state.add(larger_cl);
        let mut assumptions: Vec<Literal> = FixPartialEncoding::new(mapping).literals(candidate);
        assumptions.push(toggle.positive());
        state.assume(&assumptions);
        let naive = !state.satisfiable();
        state.add(clause![toggle.negative()]);
        self.last_failed = !naive;
        naive
    }

    fn prune(&mut self, candidate: &Interpretation, generator_state: &mut SatSolverState) {
        if self.last_failed {
            RefineLargerEncoding::new(self.mapping).encode(generator_state, candidate);
            self.last_failed = false;
        }
    }

    fn close(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.close();
        }
        self.closed = true;
    }
}

impl<T> Drop for NaiveVerifier<'_, T>
where
    T: LabelType,
{
    fn drop(&mut self) {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        sat::DefaultSatSolverFactory,
    };

    #[test]
    fn test_naive_verifier() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder
            .set_condition(&"a", AC::neg(builder.arg(&"a").unwrap()))
            .unwrap();
        builder.set_condition(&"b", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = NaiveVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.prepare();
        assert!(!verifier.verify(&Interpretation::empty(2)));
        assert!(verifier.verify(&Interpretation::builder(2).satisfied(1).build()));
        assert!(!verifier.verify(&Interpretation::empty(2)));
        verifier.close();
    }

    #[test]
    #[should_panic(expected = "cannot use a closed verifier")]
    fn test_verify_after_close() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = NaiveVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.prepare();
        verifier.close();
        verifier.verify(&Interpretation::builder(1).satisfied(0).build());
    } // kcov-ignore
}
