use super::{AdmissibleVerifier, Verifier};
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{
        ConflictFreeEncoding, LargerInterpretationEncoding, PropositionalMapping,
        RefineLargerEncoding, RefineUnequalEncoding, RelativeSatEncoding, SatEncoding,
    },
    sat::{SatSolverFactory, SatSolverState},
    semantics::Interpretation,
    utils::LabelType,
};

/// A verifier checking that interpretations are preferred, that is maximal admissible interpretations.
///
/// The candidate is first checked for admissibility.
/// Then, the interpretations strictly larger than the candidate are enumerated until an admissible one is found.
/// The candidate is preferred iff there is no such interpretation.
///
/// When a candidate is admissible but not maximal, all the interpretations it is more informative than cannot be preferred;
/// they are excluded from the generator by [prune](Verifier::prune).
pub struct PreferredVerifier<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    admissible_verifier: AdmissibleVerifier<'a, T>,
    last_larger: Option<Interpretation>,
}

impl<'a, T> PreferredVerifier<'a, T>
where
    T: LabelType,
{
    /// Builds a new verifier for the preferred semantics.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            admissible_verifier: AdmissibleVerifier::new(adf, mapping, factory),
            last_larger: None,
        }
    }

    /// Returns the admissible interpretation found to be larger than the last rejected candidate, if any.
    pub fn last_larger(&self) -> Option<&Interpretation> {
        self.last_larger.as_ref()
    }

    fn find_larger_admissible(&mut self, candidate: &Interpretation) -> Option<Interpretation> {
        let mut state = self.mapping.new_state(self.factory);
        ConflictFreeEncoding::new(self.adf, self.mapping).encode(&mut state);
        LargerInterpretationEncoding::new(self.mapping).encode(&mut state, candidate);
        let atoms = self.mapping.argument_atoms();
        let mut result = None;
        while let Some(witness) = state.witness(&atoms) {
            let larger = Interpretation::from_witness(&witness, self.mapping);
            if self.admissible_verifier.verify(&larger) {
                result = Some(larger);
                break;
            }
            RefineUnequalEncoding::new(self.mapping).encode(&mut state, &larger);
        }
        state.close();
        result
    }
}

impl<T> Verifier for PreferredVerifier<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.admissible_verifier.prepare()
    }

    fn verify(&mut self, candidate: &Interpretation) -> bool {
        self.last_larger = None;
        if !self.admissible_verifier.verify(candidate) {
            return false;
        }
        self.last_larger = self.find_larger_admissible(candidate);
        self.last_larger.is_none()
    }

    fn prune(&mut self, candidate: &Interpretation, generator_state: &mut SatSolverState) {
        if self.last_larger.take().is_some() {
            RefineLargerEncoding::new(self.mapping).encode(generator_state, candidate);
        }
    }

    fn close(&mut self) {
        self.admissible_verifier.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        encodings::FixPartialEncoding,
        sat::DefaultSatSolverFactory,
    };

    #[test]
    fn test_preferred_maximality() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder.set_condition(&"b", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = PreferredVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.prepare();
        assert!(!verifier.verify(&Interpretation::empty(2)));
        assert!(verifier.last_larger().is_some());
        assert!(verifier.verify(&Interpretation::builder(2).satisfied(0).satisfied(1).build()));
        assert!(verifier.last_larger().is_none());
        verifier.close();
    }

    #[test]
    fn test_not_admissible() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = PreferredVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        assert!(!verifier.verify(&Interpretation::builder(1).unsatisfied(0).build()));
        assert!(verifier.last_larger().is_none());
    }

    #[test]
    fn test_prune() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder.set_condition(&"b", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = PreferredVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        let candidate = Interpretation::builder(2).satisfied(0).build();
        assert!(!verifier.verify(&candidate));
        let mut state = mapping.new_state(&DefaultSatSolverFactory);
        verifier.prune(&candidate, &mut state);
        let fix = FixPartialEncoding::new(&mapping);
        state.assume(&fix.literals(&candidate));
        for arg in 0..2 {
            state.assume(&[mapping.false_atom(arg).negative()]);
        }
        state.assume(&[mapping.true_atom(1).negative()]);
        assert!(!state.satisfiable());
        assert!(verifier.last_larger().is_none());
    }

    #[test]
    #[should_panic(expected = "cannot use a closed verifier")]
    fn test_verify_after_close() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = PreferredVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.prepare();
        verifier.close();
        verifier.verify(&Interpretation::builder(1).satisfied(0).build());
    } // kcov-ignore
}
