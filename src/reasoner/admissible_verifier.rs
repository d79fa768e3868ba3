use super::Verifier;
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{PropositionalMapping, RelativeSatEncoding, VerifyAdmissibleEncoding},
    sat::SatSolverFactory,
    semantics::Interpretation,
    utils::LabelType,
};

/// A verifier checking the admissibility of interpretations.
///
/// An interpretation is admissible if the condition of each satisfied argument is true,
/// and the condition of each unsatisfied argument is false, whatever the values of the undecided arguments.
/// A fresh solver state is used for each verification, searching for a counterexample.
pub struct AdmissibleVerifier<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    closed: bool,
}

impl<'a, T> AdmissibleVerifier<'a, T>
where
    T: LabelType,
{
    /// Builds a new admissibility verifier.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            closed: false,
        }
    }
}

impl<T> Verifier for AdmissibleVerifier<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        if self.closed {
            panic!("cannot use a closed verifier");
        }
    }

    fn verify(&mut self, candidate: &Interpretation) -> bool {
        self.prepare();
        let mut state = self.mapping.new_state(self.factory);
        VerifyAdmissibleEncoding::new(self.adf, self.mapping).encode(&mut state, candidate);
        let admissible = !state.satisfiable();
        state.close();
        admissible
    }

    fn close(&mut self) {
        self.closed = true;
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
    fn test_admissible_verifier() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        let a = builder.arg(&"a").unwrap();
        let b = builder.arg(&"b").unwrap();
        builder.set_condition(&"a", AC::neg(b)).unwrap();
        builder.set_condition(&"b", AC::neg(a)).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = AdmissibleVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.prepare();
        assert!(verifier.verify(&Interpretation::empty(2)));
        assert!(verifier.verify(&Interpretation::builder(2).satisfied(0).unsatisfied(1).build()));
        assert!(!verifier.verify(&Interpretation::builder(2).satisfied(0).build()));
        assert!(!verifier.verify(&Interpretation::builder(2).unsatisfied(0).build()));
        verifier.close();
    }

    #[test]
    #[should_panic(expected = "cannot use a closed verifier")]
    fn test_verify_after_close() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut verifier = AdmissibleVerifier::new(&adf, &mapping, &DefaultSatSolverFactory);
        verifier.close();
        verifier.verify(&Interpretation::builder(1).satisfied(0).build());
    } // kcov-ignore
}
