use super::{CandidateGenerator, GroundGenerator, Verifier};
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::PropositionalMapping,
    sat::SatSolverFactory,
    semantics::Interpretation,
    utils::LabelType,
};

/// A verifier checking that two-valued models are stable.
///
/// The reduct of the ADF is built by removing the arguments the model rejects.
/// The model is stable iff the ground interpretation of this reduct is the model itself.
/// The ground interpretation is computed by a [`GroundGenerator`] restricted to the model,
/// so that the computation stops as soon as a decision differs from the model.
pub struct StableVerifier<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    closed: bool,
}

impl<'a, T> StableVerifier<'a, T>
where
    T: LabelType,
{
    /// Builds a new verifier for the stable semantics.
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

impl<T> Verifier for StableVerifier<'_, T>
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
        if !candidate.is_two_valued() {
            return false;
        }
        let reduct = self.adf.reduct(&candidate.only_unsatisfied());
        let mut ground =
            GroundGenerator::restricted(&reduct, self.mapping, self.factory, candidate.clone());
        let result = ground.generate();
        ground.close();
        result.as_ref() == Some(candidate)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
