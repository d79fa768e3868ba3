use crate::{
    sat::SatSolverState,
    semantics::Interpretation,
    utils::{Label, LabelType},
};

/// A trait for objects producing candidate interpretations.
///
/// A generator owns a SAT solver state which is created on first use and seeded with the generator's base encoding.
/// Each interpretation it returns satisfies this base encoding, and no interpretation is returned twice.
/// Once [generate](Self::generate) has returned [Option::None], all subsequent calls return [Option::None] too.
///
/// The state is released by [close](Self::close), or when the generator is dropped.
pub trait CandidateGenerator {
    /// Initializes the underlying state if it is not already done.
    ///
    /// # Panics
    ///
    /// Panics if the generator was closed.
    fn prepare(&mut self);

    /// Computes the next candidate, if any.
    ///
    /// # Panics
    ///
    /// Panics if the generator was closed.
    fn generate(&mut self) -> Option<Interpretation>;

    /// Gives access to the underlying state, initializing it if needed.
    ///
    /// This is used to strengthen the base encoding, for instance after a failed verification.
    fn update(&mut self, update_fn: &mut dyn FnMut(&mut SatSolverState));

    /// Releases the underlying state.
    ///
    /// Closing a generator which state was never initialized, or closing it twice, has no effect.
    fn close(&mut self);
}

/// A trait for objects checking whether candidates satisfy a semantics.
///
/// Verifiers use their own SAT solver states, which are never shared with the generators.
pub trait Verifier {
    /// Performs the one-time initialization of this verifier.
    fn prepare(&mut self);

    /// Returns `true` iff the candidate satisfies the property checked by this verifier.
    fn verify(&mut self, candidate: &Interpretation) -> bool;

    /// Strengthens the state of a generator after the candidate failed the last verification.
    ///
    /// The default implementation adds nothing.
    fn prune(&mut self, _candidate: &Interpretation, _generator_state: &mut SatSolverState) {}

    /// Releases the states owned by this verifier.
    fn close(&mut self);
}

/// A trait for objects strengthening the state of a generator before the first candidate is generated.
pub trait StateProcessor {
    /// Adds clauses to the state of a generator.
    fn process(&mut self, generator_state: &mut SatSolverState);
}

/// A trait for objects transforming the candidates of a pipeline.
pub trait InterpretationProcessor {
    /// Transforms a candidate.
    fn process(&mut self, candidate: Interpretation) -> Interpretation;

    /// Strengthens the state of the generator given the result of the last call to [process](Self::process).
    ///
    /// The default implementation adds nothing.
    fn update_state(&mut self, _generator_state: &mut SatSolverState, _processed: &Interpretation) {
    }

    /// Releases the states owned by this processor.
    ///
    /// The default implementation does nothing.
    fn close(&mut self) {}
}

/// A trait for reasoners able to compute a model of an ADF.
pub trait SingleModelComputer<T>
where
    T: LabelType,
{
    /// Computes a single model.
    ///
    /// In case the problem admits no model, [Option::None] is returned.
    fn compute_one_model(&mut self) -> Option<Interpretation>;
}

/// A trait for reasoners able to compute all the models of an ADF.
pub trait ModelsComputer<T>
where
    T: LabelType,
{
    /// Computes all the models, in no particular order.
    fn compute_all_models(&mut self) -> Vec<Interpretation>;
}

/// A trait for reasoners able to check the credulous acceptance of an argument.
pub trait CredulousAcceptanceComputer<T>
where
    T: LabelType,
{
    /// Checks the credulous acceptance of an argument, that is whether it is satisfied in at least one model.
    fn is_credulously_accepted(&mut self, arg: &Label<T>) -> bool;

    /// Checks the credulous acceptance of an argument, and provide a certificate if it is the case.
    ///
    /// The certificate is set to `None` if the result of the test is `false`.
    /// Otherwise, the certificate is a model in which the argument is satisfied.
    fn is_credulously_accepted_with_certificate(
        &mut self,
        arg: &Label<T>,
    ) -> (bool, Option<Interpretation>);
}

/// A trait for reasoners able to check the skeptical acceptance of an argument.
pub trait SkepticalAcceptanceComputer<T>
where
    T: LabelType,
{
    /// Checks the skeptical acceptance of an argument, that is whether it is satisfied in all the models.
    ///
    /// In case there is no model, the argument is skeptically accepted.
    fn is_skeptically_accepted(&mut self, arg: &Label<T>) -> bool;

    /// Checks the skeptical acceptance of an argument, and provide a certificate if it is not the case.
    ///
    /// The certificate is set to `None` if the result of the test is `true`.
    /// Otherwise, the certificate is a model in which the argument is not satisfied.
    fn is_skeptically_accepted_with_certificate(
        &mut self,
        arg: &Label<T>,
    ) -> (bool, Option<Interpretation>);
}
