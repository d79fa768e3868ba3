use super::{AdmissibleVerifier, InterpretationProcessor, StateProcessor, Verifier};
use crate::{
    adf::{compute_link_types, AbstractDialecticalFramework, Link, LinkType},
    encodings::{
        ConflictFreeEncoding, KBipolarEncoding, LargerInterpretationEncoding, PropositionalMapping,
        RefineLargerEncoding, RefineUnequalEncoding, RelativeSatEncoding, SatEncoding,
    },
    sat::{SatSolverFactory, SatSolverState},
    semantics::Interpretation,
    utils::LabelType,
};
use std::collections::HashMap;

// Computes the link types on first call only.
fn link_types_of<'b, T>(
    cache: &'b mut Option<HashMap<Link, LinkType>>,
    adf: &AbstractDialecticalFramework<T>,
    factory: &dyn SatSolverFactory,
) -> &'b HashMap<Link, LinkType>
where
    T: LabelType,
{
    cache.get_or_insert_with(|| {
        let link_types = compute_link_types(adf, factory);
        log::debug!(
            "computed the types of {} links ({} bipolar)",
            link_types.len(),
            link_types.values().filter(|t| t.is_bipolar()).count()
        );
        link_types
    })
}

/// A state processor adding the [`KBipolarEncoding`] to the state of a generator.
///
/// The link types are computed on the first call; they require a few SAT calls per link.
pub struct KBipolarStateProcessor<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    k: usize,
    link_types: Option<HashMap<Link, LinkType>>,
}

impl<'a, T> KBipolarStateProcessor<'a, T>
where
    T: LabelType,
{
    /// Builds a new processor, given the bound on the number of dependent parents to enumerate.
    ///
    /// [`DEFAULT_K`](crate::encodings::DEFAULT_K) is a sensible value for this bound.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        k: usize,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            k,
            link_types: None,
        }
    }
}

impl<T> StateProcessor for KBipolarStateProcessor<'_, T>
where
    T: LabelType,
{
    fn process(&mut self, generator_state: &mut SatSolverState) {
        let link_types = link_types_of(&mut self.link_types, self.adf, self.factory);
        KBipolarEncoding::new(self.adf, self.mapping, link_types, self.k).encode(generator_state);
    }
}

/// An interpretation processor turning admissible interpretations into preferred ones.
///
/// The processed interpretation is extended as long as a strictly larger admissible interpretation exists.
/// The admissibility of the larger interpretations is checked by an [`AdmissibleVerifier`].
/// Once a preferred interpretation is found, all the interpretations it is more informative than are excluded from the generator.
pub struct AdmissibleMaximizer<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    k: usize,
    link_types: Option<HashMap<Link, LinkType>>,
    verifier: AdmissibleVerifier<'a, T>,
}

impl<'a, T> AdmissibleMaximizer<'a, T>
where
    T: LabelType,
{
    /// Builds a new maximizer, given the bound used by the underlying [`KBipolarEncoding`].
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        k: usize,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            k,
            link_types: None,
            verifier: AdmissibleVerifier::new(adf, mapping, factory),
        }
    }
}

impl<T> InterpretationProcessor for AdmissibleMaximizer<'_, T>
where
    T: LabelType,
{
    fn process(&mut self, candidate: Interpretation) -> Interpretation {
        let mut state = self.mapping.new_state(self.factory);
        ConflictFreeEncoding::new(self.adf, self.mapping).encode(&mut state);
        let link_types = link_types_of(&mut self.link_types, self.adf, self.factory);
        KBipolarEncoding::new(self.adf, self.mapping, link_types, self.k).encode(&mut state);
        LargerInterpretationEncoding::new(self.mapping).encode(&mut state, &candidate);
        let atoms = self.mapping.argument_atoms();
        let mut maximal = candidate;
        let mut n_steps = 0;
        while let Some(witness) = state.witness(&atoms) {
            let larger = Interpretation::from_witness(&witness, self.mapping);
            if self.verifier.verify(&larger) {
                LargerInterpretationEncoding::new(self.mapping).encode(&mut state, &larger);
                maximal = larger;
                n_steps += 1;
            } else {
                RefineUnequalEncoding::new(self.mapping).encode(&mut state, &larger);
            }
        }
        state.close();
        log::debug!(
            "maximized an admissible interpretation in {} steps ({} decided arguments)",
            n_steps,
            maximal.n_decided()
        );
        maximal
    }

    fn update_state(&mut self, generator_state: &mut SatSolverState, processed: &Interpretation) {
        RefineLargerEncoding::new(self.mapping).encode(generator_state, processed);
    }

    fn close(&mut self) {
        self.verifier.close()
    }
}
