use super::{
    AdmissibleMaximizer, AdmissibleVerifier, CandidateGenerator, CompleteVerifier,
    ConflictFreeGenerator, CredulousAcceptanceComputer, GroundGenerator, KBipolarStateProcessor,
    ModelGenerator, ModelsComputer, NaiveVerifier, Pipeline, SingleModelComputer,
    SkepticalAcceptanceComputer, StableVerifier,
};
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{PropositionalMapping, DEFAULT_K},
    sat::SatSolverFactory,
    semantics::Interpretation,
    utils::{Label, LabelType},
};
use anyhow::{anyhow, Result};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The semantics handled by [`SemanticsReasoner`].
///
/// The string representations of the semantics are their usual short names.
///
/// # Example
///
/// ```
/// # use crustadf::reasoner::Semantics;
/// assert_eq!(Semantics::Preferred, Semantics::try_from("prf").unwrap());
/// assert_eq!("stb", Semantics::Stable.to_string());
/// assert!(Semantics::try_from("foo").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Semantics {
    /// The conflict-free semantics
    #[strum(serialize = "cf")]
    ConflictFree,
    /// The naive semantics (maximal conflict-free interpretations)
    #[strum(serialize = "nai")]
    Naive,
    /// The admissible semantics
    #[strum(serialize = "adm")]
    Admissible,
    /// The complete semantics
    #[strum(serialize = "com")]
    Complete,
    /// The preferred semantics (maximal admissible interpretations)
    #[strum(serialize = "prf")]
    Preferred,
    /// The stable semantics
    #[strum(serialize = "stb")]
    Stable,
    /// The two-valued models
    #[strum(serialize = "mod")]
    Model,
    /// The ground semantics
    #[strum(serialize = "grd")]
    Ground,
}

impl TryFrom<&str> for Semantics {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lowercase = value.to_ascii_lowercase();
        Semantics::iter()
            .find(|s| s.to_string() == lowercase)
            .ok_or_else(|| anyhow!(r#"undefined semantics "{}""#, value))
    }
}

/// A reasoner computing the models of an ADF under a given semantics.
///
/// Each query builds a new [`Pipeline`], made of the generator, the processors and the verifier suited to the semantics.
/// The propositional mapping of the ADF is computed once, when the reasoner is built.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AcceptanceCondition, AdfBuilder};
/// # use crustadf::reasoner::{
/// #     CredulousAcceptanceComputer, ModelsComputer, Semantics, SemanticsReasoner,
/// # };
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
/// let a = builder.arg(&"a")?;
/// let b = builder.arg(&"b")?;
/// builder.set_condition(&"a", AcceptanceCondition::neg(b))?;
/// builder.set_condition(&"b", AcceptanceCondition::neg(a))?;
/// let adf = builder.build()?;
/// let factory = DefaultSatSolverFactory;
/// let mut reasoner = SemanticsReasoner::new(&adf, Semantics::Stable, &factory);
/// assert_eq!(2, reasoner.compute_all_models().len());
/// assert!(reasoner.is_credulously_accepted(adf.labels().get_label(&"a")?));
/// # Ok(())
/// # }
/// ```
pub struct SemanticsReasoner<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    semantics: Semantics,
    k: usize,
}

impl<'a, T> SemanticsReasoner<'a, T>
where
    T: LabelType,
{
    /// Builds a new reasoner for the given semantics.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        semantics: Semantics,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            adf,
            mapping: PropositionalMapping::new(adf),
            factory,
            semantics,
            k: DEFAULT_K,
        }
    }

    /// Sets the bound on the number of dependent parents enumerated by the k-bipolar encoding.
    ///
    /// This bound has no effect on the results; it may only change the efficiency of the reasoner.
    pub fn set_k(&mut self, k: usize) {
        self.k = k;
    }

    /// Returns the semantics handled by this reasoner.
    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Builds a pipeline enumerating the models under the semantics of this reasoner.
    ///
    /// If a prefix is given, only the models extending it are produced.
    pub fn pipeline(&self, prefix: Option<Interpretation>) -> Pipeline<'_> {
        log::info!(
            "building a pipeline for the {} semantics on {} arguments (restricted: {})",
            self.semantics,
            self.adf.n_arguments(),
            prefix.is_some()
        );
        let adf = self.adf;
        let mapping = &self.mapping;
        let factory = self.factory;
        match self.semantics {
            Semantics::ConflictFree => Pipeline::builder(self.conflict_free_generator(prefix)).build(),
            Semantics::Naive => Pipeline::builder(self.conflict_free_generator(prefix))
                .verifier(Box::new(NaiveVerifier::new(adf, mapping, factory)))
                .build(),
            Semantics::Admissible => Pipeline::builder(self.conflict_free_generator(prefix))
                .state_processor(Box::new(KBipolarStateProcessor::new(
                    adf, mapping, factory, self.k,
                )))
                .verifier(Box::new(AdmissibleVerifier::new(adf, mapping, factory)))
                .build(),
            Semantics::Complete => Pipeline::builder(self.conflict_free_generator(prefix))
                .state_processor(Box::new(KBipolarStateProcessor::new(
                    adf, mapping, factory, self.k,
                )))
                .verifier(Box::new(CompleteVerifier::new(adf, mapping, factory)))
                .build(),
            Semantics::Preferred => Pipeline::builder(self.conflict_free_generator(prefix))
                .state_processor(Box::new(KBipolarStateProcessor::new(
                    adf, mapping, factory, self.k,
                )))
                .verifier(Box::new(AdmissibleVerifier::new(adf, mapping, factory)))
                .verified_processor(Box::new(AdmissibleMaximizer::new(
                    adf, mapping, factory, self.k,
                )))
                .build(),
            Semantics::Stable => Pipeline::builder(self.model_generator(prefix))
                .verifier(Box::new(StableVerifier::new(adf, mapping, factory)))
                .build(),
            Semantics::Model => Pipeline::builder(self.model_generator(prefix)).build(),
            Semantics::Ground => {
                let generator: Box<dyn CandidateGenerator + '_> = match prefix {
                    Some(p) => Box::new(GroundGenerator::restricted(adf, mapping, factory, p)),
                    None => Box::new(GroundGenerator::unrestricted(adf, mapping, factory)),
                };
                Pipeline::builder(generator).build()
            }
        }
    }

    fn conflict_free_generator(&self, prefix: Option<Interpretation>) -> Box<dyn CandidateGenerator + '_> {
        match prefix {
            Some(p) => Box::new(ConflictFreeGenerator::restricted(
                self.adf,
                &self.mapping,
                self.factory,
                p,
            )),
            None => Box::new(ConflictFreeGenerator::unrestricted(
                self.adf,
                &self.mapping,
                self.factory,
            )),
        }
    }

    fn model_generator(&self, prefix: Option<Interpretation>) -> Box<dyn CandidateGenerator + '_> {
        match prefix {
            Some(p) => Box::new(ModelGenerator::restricted(
                self.adf,
                &self.mapping,
                self.factory,
                p,
            )),
            None => Box::new(ModelGenerator::unrestricted(self.adf, &self.mapping, self.factory)),
        }
    }
}

impl<T> SingleModelComputer<T> for SemanticsReasoner<'_, T>
where
    T: LabelType,
{
    fn compute_one_model(&mut self) -> Option<Interpretation> {
        let mut pipeline = self.pipeline(None);
        let model = pipeline.next();
        pipeline.close();
        model
    }
}

impl<T> ModelsComputer<T> for SemanticsReasoner<'_, T>
where
    T: LabelType,
{
    fn compute_all_models(&mut self) -> Vec<Interpretation> {
        self.pipeline(None).collect()
    }
}

impl<T> CredulousAcceptanceComputer<T> for SemanticsReasoner<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Label<T>) -> bool {
        self.is_credulously_accepted_with_certificate(arg).0
    }

    fn is_credulously_accepted_with_certificate(
        &mut self,
        arg: &Label<T>,
    ) -> (bool, Option<Interpretation>) {
        let prefix = Interpretation::builder(self.adf.n_arguments())
            .satisfied(arg.id())
            .build();
        let mut pipeline = self.pipeline(Some(prefix));
        let model = pipeline.next();
        pipeline.close();
        (model.is_some(), model)
    }
}

impl<T> SkepticalAcceptanceComputer<T> for SemanticsReasoner<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Label<T>) -> bool {
        self.is_skeptically_accepted_with_certificate(arg).0
    }

    fn is_skeptically_accepted_with_certificate(
        &mut self,
        arg: &Label<T>,
    ) -> (bool, Option<Interpretation>) {
        let mut pipeline = self.pipeline(None);
        let counterexample = pipeline.find(|m| !m.is_satisfied(arg.id()));
        pipeline.close();
        (counterexample.is_none(), counterexample)
    }
}
