//! Reasoning components computing the models of ADFs under several semantics.
//!
//! Models are computed by [`Pipeline`] objects combining a [`CandidateGenerator`],
//! some processors and a [`Verifier`].
//! [`SemanticsReasoner`] builds the pipelines dedicated to each [`Semantics`] and answers the usual queries.

mod admissible_verifier;
pub use admissible_verifier::AdmissibleVerifier;

mod candidate_generators;
pub use candidate_generators::ConflictFreeGenerator;
pub use candidate_generators::ModelGenerator;

mod complete_verifier;
pub use complete_verifier::CompleteVerifier;

mod ground_generator;
pub use ground_generator::GroundGenerator;

mod naive_verifier;
pub use naive_verifier::NaiveVerifier;

mod pipeline;
pub use pipeline::Pipeline;
pub use pipeline::PipelineBuilder;
pub use pipeline::PipelineState;

mod preferred_verifier;
pub use preferred_verifier::PreferredVerifier;

mod processors;
pub use processors::AdmissibleMaximizer;
pub use processors::KBipolarStateProcessor;

mod semantics_reasoner;
pub use semantics_reasoner::Semantics;
pub use semantics_reasoner::SemanticsReasoner;

mod specs;
pub use specs::CandidateGenerator;
pub use specs::CredulousAcceptanceComputer;
pub use specs::InterpretationProcessor;
pub use specs::ModelsComputer;
pub use specs::SingleModelComputer;
pub use specs::SkepticalAcceptanceComputer;
pub use specs::StateProcessor;
pub use specs::Verifier;

mod stable_verifier;
pub use stable_verifier::StableVerifier;
