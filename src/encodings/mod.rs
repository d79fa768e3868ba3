//! Objects used to encode ADF semantics into SAT solvers.

mod conflict_free_encoding;
pub use conflict_free_encoding::ConflictFreeEncoding;
pub use conflict_free_encoding::TwoValuedEncoding;

mod k_bipolar_encoding;
pub use k_bipolar_encoding::KBipolarEncoding;
pub use k_bipolar_encoding::DEFAULT_K;

mod propositional_mapping;
pub use propositional_mapping::PropositionalMapping;

mod refinement_encodings;
pub use refinement_encodings::FixPartialEncoding;
pub use refinement_encodings::LargerInterpretationEncoding;
pub use refinement_encodings::RefineLargerEncoding;
pub use refinement_encodings::RefineUnequalEncoding;

mod specs;
pub use specs::RelativeSatEncoding;
pub use specs::SatEncoding;

mod tseitin_transformer;
pub use tseitin_transformer::Polarity;
pub use tseitin_transformer::TseitinTransformer;

mod verify_admissible_encoding;
pub use verify_admissible_encoding::VerifyAdmissibleEncoding;
