//! Three-valued interpretations of ADFs.

mod interpretation;
pub use interpretation::Interpretation;
pub use interpretation::InterpretationBuilder;
pub use interpretation::Status;
