use crate::{sat::SatSolver, semantics::Interpretation};

/// The trait for encodings adding the clauses of a fixed property into a SAT solver.
pub trait SatEncoding {
    /// Adds the clauses of this encoding.
    fn encode(&self, solver: &mut dyn SatSolver);
}

/// The trait for encodings adding clauses that depend on an interpretation into a SAT solver.
pub trait RelativeSatEncoding {
    /// Adds the clauses of this encoding, relatively to the given interpretation.
    fn encode(&self, solver: &mut dyn SatSolver, interpretation: &Interpretation);
}
