//! Crustadf is a SAT-based reasoner for Abstract Dialectical Frameworks (ADFs).
//!
//! ADFs are built with [`AdfBuilder`](adf::AdfBuilder) objects.
//! Their models under a semantics are then computed by a [`SemanticsReasoner`](reasoner::SemanticsReasoner),
//! which relies on incremental SAT solvers given by a [`SatSolverFactory`](sat::SatSolverFactory).

#![warn(missing_docs)]

pub mod adf;

pub mod encodings;

pub mod reasoner;

pub mod sat;

pub mod semantics;

pub mod utils;
