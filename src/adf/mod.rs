//! This module contains the material used to define Abstract Dialectical Frameworks.

mod acceptance_condition;
pub use acceptance_condition::AcceptanceCondition;

mod adf_framework;
pub use adf_framework::AbstractDialecticalFramework;
pub use adf_framework::AdfBuilder;
pub use adf_framework::Link;

mod link_type;
pub use link_type::compute_link_types;
pub use link_type::LinkType;
