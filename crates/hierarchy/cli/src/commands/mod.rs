//! CLI command implementations

pub mod membership;
pub mod query;
