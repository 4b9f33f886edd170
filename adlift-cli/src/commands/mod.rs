//! CLI command implementations.

pub mod geometry;
pub mod networks;
pub mod run;
