//! Orchestration domain types.

pub mod config;
pub mod context;
pub mod section;
