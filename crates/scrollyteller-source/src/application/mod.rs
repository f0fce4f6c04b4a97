//! Source resolution.

pub mod resolver;
