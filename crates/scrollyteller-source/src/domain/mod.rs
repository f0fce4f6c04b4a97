//! Source domain types and parsers.

pub mod delimited;
pub mod formats;
pub mod source;
