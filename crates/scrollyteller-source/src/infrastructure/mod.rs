//! Source fetcher implementations.

pub mod fs_fetcher;
