//! Orchestration phases: render, step dispatch and resize.

pub mod dispatch;
pub mod render;
pub mod resize;
