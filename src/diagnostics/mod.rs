//! Diagnostics data model returned alongside the descriptor.
//!
//! `HogReport` is the entry point: it keeps every intermediate grid plus a
//! `PipelineTrace` with shapes, summary statistics and stage timings.

pub mod report;
pub mod timing;

pub use report::{GridShape, HogReport, InputDescriptor, PipelineTrace};
pub use timing::{StageTiming, TimingBreakdown};
