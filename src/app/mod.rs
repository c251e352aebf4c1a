// actchat - app/mod.rs
//
// Application layer: option resolution, per-file processing, batch
// orchestration, result rendering.
// Dependencies: core and platform layers.

pub mod batch;
pub mod options;
pub mod process;
pub mod report;
