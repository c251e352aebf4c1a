// actchat - core/mod.rs
//
// Core business logic layer: classification, matching, transcript output.
// Must NOT depend on: app or platform.

pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
