// actchat - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, filesystem.
// Dependencies: standard library, directories crate, core::export.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
