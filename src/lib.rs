// actchat - lib.rs
//
// Library entry point. The command-line front end in `main.rs` is a thin
// caller of `app::batch::run_batch`; any other trigger can do the same.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
