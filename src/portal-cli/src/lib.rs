//! Portal admin CLI.
//!
//! - `cli` - argument parsing and dispatch
//! - `config` - config file and environment overrides
//! - `logging` - tracing subscriber setup
//! - `*_cmd.rs` - individual command implementations

pub mod catalog_cmd;
pub mod cli;
pub mod config;
pub mod logging;
pub mod visibility_cmd;
