//! Command modules for the tsigc CLI.
//!
//! This module contains implementations for all available subcommands.
//! Each subcommand is implemented in its own file following a standardized pattern.

pub mod common;
pub mod traits;

pub mod check;
pub mod dump;
pub mod type_cmd;

// Re-export command types and functions (used by main.rs)
#[allow(unused_imports)]
pub use check::{run_check, CheckArgs};
#[allow(unused_imports)]
pub use dump::{run_dump, DumpArgs};
#[allow(unused_imports)]
pub use type_cmd::{run_type, TypeArgs};
