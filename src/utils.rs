//! Utilities that are used across the `exoncov` subcommands.

pub mod args;
pub mod display;
pub mod formats;
