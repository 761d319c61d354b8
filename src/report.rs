//! Functionality related to the `exoncov report` subcommand.

pub mod command;
pub mod inputs;
pub mod writer;
