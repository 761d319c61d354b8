//! Functionality related to the `exoncov view` subcommand.

pub mod command;
