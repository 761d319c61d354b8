//! `exoncov` is a command line tool that reports genes whose exons are not
//! sufficiently covered at 30x in the region output of a coverage tool such as
//! `sambamba depth region`. This package is composed of both a library crate,
//! as well as a binary crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `exoncov`. The pipeline itself lives in [`coverage`];
//! [`report`] and [`view`] are the subcommands built on top of it.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod coverage;
pub mod errors;
pub mod report;
pub mod utils;
pub mod view;
