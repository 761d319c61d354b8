//! Errors raised while reading and summarizing coverage files.

use std::io;
use std::path::PathBuf;

/// The number of columns every coverage table is expected to carry.
pub const EXPECTED_COLUMNS: usize = 12;

/// An error encountered while processing a single coverage file. Every variant
/// carries the path of the offending file so that failures in directory mode
/// can be traced back to their source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// The offending file.
        path: PathBuf,

        /// The underlying I/O error.
        source: io::Error,
    },

    /// The header row is missing or does not have the expected shape.
    #[error(
        "invalid header in {}: expected {} columns, found {found}",
        .path.display(),
        EXPECTED_COLUMNS
    )]
    Header {
        /// The offending file.
        path: PathBuf,

        /// The number of columns found in the header (zero for an empty file).
        found: usize,
    },

    /// A data row does not have the expected number of columns.
    #[error(
        "{}:{line}: expected {} columns, found {found}",
        .path.display(),
        EXPECTED_COLUMNS
    )]
    ColumnCount {
        /// The offending file.
        path: PathBuf,

        /// The one-based line number of the row.
        line: u64,

        /// The number of columns found in the row.
        found: usize,
    },

    /// A column value could not be coerced into its expected type.
    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,

        /// The one-based line number of the row.
        line: u64,

        /// The underlying coercion error.
        source: csv::Error,
    },

    /// The percentage covered at 30x is not a finite number between 0 and
    /// 100.
    #[error(
        "{}:{line}: percentage30 value {value} is not a percentage between 0 and 100",
        .path.display()
    )]
    PercentageOutOfRange {
        /// The offending file.
        path: PathBuf,

        /// The one-based line number of the row.
        line: u64,

        /// The value as parsed.
        value: f64,
    },

    /// The `GeneSymbol;Accession` column did not split into exactly two
    /// non-empty tokens.
    #[error(
        "{}:{line}: malformed gene key \"{key}\", expected \"GeneSymbol;Accession\"",
        .path.display()
    )]
    MalformedKey {
        /// The offending file.
        path: PathBuf,

        /// The one-based line number of the row.
        line: u64,

        /// The raw value of the compound key column.
        key: String,
    },
}

/// A [`Result`](std::result::Result) specialized to coverage [`Error`]s.
pub type Result<T> = std::result::Result<T, Error>;
