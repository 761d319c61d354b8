//! Utilities related to the file formats read and written by `exoncov`.

use std::fmt;
use std::path::Path;

/// File name suffixes that mark a file as coverage output worth reporting on
/// when scanning a directory.
pub const COVERAGE_FILE_SUFFIXES: &[&str] = &[
    "_output.tsv",
    "_output.txt",
    "_output.tsv.gz",
    "_output.txt.gz",
];

/// Extensions that are stripped from an input file name when deriving an
/// output prefix from it. Order matters: compression comes off first.
const KNOWN_EXTENSIONS: &[&str] = &[".gz", ".tsv", ".txt"];

/// How a coverage input file is stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageFileFormat {
    /// Plain, uncompressed text.
    Plain,

    /// Gzip (or bgzip) compressed text.
    Gzipped,
}

impl CoverageFileFormat {
    /// Detects the storage format of a coverage file from its extension.
    pub fn detect<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        match path.as_ref().extension().and_then(|x| x.to_str()) {
            Some("gz") => CoverageFileFormat::Gzipped,
            _ => CoverageFileFormat::Plain,
        }
    }
}

impl fmt::Display for CoverageFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageFileFormat::Plain => write!(f, "plain text"),
            CoverageFileFormat::Gzipped => write!(f, "gzipped text"),
        }
    }
}

/// The spreadsheet-compatible format reports are written in.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values.
    #[default]
    Csv,

    /// Tab-separated values.
    Tsv,
}

impl OutputFormat {
    /// The field delimiter used when writing this format.
    pub fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }

    /// The file extension (without the leading dot) for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

/// Returns whether a file name carries one of the [`COVERAGE_FILE_SUFFIXES`].
pub fn is_coverage_file_name(name: &str) -> bool {
    COVERAGE_FILE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Strips the known extensions from a file name, e.g. `a_output.tsv.gz`
/// becomes `a_output`. If stripping would leave nothing, the name is returned
/// unchanged.
pub fn strip_known_extensions(name: &str) -> &str {
    let mut stem = name;

    for ext in KNOWN_EXTENSIONS {
        if let Some(s) = stem.strip_suffix(ext) {
            stem = s;
        }
    }

    match stem.is_empty() {
        true => name,
        false => stem,
    }
}
