//! Utilities related to the parsing of arguments.

use std::fmt::Display;

//===========//
// Threshold //
//===========//

/// The default threshold: any exon that is not fully covered at 30x.
pub const DEFAULT_THRESHOLD: u8 = 100;

/// Utility method to parse the threshold passed in on the command line and
/// ensure it is a whole percentage within the range [0, 100].
pub fn threshold_in_range(threshold_raw: &str) -> Result<u8, String> {
    let threshold: u8 = threshold_raw
        .trim()
        .parse()
        .map_err(|_| format!("{} isn't a whole percentage", threshold_raw))?;

    match (0..=100).contains(&threshold) {
        true => Ok(threshold),
        false => Err(String::from("Threshold must be between 0 and 100")),
    }
}

//================//
// Malformed Keys //
//================//

/// What to do with rows whose `GeneSymbol;Accession` column does not split into
/// exactly two non-empty tokens.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Fail the whole file, reporting the offending line.
    #[default]
    Strict,

    /// Keep the row with the text before the first `;` as the gene symbol and
    /// no accession.
    Lenient,
}

impl Display for KeyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}
