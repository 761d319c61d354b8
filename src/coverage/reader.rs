//! Input reader for coverage tables.
//!
//! A coverage table is whitespace-delimited text (tabs, spaces, or runs of
//! either) with a header row followed by one row per exon interval. No column
//! holds embedded whitespace, so consecutive separators count as one. The
//! header's column names are fixed by position and are never used to look
//! columns up; only its width is checked. Coverage tools conventionally start
//! the header with `#`. Any later line starting with `#` is treated as a
//! comment.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use csv::StringRecord;
use flate2::read::MultiGzDecoder;
use num_format::Locale;
use num_format::ToFormattedString;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::coverage::record::ExonCoverage;
use crate::coverage::record::GeneKey;
use crate::coverage::record::RawRow;
use crate::errors::Error;
use crate::errors::Result;
use crate::errors::EXPECTED_COLUMNS;
use crate::utils::args::KeyPolicy;
use crate::utils::formats::CoverageFileFormat;

/// Attempts to open a coverage file, decompressing it on the fly if it is
/// gzipped.
pub fn open<P>(src: P) -> Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    let path = src.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match CoverageFileFormat::detect(path) {
        CoverageFileFormat::Gzipped => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        CoverageFileFormat::Plain => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads every exon coverage record from the file at `src`.
pub fn read<P>(src: P, policy: KeyPolicy) -> Result<Vec<ExonCoverage>>
where
    P: AsRef<Path>,
{
    let path = src.as_ref();
    debug!(
        "Reading {} as {}.",
        path.display(),
        CoverageFileFormat::detect(path)
    );

    let reader = open(path)?;
    from_reader(reader, path, policy)
}

/// Reads every exon coverage record from `reader`. The `path` is only used to
/// label errors and log messages.
pub fn from_reader<R>(reader: R, path: &Path, policy: KeyPolicy) -> Result<Vec<ExonCoverage>>
where
    R: BufRead,
{
    let mut lines = reader.lines();
    let mut line = 0u64;

    // The header is the first line carrying any text.
    let header = loop {
        match lines.next() {
            Some(result) => {
                line += 1;
                let text = result.map_err(|source| io_error(path, source))?;
                let fields = split_fields(&text);

                if !fields.is_empty() {
                    break fields;
                }
            }
            None => {
                return Err(Error::Header {
                    path: path.to_path_buf(),
                    found: 0,
                })
            }
        }
    };

    if header.len() != EXPECTED_COLUMNS {
        return Err(Error::Header {
            path: path.to_path_buf(),
            found: header.len(),
        });
    }
    debug!("  [*] Header: {:?}", header);

    let mut coverages = Vec::new();
    let mut malformed_keys = 0usize;

    for result in lines {
        line += 1;
        let text = result.map_err(|source| io_error(path, source))?;
        let record = split_fields(&text);

        if is_skippable(&record) {
            continue;
        }

        if record.len() != EXPECTED_COLUMNS {
            return Err(Error::ColumnCount {
                path: path.to_path_buf(),
                line,
                found: record.len(),
            });
        }

        let row: RawRow = record.deserialize(None).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            line,
            source,
        })?;

        let percentage = row.percentage_30();
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(Error::PercentageOutOfRange {
                path: path.to_path_buf(),
                line,
                value: percentage,
            });
        }

        let key = match GeneKey::parse(row.gene_key(), policy) {
            Some(key) => key,
            None => {
                return Err(Error::MalformedKey {
                    path: path.to_path_buf(),
                    line,
                    key: row.gene_key().to_string(),
                })
            }
        };

        if key.accession.is_none() {
            warn!(
                "{}:{}: malformed gene key \"{}\", keeping it without an accession.",
                path.display(),
                line,
                row.gene_key()
            );
            malformed_keys += 1;
        }

        coverages.push(row.into_record(key));
    }

    info!(
        "Parsed {} exon rows from {}.",
        coverages.len().to_formatted_string(&Locale::en),
        path.display()
    );

    if malformed_keys > 0 {
        warn!(
            "{} rows in {} had no accession.",
            malformed_keys.to_formatted_string(&Locale::en),
            path.display()
        );
    }

    Ok(coverages)
}

/// Splits a line on runs of tabs and spaces.
fn split_fields(text: &str) -> StringRecord {
    text.split_whitespace().collect()
}

/// Blank lines and comment lines carry no data.
fn is_skippable(record: &StringRecord) -> bool {
    match record.get(0) {
        Some(first) => first.starts_with('#'),
        None => true,
    }
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
