//! Parsing, filtering and summarizing of per-exon coverage tables.
//!
//! The pipeline runs strictly forward, each stage producing new values:
//!
//! 1. [`reader::read`] parses a coverage table into [`record::ExonCoverage`]s.
//! 2. [`filter::select_low_coverage`] keeps every exon of each gene that has at
//!    least one exon below the threshold.
//! 3. [`summary::summarize`] computes per-gene statistics over that subset.
//!
//! [`analyze`] chains the three for a single file.

pub mod filter;
pub mod reader;
pub mod record;
pub mod summary;

use std::path::Path;

use crate::errors::Result;
use crate::utils::args::KeyPolicy;

/// Everything the pipeline computes for one coverage file.
#[derive(Debug)]
pub struct Analysis {
    /// Number of exon rows parsed from the file.
    pub total_exons: usize,

    /// Every exon of each gene with at least one low exon, in input order.
    pub low_coverage: Vec<record::ExonCoverage>,

    /// Gene symbols with at least one low exon, in first appearance order.
    pub low_genes: Vec<String>,

    /// Per-gene statistics over [`Analysis::low_coverage`].
    pub summary: Vec<summary::GeneSummary>,
}

/// Runs the read, filter and summarize stages on the file at `src`.
pub fn analyze<P>(src: P, threshold: u8, policy: KeyPolicy) -> Result<Analysis>
where
    P: AsRef<Path>,
{
    let records = reader::read(src, policy)?;
    Ok(analyze_records(&records, threshold))
}

/// Runs the filter and summarize stages on already parsed records.
pub fn analyze_records(records: &[record::ExonCoverage], threshold: u8) -> Analysis {
    let low_genes = filter::low_coverage_genes(records, threshold)
        .into_iter()
        .map(String::from)
        .collect();
    let low_coverage = filter::select_low_coverage(records, threshold);
    let summary = summary::summarize(&low_coverage);

    Analysis {
        total_exons: records.len(),
        low_coverage,
        low_genes,
        summary,
    }
}
