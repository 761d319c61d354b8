//! Writing of the detailed and summary reports.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::coverage::record::REPORT_COLUMNS;
use crate::coverage::summary::SUMMARY_COLUMNS;
use crate::coverage::Analysis;
use crate::utils::formats::OutputFormat;

/// The pair of files written for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    /// Row level detail: `<prefix>_report.<ext>`.
    pub report: PathBuf,

    /// Per-gene statistics: `<prefix>_summary_report.<ext>`.
    pub summary: PathBuf,
}

impl ReportPaths {
    /// Computes where the reports for `prefix` land within `directory`.
    ///
    /// ```
    /// use std::path::Path;
    /// use exoncov::report::writer::ReportPaths;
    /// use exoncov::utils::formats::OutputFormat;
    ///
    /// let paths = ReportPaths::new(Path::new("out"), "NA12878", OutputFormat::Csv);
    /// assert_eq!(paths.report, Path::new("out/NA12878_report.csv"));
    /// assert_eq!(paths.summary, Path::new("out/NA12878_summary_report.csv"));
    /// ```
    pub fn new(directory: &Path, prefix: &str, format: OutputFormat) -> Self {
        let ext = format.extension();

        ReportPaths {
            report: directory.join(format!("{}_report.{}", prefix, ext)),
            summary: directory.join(format!("{}_summary_report.{}", prefix, ext)),
        }
    }
}

/// Writes a table with an explicit header row followed by one row per item.
/// The header is written even when there are no rows.
pub fn write_table<T>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<()>
where
    T: Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer
        .write_record(columns)
        .with_context(|| format!("writing header to {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    debug!("  [*] Wrote {} rows to {}.", rows.len(), path.display());
    Ok(())
}

/// Writes both reports for an [`Analysis`].
pub fn write_reports(
    analysis: &Analysis,
    directory: &Path,
    prefix: &str,
    format: OutputFormat,
) -> anyhow::Result<ReportPaths> {
    let paths = ReportPaths::new(directory, prefix, format);

    write_table(
        &paths.report,
        &REPORT_COLUMNS,
        &analysis.low_coverage,
        format,
    )?;
    write_table(&paths.summary, &SUMMARY_COLUMNS, &analysis.summary, format)?;

    info!(
        "Wrote {} and {}.",
        paths.report.display(),
        paths.summary.display()
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::coverage::analyze_records;
    use crate::coverage::filter::tests::exon;

    #[test]
    fn test_reports_for_low_coverage_gene() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            exon("BRCA1;NM_1", 100.0),
            exon("TP53;NM_2", 100.0),
            exon("BRCA1;NM_1", 80.0),
            exon("BRCA1;NM_1", 100.0),
        ];
        let analysis = analyze_records(&records, 100);

        let paths = write_reports(&analysis, dir.path(), "S1", OutputFormat::Csv).unwrap();
        assert_eq!(paths.report, dir.path().join("S1_report.csv"));

        let report = fs::read_to_string(&paths.report).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], REPORT_COLUMNS.join(","));
        assert!(lines[1..].iter().all(|l| l.ends_with(",BRCA1,NM_1")));
        assert!(lines[2].contains(",80.0,"));

        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert_eq!(
            summary,
            format!(
                "{}\nBRCA1,NM_1,80.00,100.00,93.33,100.00\n",
                SUMMARY_COLUMNS.join(",")
            )
        );
    }

    #[test]
    fn test_fully_covered_input_writes_header_only_reports() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![exon("A;NM_1", 100.0), exon("B;NM_2", 100.0)];
        let analysis = analyze_records(&records, 100);

        let paths = write_reports(&analysis, dir.path(), "S1", OutputFormat::Tsv).unwrap();
        assert_eq!(paths.summary, dir.path().join("S1_summary_report.tsv"));

        let report = fs::read_to_string(&paths.report).unwrap();
        assert_eq!(report, format!("{}\n", REPORT_COLUMNS.join("\t")));

        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert_eq!(summary, format!("{}\n", SUMMARY_COLUMNS.join("\t")));
    }

    #[test]
    fn test_missing_accession_is_an_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = exon("A;NM_1", 50.0);
        record.accession = None;
        let analysis = analyze_records(&[record], 100);

        let paths = write_reports(&analysis, dir.path(), "S1", OutputFormat::Csv).unwrap();
        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert!(summary.ends_with("\nA,,50.00,50.00,50.00,50.00\n"));
    }
}
