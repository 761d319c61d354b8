//! Per-gene aggregation of coverage at 30x.

use std::collections::BTreeMap;

use itertools::Itertools;
use itertools::MinMaxResult;
use serde::Serialize;
use serde::Serializer;

use crate::coverage::record::ExonCoverage;

/// Column names of the summary report, in the order they are written.
pub const SUMMARY_COLUMNS: [&str; 6] = [
    "GeneSymbol",
    "Accession",
    "LowestCoverage",
    "HighestCoverage",
    "MeanCoveragePerExon",
    "MedianCoveragePerExon",
];

/// Coverage statistics for one gene, computed over the percentage of each
/// exon covered at 30x.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneSummary {
    /// The gene symbol.
    #[serde(rename = "GeneSymbol")]
    pub gene_symbol: String,

    /// The accession the symbol was paired with, if any.
    #[serde(rename = "Accession")]
    pub accession: Option<String>,

    /// Coverage of the worst covered exon.
    #[serde(rename = "LowestCoverage", serialize_with = "two_decimals")]
    pub lowest: f64,

    /// Coverage of the best covered exon.
    #[serde(rename = "HighestCoverage", serialize_with = "two_decimals")]
    pub highest: f64,

    /// Arithmetic mean across exons.
    #[serde(rename = "MeanCoveragePerExon", serialize_with = "two_decimals")]
    pub mean: f64,

    /// Median across exons.
    #[serde(rename = "MedianCoveragePerExon", serialize_with = "two_decimals")]
    pub median: f64,

    /// How many exons went into the statistics.
    #[serde(skip)]
    pub exon_count: usize,
}

impl GeneSummary {
    /// Computes the statistics for a gene from its (non-empty) coverage values.
    fn from_values(gene_symbol: String, accession: Option<String>, mut values: Vec<f64>) -> Self {
        let (lowest, highest) = match values.iter().copied().minmax() {
            MinMaxResult::NoElements => (f64::NAN, f64::NAN),
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let mean = values.iter().sum::<f64>() / values.len() as f64;

        values.sort_by(f64::total_cmp);
        let median = median_of_sorted(&values).unwrap_or(f64::NAN);

        GeneSummary {
            gene_symbol,
            accession,
            lowest,
            highest,
            mean,
            median,
            exon_count: values.len(),
        }
    }
}

/// The median of already sorted values: the middle value, or the mean of the
/// two middle values for an even count.
pub fn median_of_sorted(values: &[f64]) -> Option<f64> {
    let n = values.len();

    match n {
        0 => None,
        _ if n % 2 == 1 => Some(values[n / 2]),
        _ => Some((values[n / 2 - 1] + values[n / 2]) / 2.0),
    }
}

/// Groups records by gene symbol and accession and summarizes each group. The
/// result is sorted by gene symbol, then accession.
pub fn summarize(records: &[ExonCoverage]) -> Vec<GeneSummary> {
    let mut groups: BTreeMap<(&str, Option<&str>), Vec<f64>> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.gene_symbol.as_str(), record.accession.as_deref()))
            .or_default()
            .push(record.percentage_30);
    }

    groups
        .into_iter()
        .map(|((gene_symbol, accession), values)| {
            GeneSummary::from_values(
                gene_symbol.to_string(),
                accession.map(String::from),
                values,
            )
        })
        .collect()
}

fn two_decimals<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::filter::select_low_coverage;
    use crate::coverage::filter::tests::exon;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_single_gene_summary() {
        let records = vec![
            exon("BRCA1;NM_1", 100.0),
            exon("BRCA1;NM_1", 80.0),
            exon("BRCA1;NM_1", 100.0),
        ];

        let subset = select_low_coverage(&records, 100);
        assert_eq!(subset.len(), 3);

        let summary = summarize(&subset);
        assert_eq!(summary.len(), 1);

        let gene = &summary[0];
        assert_eq!(gene.gene_symbol, "BRCA1");
        assert_eq!(gene.accession.as_deref(), Some("NM_1"));
        assert_eq!(gene.lowest, 80.0);
        assert_eq!(gene.highest, 100.0);
        assert_close(gene.mean, 280.0 / 3.0);
        assert_eq!(gene.median, 100.0);
        assert_eq!(gene.exon_count, 3);
    }

    #[test]
    fn test_median_of_even_group_averages_middle_values() {
        let records = vec![
            exon("A;NM_1", 10.0),
            exon("A;NM_1", 40.0),
            exon("A;NM_1", 20.0),
            exon("A;NM_1", 90.0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary[0].median, 30.0);
        assert_eq!(summary[0].mean, 40.0);
    }

    #[test]
    fn test_median_of_sorted() {
        assert_eq!(median_of_sorted(&[]), None);
        assert_eq!(median_of_sorted(&[5.0]), Some(5.0));
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_groups_by_symbol_and_accession_sorted() {
        let records = vec![
            exon("TP53;NM_2", 50.0),
            exon("BRCA1;NM_9", 70.0),
            exon("BRCA1;NM_1", 60.0),
            exon("TP53;NM_2", 100.0),
        ];

        let summary = summarize(&records);
        let keys: Vec<(&str, Option<&str>)> = summary
            .iter()
            .map(|s| (s.gene_symbol.as_str(), s.accession.as_deref()))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("BRCA1", Some("NM_1")),
                ("BRCA1", Some("NM_9")),
                ("TP53", Some("NM_2")),
            ]
        );
        assert_eq!(summary[2].exon_count, 2);
    }

    #[test]
    fn test_statistics_are_bounded() {
        let values = [0.0, 12.5, 99.9, 100.0, 33.3, 33.3, 71.0];
        let records: Vec<_> = values.iter().map(|v| exon("A;NM_1", *v)).collect();

        for gene in summarize(&records) {
            assert!(gene.lowest <= gene.mean && gene.mean <= gene.highest);
            assert!(gene.lowest <= gene.median && gene.median <= gene.highest);
        }
    }

    #[test]
    fn test_empty_subset_has_no_summary() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_serialized_summary_rounds_to_two_decimals() {
        let records = vec![
            exon("BRCA1;NM_1", 100.0),
            exon("BRCA1;NM_1", 80.0),
            exon("BRCA1;NM_1", 100.0),
        ];

        let mut writer = csv::Writer::from_writer(vec![]);
        for gene in summarize(&records) {
            writer.serialize(gene).unwrap();
        }
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(
            output,
            format!(
                "{}\nBRCA1,NM_1,80.00,100.00,93.33,100.00\n",
                SUMMARY_COLUMNS.join(",")
            )
        );
    }
}
