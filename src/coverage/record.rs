//! Exon coverage records as parsed from a coverage table.

use serde::Deserialize;
use serde::Serialize;

use crate::utils::args::KeyPolicy;

/// Delimiter between the gene symbol and the accession in the compound key.
pub const GENE_KEY_DELIMITER: char = ';';

/// Column names of the detailed report, in the order they are written.
pub const REPORT_COLUMNS: [&str; 14] = [
    "chromosome",
    "StartPosition",
    "EndPosition",
    "FullPosition",
    "NotUsed1",
    "NotUsed2",
    "GeneSymbol;Accession",
    "Size",
    "readCount",
    "meanCoverage",
    "percentage30",
    "sampleName",
    "GeneSymbol",
    "Accession",
];

/// A single row of a coverage table, with columns bound by position.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    chromosome: String,
    start: u64,
    end: u64,
    full_position: String,
    not_used_1: String,
    not_used_2: String,
    gene_key: String,
    size: u64,
    read_count: u64,
    mean_coverage: f64,
    percentage_30: f64,
    sample_name: String,
}

impl RawRow {
    /// The raw `GeneSymbol;Accession` value of this row.
    pub fn gene_key(&self) -> &str {
        &self.gene_key
    }

    /// The percentage of the interval covered at 30x, as parsed.
    pub fn percentage_30(&self) -> f64 {
        self.percentage_30
    }

    /// Completes the row with its derived gene symbol and accession.
    pub fn into_record(self, key: GeneKey) -> ExonCoverage {
        ExonCoverage {
            chromosome: self.chromosome,
            start: self.start,
            end: self.end,
            full_position: self.full_position,
            not_used_1: self.not_used_1,
            not_used_2: self.not_used_2,
            gene_key: self.gene_key,
            size: self.size,
            read_count: self.read_count,
            mean_coverage: self.mean_coverage,
            percentage_30: self.percentage_30,
            sample_name: self.sample_name,
            gene_symbol: key.symbol,
            accession: key.accession,
        }
    }
}

/// The two halves of the `GeneSymbol;Accession` column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneKey {
    /// The gene symbol, e.g. `BRCA1`.
    pub symbol: String,

    /// The transcript accession, e.g. `NM_007294.4`. Only ever `None` for
    /// malformed keys read under [`KeyPolicy::Lenient`].
    pub accession: Option<String>,
}

impl GeneKey {
    /// Splits a compound key according to `policy`. Returns `None` if the key
    /// is malformed and the policy does not allow it through.
    ///
    /// ```
    /// use exoncov::coverage::record::GeneKey;
    /// use exoncov::utils::args::KeyPolicy;
    ///
    /// let key = GeneKey::parse("BRCA1;NM_007294.4", KeyPolicy::Strict).unwrap();
    /// assert_eq!(key.symbol, "BRCA1");
    /// assert_eq!(key.accession.as_deref(), Some("NM_007294.4"));
    ///
    /// assert!(GeneKey::parse("BRCA1", KeyPolicy::Strict).is_none());
    /// ```
    pub fn parse(raw: &str, policy: KeyPolicy) -> Option<Self> {
        let tokens: Vec<&str> = raw.split(GENE_KEY_DELIMITER).collect();

        if let [symbol, accession] = tokens[..] {
            if !symbol.is_empty() && !accession.is_empty() {
                return Some(GeneKey {
                    symbol: symbol.to_string(),
                    accession: Some(accession.to_string()),
                });
            }
        }

        match policy {
            KeyPolicy::Strict => None,
            KeyPolicy::Lenient => match tokens[0] {
                "" => None,
                symbol => Some(GeneKey {
                    symbol: symbol.to_string(),
                    accession: None,
                }),
            },
        }
    }
}

/// One exon interval of one sample, together with the gene it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExonCoverage {
    /// Reference sequence name.
    pub chromosome: String,

    /// Start of the exon interval.
    #[serde(rename = "StartPosition")]
    pub start: u64,

    /// End of the exon interval.
    #[serde(rename = "EndPosition")]
    pub end: u64,

    /// The interval rendered as `chrom-start-end`.
    #[serde(rename = "FullPosition")]
    pub full_position: String,

    /// Carried through untouched.
    #[serde(rename = "NotUsed1")]
    pub not_used_1: String,

    /// Carried through untouched.
    #[serde(rename = "NotUsed2")]
    pub not_used_2: String,

    /// The raw compound key the gene symbol and accession were split from.
    #[serde(rename = "GeneSymbol;Accession")]
    pub gene_key: String,

    /// Length of the interval.
    #[serde(rename = "Size")]
    pub size: u64,

    /// Number of reads overlapping the interval.
    #[serde(rename = "readCount")]
    pub read_count: u64,

    /// Mean depth over the interval.
    #[serde(rename = "meanCoverage")]
    pub mean_coverage: f64,

    /// Percentage of bases in the interval covered at 30x or more.
    #[serde(rename = "percentage30")]
    pub percentage_30: f64,

    /// Sample the coverage was computed for.
    #[serde(rename = "sampleName")]
    pub sample_name: String,

    /// Left half of the compound key.
    #[serde(rename = "GeneSymbol")]
    pub gene_symbol: String,

    /// Right half of the compound key.
    #[serde(rename = "Accession")]
    pub accession: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_well_formed_key() {
        let key = GeneKey::parse("TP53;NM_000546.6", KeyPolicy::Strict).unwrap();
        assert_eq!(key.symbol, "TP53");
        assert_eq!(key.accession, Some(String::from("NM_000546.6")));
    }

    #[test]
    fn test_strict_policy_rejects_malformed_keys() {
        for raw in ["TP53", "TP53;", ";NM_000546.6", "TP53;NM_1;NM_2", ""] {
            assert!(GeneKey::parse(raw, KeyPolicy::Strict).is_none(), "{}", raw);
        }
    }

    #[test]
    fn test_lenient_policy_passes_through_without_accession() {
        let key = GeneKey::parse("TP53", KeyPolicy::Lenient).unwrap();
        assert_eq!(key.symbol, "TP53");
        assert_eq!(key.accession, None);

        let key = GeneKey::parse("TP53;NM_1;NM_2", KeyPolicy::Lenient).unwrap();
        assert_eq!(key.symbol, "TP53");
        assert_eq!(key.accession, None);

        assert!(GeneKey::parse(";NM_1", KeyPolicy::Lenient).is_none());
    }

    #[test]
    fn test_serialized_header_matches_report_columns() {
        let record = RawRow {
            chromosome: String::from("chr17"),
            start: 43044294,
            end: 43045802,
            full_position: String::from("chr17-43044294-43045802"),
            not_used_1: String::from("0"),
            not_used_2: String::from("+"),
            gene_key: String::from("BRCA1;NM_007294.4"),
            size: 1508,
            read_count: 4210,
            mean_coverage: 212.5,
            percentage_30: 100.0,
            sample_name: String::from("NA12878"),
        };
        let key = GeneKey::parse(record.gene_key(), KeyPolicy::Strict).unwrap();
        let record = record.into_record(key);

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = output.lines().next().unwrap();
        assert_eq!(header, REPORT_COLUMNS.join(","));
    }
}
