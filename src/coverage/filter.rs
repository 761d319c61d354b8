//! Selection of genes with insufficient coverage at 30x.
//!
//! Inclusion is decided per gene, not per exon: as soon as one exon of a gene
//! falls below the threshold, every exon of that gene is selected so that the
//! report shows the gene's complete picture.

use indexmap::IndexSet;

use crate::coverage::record::ExonCoverage;

/// Returns whether a single exon is below the threshold (exclusive bound).
pub fn is_low_coverage(record: &ExonCoverage, threshold: u8) -> bool {
    record.percentage_30 < f64::from(threshold)
}

/// Gene symbols with at least one exon below `threshold`, in the order they
/// first appear in `records`.
pub fn low_coverage_genes(records: &[ExonCoverage], threshold: u8) -> IndexSet<&str> {
    records
        .iter()
        .filter(|record| is_low_coverage(record, threshold))
        .map(|record| record.gene_symbol.as_str())
        .collect()
}

/// Every record belonging to a gene with at least one exon below `threshold`,
/// in input order.
pub fn select_low_coverage(records: &[ExonCoverage], threshold: u8) -> Vec<ExonCoverage> {
    let genes = low_coverage_genes(records, threshold);

    records
        .iter()
        .filter(|record| genes.contains(record.gene_symbol.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a minimal record for a gene with the given coverage at 30x.
    pub(crate) fn exon(gene_key: &str, percentage_30: f64) -> ExonCoverage {
        let (symbol, accession) = gene_key.split_once(';').unwrap();

        ExonCoverage {
            chromosome: String::from("chr1"),
            start: 100,
            end: 200,
            full_position: String::from("chr1-100-200"),
            not_used_1: String::from("0"),
            not_used_2: String::from("+"),
            gene_key: gene_key.to_string(),
            size: 100,
            read_count: 1000,
            mean_coverage: 45.0,
            percentage_30,
            sample_name: String::from("S1"),
            gene_symbol: symbol.to_string(),
            accession: Some(accession.to_string()),
        }
    }

    fn panel() -> Vec<ExonCoverage> {
        vec![
            exon("BRCA1;NM_1", 100.0),
            exon("TP53;NM_2", 100.0),
            exon("BRCA1;NM_1", 80.0),
            exon("PTEN;NM_3", 99.5),
            exon("TP53;NM_2", 100.0),
            exon("BRCA1;NM_1", 100.0),
        ]
    }

    #[test]
    fn test_low_coverage_genes_keeps_first_appearance_order() {
        let records = panel();
        let genes = low_coverage_genes(&records, 100);
        assert_eq!(genes.into_iter().collect::<Vec<_>>(), vec!["BRCA1", "PTEN"]);
    }

    #[test]
    fn test_selection_includes_every_exon_of_a_low_gene() {
        let records = panel();
        let selected = select_low_coverage(&records, 100);

        assert_eq!(selected.len(), 4);
        assert_eq!(
            selected.iter().filter(|r| r.gene_symbol == "BRCA1").count(),
            3
        );
        assert!(selected.iter().all(|r| r.gene_symbol != "TP53"));
    }

    #[test]
    fn test_selection_is_sound_and_complete() {
        let records = panel();

        for threshold in [0, 50, 80, 81, 99, 100] {
            let selected = select_low_coverage(&records, threshold);
            let genes = low_coverage_genes(&records, threshold);

            // Every selected row belongs to a gene with a low exon.
            for row in &selected {
                assert!(records
                    .iter()
                    .any(|r| r.gene_symbol == row.gene_symbol && is_low_coverage(r, threshold)));
            }

            // Every row of a low gene is selected.
            let expected = records
                .iter()
                .filter(|r| genes.contains(r.gene_symbol.as_str()))
                .count();
            assert_eq!(selected.len(), expected);
        }

        // Nothing is below a zero threshold.
        assert!(select_low_coverage(&records, 0).is_empty());
        assert!(low_coverage_genes(&records, 0).is_empty());
    }

    #[test]
    fn test_threshold_is_an_exclusive_bound() {
        let records = vec![exon("A;NM_1", 80.0)];
        assert!(select_low_coverage(&records, 80).is_empty());
        assert_eq!(select_low_coverage(&records, 81).len(), 1);
    }

    #[test]
    fn test_raising_the_threshold_never_shrinks_the_gene_set() {
        let records = panel();
        let mut previous = 0;

        for threshold in 0..=100 {
            let count = low_coverage_genes(&records, threshold).len();
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn test_fully_covered_input_selects_nothing() {
        let records = vec![exon("A;NM_1", 100.0), exon("B;NM_2", 100.0)];
        assert!(select_low_coverage(&records, 100).is_empty());
        assert!(select_low_coverage(&[], 100).is_empty());
    }
}
