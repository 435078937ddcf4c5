// aggregate.rs - Per-individual accumulation of reference/alternative energy series

use crate::core::construct::ConstructIdParser;
use crate::core::overlap::{representative_snp, snps_in_arms};
use crate::data::energy::{EnergyMetric, EnergyTable};
use crate::data::snp::SnpSet;
use std::collections::BTreeMap;

/// Parallel value sequences for one energy metric
#[derive(Debug, Clone, Default)]
pub struct MetricSeries {
    pub ref_values: Vec<f64>,
    pub alt_values: Vec<f64>,
    pub snp_values: Vec<Option<i64>>,
}

impl MetricSeries {
    pub fn len(&self) -> usize {
        self.ref_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ref_values.is_empty()
    }
}

/// Accumulator for one individual's full construct population
///
/// Fresh per individual and passed explicitly into each file-pair ingestion;
/// no state crosses individual boundaries.
#[derive(Debug, Clone, Default)]
pub struct EnergyAccumulator {
    series: [MetricSeries; 3],
    pub total_constructs: usize,
    pub snp_constructs: usize,
    pub error_constructs: usize,
    pub row_mismatches: usize,
    pub snp_counter: BTreeMap<i64, usize>,
}

impl EnergyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self, metric: EnergyMetric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    /// Resolve the representative SNP for every row of an alt table
    ///
    /// Updates the construct counters: constructs whose identifier fails to
    /// decode are counted as errors and resolve to no SNP; they still keep
    /// their slot in the returned vector so the positional join is unaffected.
    pub fn resolve_assignments(
        &mut self,
        alt_table: &EnergyTable,
        snps: &SnpSet,
        parser: &ConstructIdParser,
    ) -> Vec<Option<i64>> {
        let mut assignments = Vec::with_capacity(alt_table.len());

        for row in &alt_table.rows {
            self.total_constructs += 1;

            let assignment = match parser.parse(&row.construct_id) {
                Ok(params) => {
                    let contained = snps_in_arms(&params, snps);
                    match representative_snp(&contained) {
                        Some(snp) => {
                            self.snp_constructs += 1;
                            *self.snp_counter.entry(snp).or_insert(0) += 1;
                            Some(snp)
                        }
                        None => None,
                    }
                }
                Err(e) => {
                    eprintln!("⚠️  {}", e);
                    self.error_constructs += 1;
                    None
                }
            };

            assignments.push(assignment);
        }

        assignments
    }

    /// Join one reference/alternative table pair into the accumulated series
    ///
    /// Rows are joined strictly by ordinal position, never by matching
    /// ConstructID values; reordered or inconsistently filtered tables will
    /// silently misalign. Alt rows beyond the reference table length are
    /// skipped and counted as mismatches. A row enters a metric's series only
    /// if both sides of that metric are finite numbers; exclusion is
    /// independent across the three metrics.
    ///
    /// Returns the number of alt rows skipped for lack of a reference row.
    pub fn ingest_pair(
        &mut self,
        ref_table: &EnergyTable,
        alt_table: &EnergyTable,
        assignments: &[Option<i64>],
    ) -> usize {
        let mut skipped = 0;

        for (idx, alt_row) in alt_table.rows.iter().enumerate() {
            let ref_row = match ref_table.rows.get(idx) {
                Some(row) => row,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let assignment = assignments.get(idx).copied().flatten();

            for metric in EnergyMetric::ALL {
                let ref_value = ref_row.metric(metric);
                let alt_value = alt_row.metric(metric);
                if ref_value.is_nan() || alt_value.is_nan() {
                    continue;
                }
                let series = &mut self.series[metric.index()];
                series.ref_values.push(ref_value);
                series.alt_values.push(alt_value);
                series.snp_values.push(assignment);
            }
        }

        self.row_mismatches += skipped;
        skipped
    }

    /// Most frequent representative SNPs, descending by construct count
    pub fn top_snps(&self, limit: usize) -> Vec<(i64, usize)> {
        let mut counts: Vec<(i64, usize)> = self
            .snp_counter
            .iter()
            .map(|(&snp, &count)| (snp, count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts.truncate(limit);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::energy::EnergyRow;

    fn row(id: &str, left: f64, right: f64, total: f64) -> EnergyRow {
        EnergyRow {
            construct_id: id.to_string(),
            energy_left: left,
            energy_right: right,
            energy: total,
        }
    }

    fn table(rows: Vec<EnergyRow>) -> EnergyTable {
        EnergyTable { rows }
    }

    #[test]
    fn test_positional_join_ignores_construct_ids() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::empty();
        let mut acc = EnergyAccumulator::new();

        // Deliberately different ConstructIDs at the same ordinal position
        let ref_table = table(vec![row("REF-A", 1.0, 2.0, 3.0), row("REF-B", 4.0, 5.0, 6.0)]);
        let alt_table = table(vec![row("ALT-X", 1.5, 2.5, 3.5), row("ALT-Y", 4.5, 5.5, 6.5)]);

        let assignments = acc.resolve_assignments(&alt_table, &snps, &parser);
        let skipped = acc.ingest_pair(&ref_table, &alt_table, &assignments);

        assert_eq!(skipped, 0);
        let series = acc.series(EnergyMetric::Left);
        assert_eq!(series.ref_values, vec![1.0, 4.0]);
        assert_eq!(series.alt_values, vec![1.5, 4.5]);
    }

    #[test]
    fn test_excess_alt_rows_are_skipped() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::empty();
        let mut acc = EnergyAccumulator::new();

        let ref_table = table(vec![row("R", 1.0, 1.0, 1.0)]);
        let alt_table = table(vec![row("A", 2.0, 2.0, 2.0), row("B", 3.0, 3.0, 3.0)]);

        let assignments = acc.resolve_assignments(&alt_table, &snps, &parser);
        let skipped = acc.ingest_pair(&ref_table, &alt_table, &assignments);

        assert_eq!(skipped, 1);
        assert_eq!(acc.row_mismatches, 1);
        assert_eq!(acc.series(EnergyMetric::Total).len(), 1);
    }

    #[test]
    fn test_nan_exclusion_is_per_metric() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::empty();
        let mut acc = EnergyAccumulator::new();

        // EnergyLeft is NaN on the alt side, Energy is finite on both sides
        let ref_table = table(vec![row("R", 1.0, 2.0, 3.0)]);
        let alt_table = table(vec![row("A", f64::NAN, 2.5, 3.5)]);

        let assignments = acc.resolve_assignments(&alt_table, &snps, &parser);
        acc.ingest_pair(&ref_table, &alt_table, &assignments);

        assert!(acc.series(EnergyMetric::Left).is_empty());
        assert_eq!(acc.series(EnergyMetric::Right).len(), 1);
        assert_eq!(acc.series(EnergyMetric::Total).len(), 1);
    }

    #[test]
    fn test_decode_errors_still_contribute_energy_rows() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::from_positions([500]);
        let mut acc = EnergyAccumulator::new();

        let ref_table = table(vec![
            row("unused", 1.0, 1.0, 1.0),
            row("unused", 2.0, 2.0, 2.0),
        ]);
        let alt_table = table(vec![
            row("not a construct id", 1.1, 1.1, 1.1),
            row("CGS-1-2-3-4-5-30 CEN-500 CON-700-900", 2.1, 2.1, 2.1),
        ]);

        let assignments = acc.resolve_assignments(&alt_table, &snps, &parser);
        acc.ingest_pair(&ref_table, &alt_table, &assignments);

        assert_eq!(acc.total_constructs, 2);
        assert_eq!(acc.error_constructs, 1);
        assert_eq!(acc.snp_constructs, 1);
        assert_eq!(assignments, vec![None, Some(500)]);
        // Both rows still enter the energy series
        assert_eq!(acc.series(EnergyMetric::Total).len(), 2);
        assert_eq!(
            acc.series(EnergyMetric::Total).snp_values,
            vec![None, Some(500)]
        );
    }

    #[test]
    fn test_representative_snp_is_minimum_overlap() {
        let parser = ConstructIdParser::new();
        // 495 and 510 both overlap the construct's center arms
        let snps = SnpSet::from_positions([510, 495]);
        let mut acc = EnergyAccumulator::new();

        let alt_table = table(vec![row("CGS-1-2-3-4-5-30 CEN-500 CON-700-900", 1.0, 1.0, 1.0)]);
        let assignments = acc.resolve_assignments(&alt_table, &snps, &parser);

        assert_eq!(assignments, vec![Some(495)]);
        assert_eq!(acc.snp_counter.get(&495), Some(&1));
        assert_eq!(acc.snp_counter.get(&510), None);
    }

    #[test]
    fn test_top_snps_ordering_is_deterministic() {
        let mut acc = EnergyAccumulator::new();
        acc.snp_counter.insert(300, 5);
        acc.snp_counter.insert(45, 5);
        acc.snp_counter.insert(120, 9);

        // Descending by count, ties broken by ascending position
        assert_eq!(acc.top_snps(10), vec![(120, 9), (45, 5), (300, 5)]);
        assert_eq!(acc.top_snps(1), vec![(120, 9)]);
    }
}
