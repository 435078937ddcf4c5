// mod.rs - Report and series writers

use crate::core::aggregate::{EnergyAccumulator, MetricSeries};
use crate::core::individual::MetricReport;
use crate::core::outliers::OutlierStats;
use crate::data::energy::EnergyMetric;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

/// Write the per-individual textual outlier statistics report
///
/// The report carries no timestamp so reruns on identical inputs are
/// byte-identical.
pub fn write_stats_report(
    output_dir: &Path,
    individual_id: &str,
    reports: &[MetricReport],
) -> Result<PathBuf, String> {
    let path = output_dir.join(format!(
        "test_individual_{}_outliers_statistics.txt",
        individual_id
    ));
    ensure_parent_dir(&path)?;
    let file = File::create(&path)
        .map_err(|e| format!("Failed to create report file '{}': {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);

    let w = |writer: &mut BufWriter<File>, line: String| -> Result<(), String> {
        writeln!(writer, "{}", line).map_err(|e| format!("Write error: {}", e))
    };

    w(&mut writer, "Outlier statistics by energy metric:".to_string())?;
    w(&mut writer, "=".repeat(50))?;

    for report in reports {
        let stats = &report.stats;
        let upper = stats.upper_count();
        let lower = stats.lower_count();
        w(&mut writer, format!("{}:", report.metric.column_name()))?;
        w(&mut writer, format!("  Total points: {}", stats.total_points()))?;
        w(
            &mut writer,
            format!("  Mean difference (ref - alt): {:.4}", stats.mean_diff),
        )?;
        w(
            &mut writer,
            format!("  Standard deviation: {:.4}", stats.std_diff),
        )?;
        w(
            &mut writer,
            format!(
                "  Upper outliers (> +2std): {} ({:.2}%)",
                upper,
                stats.percentage(upper)
            ),
        )?;
        w(
            &mut writer,
            format!(
                "  Lower outliers (< -2std): {} ({:.2}%)",
                lower,
                stats.percentage(lower)
            ),
        )?;
        w(&mut writer, String::new())?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("📄 Outlier statistics written to: {}", path.display());
    Ok(path)
}

fn classification_label(stats: &OutlierStats, index: usize) -> &'static str {
    if stats.upper[index] {
        "upper"
    } else if stats.lower[index] {
        "lower"
    } else {
        "normal"
    }
}

/// Write one metric's point series for the external renderer
///
/// Flat CSV of (ref, alt, snp, classification) rows; the matching
/// mean_diff/std_diff live in the statistics report and the JSON summary so
/// the renderer can recompute the +-2/3/4 std bands.
pub fn write_series_csv(
    output_dir: &Path,
    individual_id: &str,
    metric: EnergyMetric,
    series: &MetricSeries,
    stats: &OutlierStats,
) -> Result<PathBuf, String> {
    let path = output_dir.join(format!(
        "test_individual_{}_{}_snp_points.csv",
        individual_id,
        metric.column_name()
    ));
    ensure_parent_dir(&path)?;

    let mut writer = csv::Writer::from_path(&path)
        .map_err(|e| format!("Failed to create series file '{}': {}", path.display(), e))?;

    writer
        .write_record(["ref_energy", "alt_energy", "snp", "classification"])
        .map_err(|e| format!("Write error: {}", e))?;

    for i in 0..series.len() {
        let snp = match series.snp_values[i] {
            Some(snp) => snp.to_string(),
            None => String::new(),
        };
        writer
            .write_record([
                series.ref_values[i].to_string(),
                series.alt_values[i].to_string(),
                snp,
                classification_label(stats, i).to_string(),
            ])
            .map_err(|e| format!("Write error: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Flush error: {}", e))?;
    println!("📈 Series export written to: {}", path.display());
    Ok(path)
}

/// Write the machine-readable per-individual run summary
pub fn write_summary_json(
    output_dir: &Path,
    individual_id: &str,
    accumulator: &EnergyAccumulator,
    reports: &[MetricReport],
    processed_pairs: usize,
    skipped_pairs: usize,
) -> Result<PathBuf, String> {
    let path = output_dir.join(format!("test_individual_{}_summary.json", individual_id));
    ensure_parent_dir(&path)?;

    let mut metrics = serde_json::Map::new();
    for report in reports {
        let stats = &report.stats;
        let upper = stats.upper_count();
        let lower = stats.lower_count();
        metrics.insert(
            report.metric.column_name().to_string(),
            serde_json::json!({
                "total_points": stats.total_points(),
                "mean_diff": stats.mean_diff,
                "std_diff": stats.std_diff,
                "upper_outliers": upper,
                "upper_percent": stats.percentage(upper),
                "lower_outliers": lower,
                "lower_percent": stats.percentage(lower),
            }),
        );
    }

    let summary = serde_json::json!({
        "individual_id": individual_id,
        "files": {
            "processed_pairs": processed_pairs,
            "skipped_pairs": skipped_pairs,
        },
        "constructs": {
            "total": accumulator.total_constructs,
            "with_snp": accumulator.snp_constructs,
            "without_snp": accumulator.total_constructs.saturating_sub(accumulator.snp_constructs),
            "decode_errors": accumulator.error_constructs,
            "row_mismatches": accumulator.row_mismatches,
        },
        "metrics": metrics,
    });

    let content = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;
    std::fs::write(&path, content)
        .map_err(|e| format!("Failed to write summary file '{}': {}", path.display(), e))?;

    println!("📊 Run summary written to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outliers::classify_outliers;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mitofrag_{}_{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_stats_report_contents() {
        let dir = temp_dir("report");
        let stats = classify_outliers(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        let reports = vec![MetricReport {
            metric: EnergyMetric::Total,
            stats,
        }];

        let path = write_stats_report(&dir, "3", &reports).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert!(content.starts_with("Outlier statistics by energy metric:"));
        assert!(content.contains("Energy:"));
        assert!(content.contains("Total points: 3"));
        assert!(content.contains("Upper outliers (> +2std): 0 (0.00%)"));
        assert!(content.contains("Lower outliers (< -2std): 0 (0.00%)"));
    }

    #[test]
    fn test_stats_report_is_deterministic() {
        let dir = temp_dir("report_det");
        let stats = classify_outliers(&[1.0, 5.0, 9.0], &[2.0, 5.0, 1.0]);
        let reports = vec![MetricReport {
            metric: EnergyMetric::Left,
            stats,
        }];

        let path = write_stats_report(&dir, "7", &reports).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        let path = write_stats_report(&dir, "7", &reports).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(first, second);
    }

    #[test]
    fn test_series_csv_labels_and_snp_column() {
        let dir = temp_dir("series");
        let series = MetricSeries {
            ref_values: vec![10.0, 10.0, 10.0, 10.0, 10.0, 70.0],
            alt_values: vec![10.0; 6],
            snp_values: vec![Some(45), None, None, None, None, Some(300)],
        };
        let stats = classify_outliers(&series.ref_values, &series.alt_values);

        let path = write_series_csv(&dir, "3", EnergyMetric::Left, &series, &stats).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "ref_energy,alt_energy,snp,classification");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with("45,normal"));
        // Unlabelled construct leaves the snp column empty
        assert!(lines[2].contains(",,normal"));
        assert!(lines[6].ends_with("300,upper"));
    }

    #[test]
    fn test_summary_json_counts() {
        let dir = temp_dir("summary");
        let mut acc = EnergyAccumulator::new();
        acc.total_constructs = 10;
        acc.snp_constructs = 4;
        acc.error_constructs = 1;

        let stats = classify_outliers(&[1.0, 2.0], &[1.0, 2.0]);
        let reports = vec![MetricReport {
            metric: EnergyMetric::Right,
            stats,
        }];

        let path = write_summary_json(&dir, "3", &acc, &reports, 2, 1).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["individual_id"], "3");
        assert_eq!(parsed["constructs"]["total"], 10);
        assert_eq!(parsed["constructs"]["without_snp"], 6);
        assert_eq!(parsed["files"]["processed_pairs"], 2);
        assert_eq!(parsed["metrics"]["EnergyRight"]["total_points"], 2);
    }
}
