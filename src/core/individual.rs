// individual.rs - Per-individual pipeline orchestration

use crate::core::aggregate::EnergyAccumulator;
use crate::core::construct::ConstructIdParser;
use crate::core::outliers::{classify_outliers, OutlierStats};
use crate::data::energy::{EnergyMetric, EnergyTable};
use crate::data::snp::SnpSet;
use crate::output;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Entry contract for one simulated individual
///
/// The caller resolves discovery (directory scanning, SNP file layout); the
/// orchestrator only consumes the resolved triple.
#[derive(Debug, Clone)]
pub struct IndividualJob {
    pub alt_dir: PathBuf,
    pub individual_id: String,
    pub snp_file: PathBuf,
}

/// Classification result for one energy metric
#[derive(Debug, Clone)]
pub struct MetricReport {
    pub metric: EnergyMetric,
    pub stats: OutlierStats,
}

/// Full analysis result for one individual
#[derive(Debug, Clone)]
pub struct IndividualOutcome {
    pub accumulator: EnergyAccumulator,
    pub reports: Vec<MetricReport>,
    pub processed_pairs: usize,
    pub skipped_pairs: usize,
}

/// Alt energy files of one individual, in sorted order
///
/// Sorting keeps series exports byte-identical across reruns; the aggregated
/// statistics are order-independent either way.
fn list_alt_files(alt_dir: &Path) -> Result<Vec<String>, String> {
    let entries = std::fs::read_dir(alt_dir)
        .map_err(|e| format!("Failed to read alt directory '{}': {}", alt_dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with("EF.csv") {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Derive the reference counterpart of an alt energy file name
///
/// The per-individual tag segment is substituted with the shared reference
/// tag: `<ref_tag>-test_individual_<id>` becomes `<ref_tag>`.
pub fn reference_file_name(alt_file: &str, ref_tag: &str, individual_id: &str) -> String {
    let alt_tag = format!("{}-test_individual_{}", ref_tag, individual_id);
    alt_file.replace(&alt_tag, ref_tag)
}

/// Run the full pipeline for one individual without writing artifacts
///
/// File-level failures (missing reference counterpart, unreadable or empty
/// table) are logged and skipped; construct-level decode failures are counted
/// by the accumulator. Nothing here aborts the individual.
pub fn analyze_individual(
    job: &IndividualJob,
    ref_dir: &Path,
    ref_tag: &str,
) -> Result<IndividualOutcome, String> {
    println!("🧪 Processing individual {}", job.individual_id);
    println!("   📂 Alt directory: {}", job.alt_dir.display());
    println!("   📂 SNP file: {}", job.snp_file.display());

    let snps = if job.snp_file.exists() {
        match SnpSet::from_file(&job.snp_file) {
            Ok(snps) => snps,
            Err(e) => {
                eprintln!("⚠️  {}. All constructs will be unlabelled.", e);
                SnpSet::empty()
            }
        }
    } else {
        eprintln!(
            "⚠️  SNP file not found: {}. All constructs will be unlabelled.",
            job.snp_file.display()
        );
        SnpSet::empty()
    };

    let alt_files = list_alt_files(&job.alt_dir)?;
    let parser = ConstructIdParser::new();
    let mut accumulator = EnergyAccumulator::new();
    let mut processed_pairs = 0;
    let mut skipped_pairs = 0;

    let pb = ProgressBar::new(alt_files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap(),
    );

    for alt_file in &alt_files {
        pb.set_message(alt_file.clone());

        let ref_file = reference_file_name(alt_file, ref_tag, &job.individual_id);
        let ref_path = ref_dir.join(&ref_file);
        let alt_path = job.alt_dir.join(alt_file);

        if !ref_path.exists() {
            eprintln!("⚠️  Reference file not found: {}", ref_path.display());
            skipped_pairs += 1;
            pb.inc(1);
            continue;
        }

        let ref_table = match EnergyTable::from_csv(&ref_path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("⚠️  {}", e);
                skipped_pairs += 1;
                pb.inc(1);
                continue;
            }
        };
        let alt_table = match EnergyTable::from_csv(&alt_path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("⚠️  {}", e);
                skipped_pairs += 1;
                pb.inc(1);
                continue;
            }
        };

        if ref_table.is_empty() || alt_table.is_empty() {
            eprintln!("⚠️  Empty energy table in pair: {}", alt_file);
            skipped_pairs += 1;
            pb.inc(1);
            continue;
        }

        let assignments = accumulator.resolve_assignments(&alt_table, &snps, &parser);
        let mismatches = accumulator.ingest_pair(&ref_table, &alt_table, &assignments);
        if mismatches > 0 {
            eprintln!(
                "⚠️  {} alt rows without a reference counterpart in {}",
                mismatches, alt_file
            );
        }

        processed_pairs += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    log_construct_statistics(&accumulator);

    let mut reports = Vec::new();
    for metric in EnergyMetric::ALL {
        let series = accumulator.series(metric);
        if series.is_empty() {
            eprintln!("⚠️  No data for {}", metric.column_name());
            continue;
        }
        let stats = classify_outliers(&series.ref_values, &series.alt_values);
        println!("📐 {}:", metric.column_name());
        println!(
            "   Mean difference: {:.2}, standard deviation: {:.2}",
            stats.mean_diff, stats.std_diff
        );
        println!(
            "   Upper outliers (> +2std): {} points",
            stats.upper_count()
        );
        println!(
            "   Lower outliers (< -2std): {} points",
            stats.lower_count()
        );
        reports.push(MetricReport { metric, stats });
    }

    Ok(IndividualOutcome {
        accumulator,
        reports,
        processed_pairs,
        skipped_pairs,
    })
}

fn log_construct_statistics(accumulator: &EnergyAccumulator) {
    println!(
        "🔢 Constructs processed: {}",
        accumulator.total_constructs
    );
    println!("   With SNP: {}", accumulator.snp_constructs);
    println!(
        "   Without SNP: {}",
        accumulator
            .total_constructs
            .saturating_sub(accumulator.snp_constructs)
    );
    println!("   Decode errors: {}", accumulator.error_constructs);

    let top = accumulator.top_snps(10);
    if !top.is_empty() {
        println!("🏷️  Top {} most frequent SNPs:", top.len());
        for (snp, count) in top {
            println!("   SNP {}: {} constructs", snp, count);
        }
    }
}

/// Run one individual end-to-end and write its artifacts
///
/// Returns Ok(false) when the individual had no successfully processed file
/// pair; a warning is emitted and no report files are written.
pub fn process_individual(
    job: &IndividualJob,
    ref_dir: &Path,
    ref_tag: &str,
    output_dir: &Path,
    write_series: bool,
) -> Result<bool, String> {
    let outcome = analyze_individual(job, ref_dir, ref_tag)?;

    if outcome.processed_pairs == 0 {
        eprintln!(
            "⚠️  Individual {}: no file pairs could be processed, skipping report",
            job.individual_id
        );
        return Ok(false);
    }

    output::write_stats_report(output_dir, &job.individual_id, &outcome.reports)?;
    output::write_summary_json(
        output_dir,
        &job.individual_id,
        &outcome.accumulator,
        &outcome.reports,
        outcome.processed_pairs,
        outcome.skipped_pairs,
    )?;

    if write_series {
        for report in &outcome.reports {
            let series = outcome.accumulator.series(report.metric);
            output::write_series_csv(
                output_dir,
                &job.individual_id,
                report.metric,
                series,
                &report.stats,
            )?;
        }
    }

    Ok(true)
}
