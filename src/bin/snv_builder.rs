// snv_builder.rs - Seeded SNV injection into a reference mitochondrial sequence

use argh::FromArgs;
use bio::io::fasta;
use mitofrag::core::ConstructIdParser;
use mitofrag::data::{EnergyTable, SnvRecord, SnvTable};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(FromArgs)]
/// snv-builder - Apply randomly selected construct-covered SNVs to a reference FASTA
struct BuilderArgs {
    /// SNV table CSV with position,ref_allele,alt_allele columns
    #[argh(option)]
    snv_table: String,

    /// reference FASTA file (single record)
    #[argh(option)]
    fasta: String,

    /// directory with reference construct energy files (-EF.csv)
    #[argh(option)]
    constructs: String,

    /// output FASTA path for the mutated sequence
    #[argh(option)]
    output: String,

    /// mutation log CSV path
    #[argh(option)]
    log: String,

    /// number of distinct SNV positions to apply (default: 2)
    #[argh(option, default = "2")]
    count: usize,

    /// RNG seed for reproducible position selection (default: 42)
    #[argh(option, default = "42")]
    seed: u64,

    /// record id for the output sequence (default: custom_mtDNA)
    #[argh(option, default = "String::from(\"custom_mtDNA\")")]
    record_id: String,
}

struct MutationLogEntry {
    position: i64,
    original_base: Option<char>,
    ref_allele: String,
    alt_allele: String,
    status: &'static str,
    notes: String,
}

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let args: BuilderArgs = argh::from_env();

    println!("🧬 snv-builder v{}", env!("CARGO_PKG_VERSION"));
    println!("🎲 Seed: {}, SNVs to apply: {}", args.seed, args.count);

    let snv_table = SnvTable::from_csv(Path::new(&args.snv_table))?;
    let covered = covered_positions(Path::new(&args.constructs))?;

    // Only SNVs whose position is covered by at least one construct arm can
    // ever show up in the downstream energy comparison
    let covered_snvs: Vec<&SnvRecord> = snv_table
        .records
        .iter()
        .filter(|snv| covered.contains(&snv.position))
        .collect();
    println!(
        "✅ {} of {} SNVs are covered by reference constructs",
        covered_snvs.len(),
        snv_table.records.len()
    );

    let unique_positions: Vec<i64> = covered_snvs
        .iter()
        .map(|snv| snv.position)
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut selected: Vec<i64> = if unique_positions.len() >= args.count {
        unique_positions
            .choose_multiple(&mut rng, args.count)
            .copied()
            .collect()
    } else {
        eprintln!(
            "⚠️  Only {} covered positions available, applying all of them",
            unique_positions.len()
        );
        unique_positions
    };
    selected.sort();
    println!("🎯 Selected positions: {:?}", selected);

    // Load the reference sequence
    let fasta_file = File::open(&args.fasta)
        .map_err(|e| format!("Failed to open FASTA file '{}': {}", args.fasta, e))?;
    let reader = fasta::Reader::new(BufReader::new(fasta_file));
    let record = reader
        .records()
        .next()
        .ok_or_else(|| format!("FASTA file '{}' contains no records", args.fasta))?
        .map_err(|e| format!("Invalid FASTA record in '{}': {}", args.fasta, e))?;

    let mut sequence: Vec<u8> = record.seq().to_ascii_uppercase();
    println!(
        "📖 Loaded reference sequence '{}' ({} bp)",
        record.id(),
        sequence.len()
    );

    let (applied_count, log_entries) =
        apply_snvs(&mut sequence, &covered_snvs, &selected);

    write_mutation_log(Path::new(&args.log), &log_entries)?;

    // Write the mutated sequence
    let output_file = File::create(&args.output)
        .map_err(|e| format!("Failed to create output FASTA '{}': {}", args.output, e))?;
    let mut writer = fasta::Writer::new(output_file);
    let description = format!(
        "Modified from {} | Applied {} of {} selected SNVs",
        record.id(),
        applied_count,
        selected.len()
    );
    writer
        .write(&args.record_id, Some(&description), &sequence)
        .map_err(|e| format!("Failed to write FASTA '{}': {}", args.output, e))?;

    println!("\n🎉 === SNV BUILDER COMPLETED ===");
    println!("📋 Covered SNVs: {}", covered_snvs.len());
    println!("🎯 Selected positions: {}", selected.len());
    println!("✅ Applied substitutions: {}", applied_count);
    println!("📁 Mutated sequence written to: {}", args.output);

    Ok(())
}

/// Collect every reference position covered by any construct arm
///
/// Scans the reference energy files, decodes each ConstructID and expands the
/// four arm intervals into a position set. Unreadable files and unparseable
/// identifiers are skipped with a warning.
fn covered_positions(constructs_dir: &Path) -> Result<BTreeSet<i64>, String> {
    if !constructs_dir.is_dir() {
        return Err(format!(
            "Constructs directory not found: {}",
            constructs_dir.display()
        ));
    }

    let entries = std::fs::read_dir(constructs_dir)
        .map_err(|e| format!("Failed to read '{}': {}", constructs_dir.display(), e))?;

    let parser = ConstructIdParser::new();
    let mut covered = BTreeSet::new();
    let mut file_count = 0;
    let mut construct_count = 0;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !name.ends_with("-EF.csv") {
            continue;
        }
        file_count += 1;

        let table = match EnergyTable::from_csv(&path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("⚠️  {}", e);
                continue;
            }
        };

        for row in &table.rows {
            let params = match parser.parse(&row.construct_id) {
                Ok(params) => params,
                Err(_) => continue,
            };
            for (start, end) in params.arm_ranges() {
                // Reversed intervals from degenerate arm sizes cover nothing
                covered.extend(start..=end);
            }
            construct_count += 1;
        }
    }

    println!(
        "📂 Scanned {} construct files, {} constructs decoded",
        file_count, construct_count
    );
    if covered.is_empty() {
        eprintln!("⚠️  No covered positions found in reference constructs");
    } else {
        println!(
            "✅ {} positions covered (range {} to {})",
            covered.len(),
            covered.iter().next().unwrap(),
            covered.iter().next_back().unwrap()
        );
    }

    Ok(covered)
}

/// Apply the SNVs at the selected positions to the sequence in place
///
/// A substitution happens only when the current base matches the SNV's
/// reference allele; every attempt is logged as APPLIED or SKIPPED with a
/// note. Positions are 1-based.
fn apply_snvs(
    sequence: &mut [u8],
    covered_snvs: &[&SnvRecord],
    selected_positions: &[i64],
) -> (usize, Vec<MutationLogEntry>) {
    let mut applied_count = 0;
    let mut log_entries = Vec::new();

    for &position in selected_positions {
        let position_snvs: Vec<&SnvRecord> = covered_snvs
            .iter()
            .copied()
            .filter(|snv| snv.position == position)
            .collect();

        let idx = position - 1;
        if idx < 0 || idx as usize >= sequence.len() {
            log_entries.push(MutationLogEntry {
                position,
                original_base: None,
                ref_allele: join_ref_alleles(&position_snvs),
                alt_allele: join_alt_alleles(&position_snvs),
                status: "SKIPPED",
                notes: "Position out of sequence bounds".to_string(),
            });
            continue;
        }
        let idx = idx as usize;
        let current_base = sequence[idx] as char;

        let mut applied = false;
        for snv in &position_snvs {
            let ref_allele = snv.ref_allele.trim().to_ascii_uppercase();
            let alt_allele = snv.alt_allele.trim().to_ascii_uppercase();
            if ref_allele == alt_allele || alt_allele.is_empty() {
                continue;
            }
            if ref_allele == current_base.to_string() {
                sequence[idx] = alt_allele.as_bytes()[0];
                applied_count += 1;
                applied = true;
                log_entries.push(MutationLogEntry {
                    position,
                    original_base: Some(current_base),
                    ref_allele,
                    alt_allele,
                    status: "APPLIED",
                    notes: String::new(),
                });
                break;
            }
        }

        if !applied {
            let mut notes = Vec::new();
            for snv in &position_snvs {
                let alt_allele = snv.alt_allele.trim().to_ascii_uppercase();
                if alt_allele == current_base.to_string() {
                    notes.push("ALT allele already present".to_string());
                } else {
                    notes.push(format!(
                        "Expected ref: {}, found: {}",
                        snv.ref_allele.trim().to_ascii_uppercase(),
                        current_base
                    ));
                }
            }
            log_entries.push(MutationLogEntry {
                position,
                original_base: Some(current_base),
                ref_allele: join_ref_alleles(&position_snvs),
                alt_allele: join_alt_alleles(&position_snvs),
                status: "SKIPPED",
                notes: notes.join("; "),
            });
        }
    }

    (applied_count, log_entries)
}

fn join_ref_alleles(snvs: &[&SnvRecord]) -> String {
    snvs.iter()
        .map(|snv| snv.ref_allele.trim().to_ascii_uppercase())
        .collect::<Vec<String>>()
        .join("|")
}

fn join_alt_alleles(snvs: &[&SnvRecord]) -> String {
    snvs.iter()
        .map(|snv| snv.alt_allele.trim().to_ascii_uppercase())
        .collect::<Vec<String>>()
        .join("|")
}

fn write_mutation_log(path: &Path, entries: &[MutationLogEntry]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create mutation log '{}': {}", path.display(), e))?;

    writer
        .write_record([
            "position",
            "original_base",
            "ref_allele",
            "alt_allele",
            "status",
            "notes",
        ])
        .map_err(|e| format!("Write error: {}", e))?;

    for entry in entries {
        writer
            .write_record([
                entry.position.to_string(),
                entry
                    .original_base
                    .map(|b| b.to_string())
                    .unwrap_or_default(),
                entry.ref_allele.clone(),
                entry.alt_allele.clone(),
                entry.status.to_string(),
                entry.notes.clone(),
            ])
            .map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("📄 Mutation log written to: {}", path.display());
    Ok(())
}
