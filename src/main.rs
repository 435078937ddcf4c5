// main.rs - CLI entry point

use mitofrag::cli::Config;
use mitofrag::core::IndividualJob;
use mitofrag::data::find_individual_dirs;
use mitofrag::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Validate required parameters
    let energies = args.energies.as_ref().ok_or("--energies is required")?;
    let snp_dir = args.snp_dir.as_ref().ok_or("--snp-dir is required")?;
    let output = args.output.as_ref().ok_or("--output is required")?;

    println!("🧬 mitofrag v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "🕒 Started: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let validation_result = validate_args(&args)?;

    let total_start = Instant::now();

    let base_dir = Path::new(energies);
    let ref_dir = base_dir.join(&args.ref_tag);
    if !ref_dir.is_dir() {
        return Err(format!(
            "Reference energies directory not found: {}",
            ref_dir.display()
        ));
    }
    println!("📂 Reference directory: {}", ref_dir.display());

    let output_dir = Path::new(output);
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory '{}': {}", output, e))?;

    // Discover individuals and apply filters
    let individuals: Vec<_> = find_individual_dirs(base_dir)?
        .into_iter()
        .filter(|ind| validation_result.accepts(&ind.individual_id))
        .collect();

    if individuals.is_empty() {
        eprintln!("⚠️  No individual directories found under: {}", energies);
        return Ok(());
    }
    println!("🔍 Found {} individual directories", individuals.len());

    if args.dry_run {
        for individual in &individuals {
            println!(
                "   Individual {}: {}",
                individual.individual_id,
                individual.path.display()
            );
        }
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    // Strictly sequential processing; one individual's failure never stops the run
    let mut reports_written = 0;
    let mut skipped_individuals = 0;

    for individual in &individuals {
        let snp_file = Path::new(snp_dir).join(format!(
            "test_individual_{}.csv",
            individual.individual_id
        ));
        if !snp_file.exists() {
            eprintln!("⚠️  SNP file not found: {}", snp_file.display());
            skipped_individuals += 1;
            continue;
        }

        let job = IndividualJob {
            alt_dir: individual.path.clone(),
            individual_id: individual.individual_id.clone(),
            snp_file,
        };

        match process_individual(&job, &ref_dir, &args.ref_tag, output_dir, !args.stats_only) {
            Ok(true) => reports_written += 1,
            Ok(false) => skipped_individuals += 1,
            Err(e) => {
                eprintln!(
                    "❌ ERROR processing individual {}: {}",
                    individual.individual_id, e
                );
                skipped_individuals += 1;
            }
        }
    }

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === MITOFRAG COMPLETED ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!(
        "📊 Individuals: {} reports written, {} skipped",
        reports_written, skipped_individuals
    );
    println!("📁 Output written to: {}", output_dir.display());

    Ok(())
}
