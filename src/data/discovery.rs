// discovery.rs - Individual directory discovery under the base energies directory

use regex::Regex;
use std::path::{Path, PathBuf};

/// One discovered individual: its alt-energies directory and numeric id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualDir {
    pub path: PathBuf,
    pub individual_id: String,
}

/// Scan a base directory for per-individual energy subdirectories
///
/// A candidate is any subdirectory whose name ends in a digit; the individual
/// id is extracted from the `test_individual_<N>` naming template. Candidates
/// that end in a digit but do not match the template are warned about and
/// skipped. Results are sorted by numeric id so processing order is stable.
pub fn find_individual_dirs(base_dir: &Path) -> Result<Vec<IndividualDir>, String> {
    let ends_in_digit = Regex::new(r"\d$").unwrap();
    let template = Regex::new(r"test_individual_(\d+)$").unwrap();

    let entries = std::fs::read_dir(base_dir)
        .map_err(|e| format!("Failed to read base directory '{}': {}", base_dir.display(), e))?;

    let mut individuals = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if !ends_in_digit.is_match(&name) {
            continue;
        }

        match template.captures(&name) {
            Some(captures) => {
                individuals.push(IndividualDir {
                    path: path.clone(),
                    individual_id: captures[1].to_string(),
                });
            }
            None => {
                eprintln!("⚠️  Could not extract individual id from directory name: {}", name);
            }
        }
    }

    individuals.sort_by_key(|ind| {
        (
            ind.individual_id.parse::<u64>().unwrap_or(u64::MAX),
            ind.individual_id.clone(),
        )
    });

    Ok(individuals)
}
