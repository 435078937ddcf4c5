// snp.rs - SNP position lists and SNV substitution tables

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Known SNP positions for one individual (1-based coordinates)
///
/// Stored sorted so resolution and reporting are deterministic regardless of
/// input ordering.
#[derive(Debug, Clone, Default)]
pub struct SnpSet {
    positions: BTreeSet<i64>,
}

impl SnpSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_positions<I: IntoIterator<Item = i64>>(positions: I) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Load SNP positions from a plain text file
    ///
    /// One record per line, comma-separated, first field is the integer
    /// position. Malformed lines (including a possible header) are skipped
    /// with a warning, not fatal.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read SNP file '{}': {}", path.display(), e))?;

        let mut positions = BTreeSet::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let first_field = trimmed.split(',').next().unwrap_or("");
            match first_field.trim().parse::<i64>() {
                Ok(position) => {
                    positions.insert(position);
                }
                Err(_) => {
                    eprintln!("⚠️  Skipping malformed SNP line: {}", trimmed);
                }
            }
        }

        println!(
            "📋 Loaded {} SNP positions from '{}'",
            positions.len(),
            path.display()
        );
        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: i64) -> bool {
        self.positions.contains(&position)
    }

    /// Positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.positions.iter()
    }
}

/// One SNV substitution record for the builder binary
#[derive(Debug, Clone, Deserialize)]
pub struct SnvRecord {
    pub position: i64,
    pub ref_allele: String,
    pub alt_allele: String,
}

/// SNV table loaded from a `position,ref_allele,alt_allele` CSV
#[derive(Debug, Clone)]
pub struct SnvTable {
    pub records: Vec<SnvRecord>,
}

impl SnvTable {
    pub fn from_csv(path: &Path) -> Result<Self, String> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| format!("Failed to open SNV table '{}': {}", path.display(), e))?;

        let mut records = Vec::new();
        for (row_num, result) in reader.deserialize::<SnvRecord>().enumerate() {
            let record = result.map_err(|e| {
                format!(
                    "Invalid SNV record at line {} of '{}': {}",
                    row_num + 2,
                    path.display(),
                    e
                )
            })?;
            records.push(record);
        }

        println!(
            "📋 Loaded {} SNV records from '{}'",
            records.len(),
            path.display()
        );
        Ok(Self { records })
    }
}
