// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub energies: Option<String>,
    pub snp_dir: Option<String>,
    pub output: Option<String>,

    // Core settings
    pub ref_tag: Option<String>,

    // Individual filtering
    pub include_individuals: Option<String>,
    pub exclude_individuals: Option<String>,

    // Flags
    pub stats_only: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# mitofrag.toml - Configuration file for mitofrag
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Base energies directory with per-individual subdirectories
energies = "/path/to/Energies"

# Directory containing per-individual SNP lists (test_individual_<N>.csv)
snp_dir = "/path/to/Sequences/Relative"

# Output directory for reports and series exports
output = "/path/to/output"

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Shared reference tag, also the reference subdirectory name
ref_tag = "SEQ-g38_Mt-Short_Test"

# =============================================================================
# INDIVIDUAL FILTERING
# =============================================================================

# Include only individuals whose id matches regex pattern
# include_individuals = "^[0-4]$"

# Exclude individuals whose id matches regex pattern
# exclude_individuals = "^9$"

# =============================================================================
# FLAGS
# =============================================================================

# Write statistics only, skip per-point series exports
stats_only = false

# Validate inputs and list discovered individuals without processing
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips() {
        let sample = Config::generate_sample();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config.energies.as_deref(), Some("/path/to/Energies"));
        assert_eq!(config.ref_tag.as_deref(), Some("SEQ-g38_Mt-Short_Test"));
        assert_eq!(config.stats_only, Some(false));
        // Commented-out filters stay unset
        assert!(config.include_individuals.is_none());
    }
}
