// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.energies.is_none() {
            self.energies = config.energies;
        }
        if self.snp_dir.is_none() {
            self.snp_dir = config.snp_dir;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.ref_tag == "SEQ-g38_Mt-Short_Test" && config.ref_tag.is_some() {
            self.ref_tag = config.ref_tag.unwrap();
        }

        // Individual filtering
        if self.include_individuals.is_none() {
            self.include_individuals = config.include_individuals;
        }
        if self.exclude_individuals.is_none() {
            self.exclude_individuals = config.exclude_individuals;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.stats_only && config.stats_only.unwrap_or(false) {
            self.stats_only = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
