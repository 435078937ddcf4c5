// validation.rs - Input validation utilities

use crate::cli::args::Args;
use regex::Regex;

pub struct ValidationResult {
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
}

impl ValidationResult {
    /// Apply the individual filters to one individual id
    pub fn accepts(&self, individual_id: &str) -> bool {
        if let Some(include) = &self.include_regex {
            if !include.is_match(individual_id) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude_regex {
            if exclude.is_match(individual_id) {
                return false;
            }
        }
        true
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.ref_tag.trim().is_empty() {
        return Err("--ref-tag must not be empty".to_string());
    }

    // Compile regex patterns
    let include_regex = if let Some(pattern) = &args.include_individuals {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_individuals regex: {}", e))?)
    } else {
        None
    };

    let exclude_regex = if let Some(pattern) = &args.exclude_individuals {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_individuals regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        include_regex,
        exclude_regex,
    })
}
