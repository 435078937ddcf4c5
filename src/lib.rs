// lib.rs - mitofrag library root

//! # mitofrag - Fragility-energy outlier analyzer for simulated mtDNA variants
//!
//! This library analyzes simulated genomic fragility energy measurements for
//! mitochondrial DNA variants. It joins per-construct reference and
//! alternative energy tables, associates each construct with the known SNPs
//! its arms overlap, classifies reference-vs-alternative differences into
//! normal points and +-2 std outliers, and emits per-individual statistics
//! reports plus point series for an external renderer.
//!
//! ## Features
//!
//! - **Construct decoding**: fixed CGS/CEN/CON identifier encoding with
//!   first-class handling of unparseable ids
//! - **SNP overlap resolution**: inclusive interval membership over the four
//!   construct arms, minimum-position representative per construct
//! - **Positional aggregation**: ref/alt tables joined by row index with
//!   per-metric NaN exclusion
//! - **Outlier classification**: mean/population-std thresholding, strict
//!   comparisons, degenerate-statistics safe
//! - **Skip-and-continue**: construct-, file- and individual-level failures
//!   never abort a run
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use mitofrag::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! let job = IndividualJob {
//!     alt_dir: PathBuf::from("Energies/SEQ-g38_Mt-Short_Test-test_individual_3"),
//!     individual_id: "3".to_string(),
//!     snp_file: PathBuf::from("Sequences/Relative/test_individual_3.csv"),
//! };
//!
//! let wrote_report = process_individual(
//!     &job,
//!     Path::new("Energies/SEQ-g38_Mt-Short_Test"),
//!     "SEQ-g38_Mt-Short_Test",
//!     Path::new("output"),
//!     true, // write per-point series exports
//! )?;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{analyze_individual, process_individual};
    pub use crate::core::{classify_outliers, ConstructIdParser, ConstructParams, OutlierStats};
    pub use crate::core::{EnergyAccumulator, IndividualJob, IndividualOutcome, MetricReport};
    pub use crate::data::{find_individual_dirs, IndividualDir};
    pub use crate::data::{EnergyMetric, EnergyTable, SnpSet, SnvTable};
    pub use crate::output::{write_series_csv, write_stats_report, write_summary_json};
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{ConstructIdParser, EnergyAccumulator, IndividualJob, OutlierStats};
pub use crate::data::{EnergyMetric, EnergyTable, SnpSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "mitofrag v{} - Fragility-energy outlier analyzer for mtDNA variants",
        VERSION
    )
}
