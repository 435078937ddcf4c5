// mod.rs - Core logic module

pub mod aggregate;
pub mod construct;
pub mod individual;
pub mod outliers;
pub mod overlap;

// Re-export main types for convenience
pub use aggregate::{EnergyAccumulator, MetricSeries};
pub use construct::{ConstructIdParser, ConstructParams};
pub use individual::{analyze_individual, process_individual, IndividualJob, IndividualOutcome, MetricReport};
pub use outliers::{classify_outliers, OutlierStats};
pub use overlap::{representative_snp, resolve_construct_snps, snps_in_arms};
