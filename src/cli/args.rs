// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// mitofrag - Fragility-energy outlier analyzer for simulated mtDNA variants
pub struct Args {
    /// path to base energies directory with per-individual subdirectories
    #[argh(option)]
    pub energies: Option<String>,

    /// directory containing per-individual SNP lists (test_individual_<N>.csv)
    #[argh(option)]
    pub snp_dir: Option<String>,

    /// output directory for reports and series exports
    #[argh(option)]
    pub output: Option<String>,

    /// shared reference tag, also the reference subdirectory name (default: SEQ-g38_Mt-Short_Test)
    #[argh(option, default = "String::from(\"SEQ-g38_Mt-Short_Test\")")]
    pub ref_tag: String,

    /// include only individuals whose id matches regex pattern
    #[argh(option)]
    pub include_individuals: Option<String>,

    /// exclude individuals whose id matches regex pattern
    #[argh(option)]
    pub exclude_individuals: Option<String>,

    /// write statistics only, skip per-point series exports
    #[argh(switch)]
    pub stats_only: bool,

    /// validate inputs and list discovered individuals without processing (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
