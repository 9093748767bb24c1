use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FigureKind {
    /// Network, phase trajectories, heat map and correlation values
    TimeCorr,
    /// Network, averaged correlation matrix and time-to-sync matrix
    CorrMatDcm,
    /// Every figure the input has data for
    All,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Run data (.json) produced by the simulation
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Which figure to render
    #[arg(long, value_enum, default_value_t = FigureKind::All)]
    pub figure: FigureKind,

    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Output directory (overrides config)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Create the output directory if missing (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub create_dir: Option<bool>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
