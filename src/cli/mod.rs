//! Command-line parsing for the exoplanet transit/RV curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/catalog code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "exo", version, about = "Exoplanet transit light curve & RV curve simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write logs as JSON lines to this file (the TUI logs nowhere otherwise).
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a planet in the archive and print its parameter set as JSON.
    Params(ParamsArgs),
    /// Simulate both curves, print a summary and plots, and optionally export.
    Curves(CurveArgs),
    /// Plot a previously exported payload JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same simulation pipeline as `exo curves`, but renders the
    /// two panels in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ParamsArgs {
    /// Planet name exactly as listed in the archive (e.g. "HD 209458 b").
    pub id: String,
}

#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Planet name to resolve. Prompted for when neither this nor --params is given.
    pub id: Option<String>,

    /// Read model inputs from a JSON object instead of the archive.
    #[arg(long, value_name = "JSON", conflicts_with = "id")]
    pub params: Option<PathBuf>,

    /// Seed for the observation noise (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows) per panel.
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the plot payload (inputs + both panels) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export the sampled curves to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

impl CurveArgs {
    pub fn show_plot(&self) -> bool {
        self.plot && !self.no_plot
    }
}

/// Options for plotting a saved payload.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Payload JSON file produced by `exo curves --export`.
    #[arg(long, value_name = "JSON")]
    pub payload: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows) per panel.
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    /// Planet to load on startup.
    pub id: Option<String>,

    /// Seed for the observation noise (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_flags_parse() {
        let cli = Cli::parse_from([
            "exo",
            "curves",
            "WASP-12 b",
            "--seed",
            "7",
            "--no-plot",
            "--export-csv",
            "out.csv",
        ]);
        let Command::Curves(args) = cli.command else {
            panic!("expected curves");
        };
        assert_eq!(args.id.as_deref(), Some("WASP-12 b"));
        assert_eq!(args.seed, Some(7));
        assert!(!args.show_plot());
        assert_eq!(args.export_csv, Some(PathBuf::from("out.csv")));
        assert_eq!(args.width, 100);
    }

    #[test]
    fn params_file_conflicts_with_id() {
        let res = Cli::try_parse_from(["exo", "curves", "X b", "--params", "p.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn log_file_is_global() {
        let cli = Cli::parse_from(["exo", "tui", "--log-file", "exo.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("exo.log")));
        assert!(matches!(cli.command, Command::Tui(_)));
    }
}
