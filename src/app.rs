//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - resolves planets through the archive
//! - simulates the transit and RV curves
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::picker::{self, Target};
use crate::cli::{Command, CurveArgs, ParamsArgs, PlotArgs, TuiArgs};
use crate::data::ArchiveClient;
use crate::error::AppError;
use crate::logging::{LogSink, init_logging};

pub mod pipeline;

pub use pipeline::Simulator;

/// Entry point for the `exo` binary.
pub fn run() -> Result<(), AppError> {
    // We want `exo` and `exo --seed 3` to behave like `exo tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let sink = match (&cli.command, cli.log_file.as_deref()) {
        (_, Some(path)) => LogSink::File(path),
        (Command::Tui(_), None) => LogSink::Off,
        (_, None) => LogSink::Stderr,
    };
    init_logging(sink)?;

    match cli.command {
        Command::Params(args) => handle_params(args),
        Command::Curves(args) => handle_curves(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_params(args: ParamsArgs) -> Result<(), AppError> {
    let simulator = Simulator::new(ArchiveClient::from_env()?);
    let params = simulator.resolve(&args.id);

    let json = serde_json::to_string_pretty(&params)
        .map_err(|e| AppError::runtime(format!("Failed to serialize parameters: {e}")))?;
    println!("{json}");
    Ok(())
}

fn handle_curves(args: CurveArgs) -> Result<(), AppError> {
    let target = match (&args.id, &args.params) {
        (Some(id), _) => Target::Identifier(id.clone()),
        (None, Some(path)) => Target::ParamsFile(path.clone()),
        (None, None) => picker::prompt_for_target()?,
    };

    let simulator = Simulator::new(ArchiveClient::from_env()?);
    let mut rng = make_rng(args.seed);
    let payload = match target {
        Target::Identifier(id) => simulator.resolve_and_plot(&id, &mut rng)?.1,
        Target::ParamsFile(path) => {
            let inputs = crate::io::read_inputs_json(&path)?;
            simulator.plot(&inputs, &mut rng)?
        }
    };
    let stats = crate::report::compute_stats(&payload);

    println!("{}", crate::report::format_inputs(&payload.inputs));
    println!("{}", crate::report::format_run_summary(&payload, &stats));

    if args.show_plot() {
        println!("{}", crate::plot::render_payload(&payload, args.width, args.height));
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_payload_json(path, &payload)?;
    }
    if let Some(path) = &args.export_csv {
        crate::io::write_curves_csv(path, &payload)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let payload = crate::io::read_payload_json(&args.payload)?;
    let stats = crate::report::compute_stats(&payload);

    println!("{}", crate::report::format_run_summary(&payload, &stats));
    println!("{}", crate::plot::render_payload(&payload, args.width, args.height));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let simulator = Simulator::new(ArchiveClient::from_env()?);
    crate::tui::run(simulator, args)
}

/// Seeded when asked, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Rewrite argv so `exo` defaults to `exo tui`.
///
/// Rules:
/// - `exo`                     -> `exo tui`
/// - `exo --seed 3 ...`        -> `exo tui --seed 3 ...`
/// - `exo --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "params" | "curves" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(argv(&["exo"])), argv(&["exo", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["exo", "--seed", "3"])),
            argv(&["exo", "tui", "--seed", "3"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["exo", "curves", "WASP-12 b"]),
            argv(&["exo", "params", "HD 209458 b"]),
            argv(&["exo", "--help"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn seeded_rngs_repeat() {
        use rand::Rng;
        let a: u64 = make_rng(Some(11)).r#gen();
        let b: u64 = make_rng(Some(11)).r#gen();
        assert_eq!(a, b);
    }
}
