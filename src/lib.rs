//! `exo-curves` library crate.
//!
//! The binary (`exo`) is a thin wrapper around this library so that:
//!
//! - the forward models and the catalog resolver are testable without a network
//!   or a terminal
//! - the CLI and the TUI share one "resolve and simulate" pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
