//! Export sampled curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per sample, both panels stacked and tagged by `panel`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CurveResult, PlotPayload};
use crate::error::AppError;

/// Write both curves of a payload to a CSV file.
pub fn write_curves_csv(path: &Path, payload: &PlotPayload) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    write_curves(&mut file, payload)
        .map_err(|e| AppError::input(format!("Failed to write export CSV: {e}")))?;

    tracing::info!(path = %path.display(), "wrote curve CSV");
    Ok(())
}

fn write_curves<W: Write>(out: &mut W, payload: &PlotPayload) -> std::io::Result<()> {
    writeln!(out, "panel,index,time,model,observed")?;
    write_rows(out, "transit", &payload.transit.curve)?;
    write_rows(out, "rv", &payload.rv.curve)?;
    Ok(())
}

fn write_rows<W: Write>(out: &mut W, panel: &str, curve: &CurveResult) -> std::io::Result<()> {
    for (i, ((t, m), o)) in curve
        .times
        .iter()
        .zip(&curve.model)
        .zip(&curve.observed)
        .enumerate()
    {
        writeln!(out, "{panel},{i},{t:.10},{m:.10},{o:.10}")?;
    }
    Ok(())
}
