//! Read/write plot payload JSON files, and read model input files.
//!
//! The payload is the "portable" representation of one plot request:
//! - the inputs the curves were computed from
//! - both panels (titles, axis labels, sampled curves)
//! - a generation timestamp
//!
//! The schema is defined by `domain::PlotPayload`.

use std::fs::File;
use std::path::Path;

use crate::domain::{InputValues, PlotPayload};
use crate::error::AppError;

/// Write a payload JSON file.
pub fn write_payload_json(path: &Path, payload: &PlotPayload) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create payload JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, payload)
        .map_err(|e| AppError::input(format!("Failed to write payload JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote plot payload");
    Ok(())
}

/// Read a payload JSON file.
pub fn read_payload_json(path: &Path) -> Result<PlotPayload, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open payload JSON '{}': {e}", path.display())))?;
    let payload: PlotPayload =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid payload JSON: {e}")))?;
    Ok(payload)
}

/// Read model inputs from a JSON object (the shape `exo params` prints).
pub fn read_inputs_json(path: &Path) -> Result<InputValues, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open parameter JSON '{}': {e}", path.display())))?;
    let value: serde_json::Value =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid parameter JSON: {e}")))?;
    Ok(InputValues::from_json(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{CurveResult, InputValues, Panel};

    #[test]
    fn payload_survives_a_file_round_trip() {
        let mut inputs = InputValues::new();
        inputs.set_text("planet_name", "Kepler-7 b");
        inputs.set("period", 4.885);

        let curve = CurveResult {
            times: vec![-1.0, 0.0, 1.0],
            model: vec![1.0, 0.99, 1.0],
            observed: vec![1.001, 0.989, 0.998],
        };
        let payload = PlotPayload {
            tool: "exo".to_string(),
            generated: Utc::now(),
            planet_name: Some("Kepler-7 b".to_string()),
            inputs,
            transit: Panel::transit(curve.clone()),
            rv: Panel::rv(curve),
        };

        let path = std::env::temp_dir().join(format!("exo_payload_{}.json", std::process::id()));
        write_payload_json(&path, &payload).unwrap();
        let back = read_payload_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back, payload);
    }

    #[test]
    fn parameter_file_must_hold_an_object() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("exo_inputs_ok_{}.json", std::process::id()));
        let bad = dir.join(format!("exo_inputs_bad_{}.json", std::process::id()));
        std::fs::write(&good, r#"{"planet_name": "X b", "period": "3.5", "ecc": 0}"#).unwrap();
        std::fs::write(&bad, "[1, 2, 3]").unwrap();

        let inputs = read_inputs_json(&good).unwrap();
        let err = read_inputs_json(&bad).unwrap_err();
        let _ = std::fs::remove_file(&good);
        let _ = std::fs::remove_file(&bad);

        assert_eq!(inputs.planet_name(), Some("X b"));
        assert_eq!(inputs.number("period").unwrap(), 3.5);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_payload_json(Path::new("/nonexistent/exo/payload.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
