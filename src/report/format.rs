//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use serde_json::Value;

use crate::domain::{InputValues, PlotPayload};
use crate::report::CurveStats;

/// Displayed parameters, in order, with their units.
const PARAMETER_ROWS: [(&str, &str); 11] = [
    ("period", "d"),
    ("ecc", ""),
    ("omega", "deg"),
    ("aRs", ""),
    ("orbinc", "deg"),
    ("RpRs", ""),
    ("K", "km/s"),
    ("vsys", "km/s"),
    ("T14", "h"),
    ("yerr_lc", "flux"),
    ("yerr_rv", "m/s"),
];

/// Format the model inputs as a two-column table.
pub fn format_inputs(inputs: &InputValues) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Planet: {}\n",
        inputs.planet_name().unwrap_or("(unnamed)")
    ));
    out.push_str(format!("{:<8} {:>14} {:<5}", "param", "value", "unit").trim_end());
    out.push('\n');
    out.push_str(&format!("{:-<8} {:-<14} {:-<5}", "", "", ""));
    out.push('\n');

    for (key, unit) in PARAMETER_ROWS {
        let value = inputs.get(key).map(fmt_value).unwrap_or_else(|| "-".to_string());
        out.push_str(format!("{key:<8} {value:>14} {unit:<5}").trim_end());
        out.push('\n');
    }

    out
}

/// Format the headline numbers of a simulated plot.
pub fn format_run_summary(payload: &PlotPayload, stats: &CurveStats) -> String {
    let mut out = String::new();

    out.push_str("=== exo - transit & RV simulation ===\n");
    out.push_str(&format!(
        "Planet: {}\n",
        payload.planet_name.as_deref().unwrap_or("(unnamed)")
    ));
    out.push_str(&format!("Generated: {}\n", payload.generated.format("%Y-%m-%d %H:%M:%S UTC")));

    let transit = &payload.transit.curve;
    let rv = &payload.rv.curve;
    out.push_str(&format!(
        "Transit: n={} | t=[{:.3}, {:.3}] h | depth={:.5} | scatter={:.5}\n",
        transit.len(),
        transit.times.first().copied().unwrap_or(0.0),
        transit.times.last().copied().unwrap_or(0.0),
        stats.transit_depth,
        stats.transit_scatter,
    ));
    out.push_str(&format!(
        "RV:      n={} | t=[{:.3}, {:.3}] d | mean={:.4} km/s | K~{:.4} km/s | scatter={:.4}\n",
        rv.len(),
        rv.times.first().copied().unwrap_or(0.0),
        rv.times.last().copied().unwrap_or(0.0),
        stats.rv_mean,
        stats.rv_semi_amplitude,
        stats.rv_scatter,
    ));

    out
}

fn fmt_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) if v != 0.0 && (v.abs() < 1e-3 || v.abs() >= 1e6) => format!("{v:.4e}"),
            Some(v) => format!("{v:.6}"),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
