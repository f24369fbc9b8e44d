//! Planetary-system catalog abstraction.
//!
//! A catalog answers one question: "which records have exactly this planet
//! name?". Records are flat JSON objects keyed by column name. Cells may carry
//! a number in several shapes:
//!
//! - a quantity with metadata: `{"value": 3.52, "unit": "day"}`
//! - a plain number: `3.52`
//! - numeric text: `"3.52"`
//! - `null` for a missing measurement (read as NaN)
//!
//! `extract_scalar` tries these representations in that fixed order.

use serde_json::{Map, Value};

/// One catalog row, keyed by column name.
pub type CatalogRecord = Map<String, Value>;

/// Why a catalog lookup failed as a whole.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(String),
    #[error("catalog request failed with status {0}")]
    Status(u16),
    #[error("failed to parse catalog response: {0}")]
    Parse(String),
}

/// Exact-match lookup of composite planetary-system records.
pub trait Catalog {
    /// All records whose planet name equals `name` (case- and format-sensitive).
    fn lookup(&self, name: &str) -> Result<Vec<CatalogRecord>, CatalogError>;
}

type ScalarAccessor = fn(&Value) -> Option<f64>;

/// Cell representations, in the order they are tried.
const SCALAR_ACCESSORS: [ScalarAccessor; 3] = [quantity_value, plain_value, text_value];

/// Read a catalog cell as a float.
///
/// Returns `None` when no representation applies (booleans, arrays, text that
/// is not a number, quantities without a usable `value`). `null` yields NaN.
pub fn extract_scalar(cell: &Value) -> Option<f64> {
    if cell.is_null() {
        return Some(f64::NAN);
    }
    SCALAR_ACCESSORS.iter().find_map(|access| access(cell))
}

fn quantity_value(cell: &Value) -> Option<f64> {
    let inner = cell.as_object()?.get("value")?;
    if inner.is_null() {
        return Some(f64::NAN);
    }
    plain_value(inner).or_else(|| text_value(inner))
}

fn plain_value(cell: &Value) -> Option<f64> {
    cell.as_f64()
}

fn text_value(cell: &Value) -> Option<f64> {
    cell.as_str()?.trim().parse::<f64>().ok()
}
