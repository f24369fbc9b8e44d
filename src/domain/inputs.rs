//! Loosely typed forward-model inputs.
//!
//! Plot requests carry a flat JSON object whose values may be numbers or numeric
//! strings (form fields). The forward models coerce the fields they need and
//! fail the whole curve when one is missing or not numeric.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ParameterSet;
use crate::models::ModelError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues(Map<String, Value>);

impl InputValues {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_json(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn from_parameter_set(params: &ParameterSet) -> Self {
        let mut values = Self::new();
        values.set_text("planet_name", &params.planet_name);
        values.set("period", params.period);
        values.set("ecc", params.ecc);
        values.set("omega", params.omega);
        values.set("aRs", params.a_rs);
        values.set("orbinc", params.orbinc);
        values.set("RpRs", params.rp_rs);
        values.set("K", params.k);
        values.set("vsys", params.vsys);
        values.set("T14", params.t14);
        values.set("yerr_lc", params.yerr_lc);
        values.set("yerr_rv", params.yerr_rv);
        values
    }

    /// Set a numeric field. Non-finite values are stored as `null`.
    pub fn set(&mut self, key: &str, value: f64) {
        let json = serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        self.0.insert(key.to_string(), json);
    }

    pub fn set_text(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read `key` as a finite float, accepting numbers and numeric strings.
    pub fn number(&self, key: &'static str) -> Result<f64, ModelError> {
        let raw = self.0.get(key).ok_or(ModelError::MissingField(key))?;
        let value = match raw {
            Value::Number(n) => n.as_f64().ok_or(ModelError::NotNumeric(key))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ModelError::NotNumeric(key))?,
            _ => return Err(ModelError::NotNumeric(key)),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::NotFinite(key))
        }
    }

    /// The planet name, if the inputs carry one.
    pub fn planet_name(&self) -> Option<&str> {
        self.0.get("planet_name").and_then(Value::as_str)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
