use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum_macros::{EnumCount, EnumIter};

use crate::error::{EvalError, Result};

/// Field holding the code snippet.
pub const CODE_FIELD: &str = "code";
/// Ground-truth field names, in lookup order.
pub const GROUND_TRUTH_FIELDS: [&str; 2] = ["time_complexity", "complexity"];
/// Field added by the inference driver.
pub const PREDICTION_FIELD: &str = "llm_prediction";
/// Prediction recorded when the generation service call fails.
pub const ERROR_MARKER: &str = "ERROR";

/// Closed set of complexity classes the evaluator scores over.
///
/// Declaration order is the display order of every matrix and table:
/// the six standard classes, then the catch-all. Walk the axis with
/// `strum::IntoEnumIterator::iter`; `strum::EnumCount::COUNT` sizes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumCount,
)]
pub enum ComplexityClass {
    #[serde(rename = "O(1)")]
    Constant,
    #[serde(rename = "O(log n)")]
    Logarithmic,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n log n)")]
    Linearithmic,
    #[serde(rename = "O(n^2)")]
    Quadratic,
    #[serde(rename = "O(n^3)")]
    Cubic,
    #[serde(rename = "other complexity")]
    Other,
}

impl ComplexityClass {
    /// Display form, e.g. `O(n log n)`.
    pub const fn label(self) -> &'static str {
        match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Logarithmic => "O(log n)",
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Linearithmic => "O(n log n)",
            ComplexityClass::Quadratic => "O(n^2)",
            ComplexityClass::Cubic => "O(n^3)",
            ComplexityClass::Other => "other complexity",
        }
    }

    /// Position on the matrix axis.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_standard(self) -> bool {
        !matches!(self, ComplexityClass::Other)
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a JSONL dataset.
///
/// The record keeps every field it was read with, in input order,
/// so that writing it back only adds the prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    line: usize,
    fields: Map<String, Value>,
}

impl Sample {
    pub fn new(line: usize, fields: Map<String, Value>) -> Self {
        Self { line, fields }
    }

    /// Parse one JSONL line. Anything but a JSON object is a malformed record.
    pub fn from_json_line(line: usize, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| EvalError::Record {
            line,
            message: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Ok(Self { line, fields }),
            other => Err(EvalError::Record {
                line,
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Serialize back to a single line, non-ASCII left unescaped.
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// 1-based line number in the source stream.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The code snippet; missing or non-string is an error.
    pub fn code(&self) -> Result<&str> {
        self.fields
            .get(CODE_FIELD)
            .and_then(Value::as_str)
            .ok_or(EvalError::MissingField {
                line: self.line,
                field: CODE_FIELD,
            })
    }

    /// Raw ground-truth label: `time_complexity` when truthy, else `complexity`.
    pub fn ground_truth(&self) -> Option<&Value> {
        let [primary, fallback] = GROUND_TRUTH_FIELDS;
        match self.fields.get(primary) {
            Some(value) if is_truthy(value) => Some(value),
            _ => self.fields.get(fallback),
        }
    }

    pub fn prediction(&self) -> Option<&Value> {
        self.fields.get(PREDICTION_FIELD)
    }

    pub fn set_prediction(&mut self, prediction: impl Into<String>) {
        self.fields
            .insert(PREDICTION_FIELD.to_string(), Value::String(prediction.into()));
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
