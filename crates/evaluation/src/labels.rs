//! Free-text complexity labels to [`ComplexityClass`].
//!
//! Normalization is a fixed pipeline: strip, drop spaces, apply
//! [`REWRITES`] in order, then one exact lookup in [`RAW_LABELS`].
//! The lookup is case-sensitive, so `O(N^2)` is not `O(n^2)`.

use complexity_common::ComplexityClass;
use serde_json::Value;

/// Ordered `(pattern, replacement)` substring rewrites, applied after spaces
/// have been removed.
pub const REWRITES: &[(&str, &str)] = &[
    ("O(n²)", "O(n^2)"),
    ("O(n³)", "O(n^3)"),
    ("O(nlog(n))", "O(nlogn)"),
    ("O(n^2.)", "O(n^2)"),
    ("O(n^3.)", "O(n^3)"),
];

/// Raw spellings that are recognised after rewriting.
pub const RAW_LABELS: &[(&str, ComplexityClass)] = &[
    ("O(1)", ComplexityClass::Constant),
    ("O(logn)", ComplexityClass::Logarithmic),
    ("O(log n)", ComplexityClass::Logarithmic),
    ("O(n)", ComplexityClass::Linear),
    ("O(nlogn)", ComplexityClass::Linearithmic),
    ("O(nlog n)", ComplexityClass::Linearithmic),
    ("O(nlog(n))", ComplexityClass::Linearithmic),
    ("O(n^2)", ComplexityClass::Quadratic),
    ("O(n^3)", ComplexityClass::Cubic),
];

/// Normalize any JSON value. Only strings can map to a standard class.
pub fn normalize_value(value: Option<&Value>) -> ComplexityClass {
    match value {
        Some(Value::String(s)) => normalize_label(s),
        _ => ComplexityClass::Other,
    }
}

/// Normalize one textual label. Total: never fails.
pub fn normalize_label(raw: &str) -> ComplexityClass {
    lookup(&clean(raw))
}

/// The cleaned spelling used for the table lookup.
pub fn clean(raw: &str) -> String {
    let mut s = raw.trim().replace(' ', "");
    for (pattern, replacement) in REWRITES {
        if s.contains(pattern) {
            s = s.replace(pattern, replacement);
        }
    }
    s
}

/// Exact lookup; anything unknown is [`ComplexityClass::Other`].
pub fn lookup(cleaned: &str) -> ComplexityClass {
    RAW_LABELS
        .iter()
        .find(|(raw, _)| *raw == cleaned)
        .map(|(_, class)| *class)
        .unwrap_or(ComplexityClass::Other)
}
