//! Label normalization, scoring and reporting for complexity predictions

pub mod labels;
pub mod metrics;
pub mod plot;
pub mod report;
pub mod scoring;

pub use labels::{normalize_label, normalize_value};
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use scoring::{Accumulator, Evaluation, Evaluator};
