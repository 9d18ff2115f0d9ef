//! Common types and utilities shared across all crates

pub mod config;
pub mod error;
pub mod logging;
pub mod records;
pub mod types;

pub use config::*;
pub use error::{EvalError, Result};
pub use logging::init_tracing;
pub use records::{SampleReader, SampleWriter};
pub use types::*;
