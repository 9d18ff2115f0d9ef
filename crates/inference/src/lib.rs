//! Zero-shot complexity classification against a local Ollama model

pub mod client;
pub mod driver;
pub mod prompt;

pub use client::{OllamaClient, TextGenerator};
pub use driver::{InferenceDriver, InferenceSummary};
pub use prompt::PromptTemplate;
