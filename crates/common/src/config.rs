use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{EvalError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint.
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_dataset_path")]
    pub input_path: PathBuf,
    #[serde(default = "default_predictions_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    /// Overrides the built-in prompt. Must contain `{code}`.
    #[serde(default)]
    pub prompt_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default = "default_predictions_path")]
    pub input_path: PathBuf,
    #[serde(default = "default_confusion_matrix_path")]
    pub confusion_matrix_path: PathBuf,
    #[serde(default)]
    pub scoring: ScoringRule,
    #[serde(default = "default_table_caption")]
    pub table_caption: String,
    #[serde(default = "default_table_label")]
    pub table_label: String,
}

/// Which (truth, prediction) pairs count towards the metrics.
///
/// One rule applies to every metric of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// Every pair is scored; unrecognised labels land in "other complexity".
    #[default]
    ClosedSet,
    /// Only pairs whose normalized prediction reads `O(...)` are scored.
    NotationPrefix,
}

impl ScoringRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::ClosedSet => "closed-set",
            ScoringRule::NotationPrefix => "notation-prefix",
        }
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "closed-set" => Ok(ScoringRule::ClosedSet),
            "notation-prefix" => Ok(ScoringRule::NotationPrefix),
            other => Err(format!(
                "unknown scoring rule `{other}` (expected `closed-set` or `notation-prefix`)"
            )),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "codellama".to_string()
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("Dataset/data.jsonl")
}

fn default_predictions_path() -> PathBuf {
    PathBuf::from("./llm_predictions.jsonl")
}

fn default_max_samples() -> usize {
    1000
}

fn default_confusion_matrix_path() -> PathBuf {
    PathBuf::from("llm_confusion_matrix.png")
}

fn default_table_caption() -> String {
    "LLM (CodeLlama) zero-shot classification results on the test subset".to_string()
}

fn default_table_label() -> String {
    "tab:llm_results".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_model(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            input_path: default_dataset_path(),
            output_path: default_predictions_path(),
            max_samples: default_max_samples(),
            prompt_template: None,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            input_path: default_predictions_path(),
            confusion_matrix_path: default_confusion_matrix_path(),
            scoring: ScoringRule::default(),
            table_caption: default_table_caption(),
            table_label: default_table_label(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            inference: InferenceConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ollama.url.trim().is_empty() {
            return Err(EvalError::Config("ollama.url must not be empty".to_string()));
        }
        if self.ollama.model.trim().is_empty() {
            return Err(EvalError::Config("ollama.model must not be empty".to_string()));
        }
        if let Some(template) = &self.inference.prompt_template {
            if !template.contains("{code}") {
                return Err(EvalError::Config(
                    "inference.prompt_template must contain a {code} placeholder".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
