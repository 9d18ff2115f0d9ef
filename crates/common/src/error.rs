use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed record on line {line}: {message}")]
    Record { line: usize, message: String },

    #[error("Record on line {line} has no `{field}` field")]
    MissingField { line: usize, field: &'static str },

    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
