use std::path::PathBuf;

use clap::{Parser, Subcommand};
use complexity_common::ScoringRule;

#[derive(Parser, Debug)]
#[command(name = "complexity")]
#[command(about = "Classify Python time complexity with a local LLM and score the results")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the model for a complexity class for each dataset record
    Infer {
        /// Dataset JSONL (defaults to [inference].input_path)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Predictions JSONL to write (defaults to [inference].output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of records to classify
        #[arg(short = 'n', long)]
        max_samples: Option<usize>,

        /// Model name sent to the endpoint
        #[arg(long)]
        model: Option<String>,
    },

    /// Score predictions against ground truth and print the report
    Evaluate {
        /// Predictions JSONL (defaults to [evaluation].input_path)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Which pairs are scored
        #[arg(long)]
        scoring: Option<ScoringRule>,

        /// Write the confusion-matrix PNG, optionally to a given path
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        plot: Option<Option<PathBuf>>,

        /// Also print the per-class LaTeX table
        #[arg(long)]
        latex: bool,

        /// Print the evaluation as JSON instead of text
        #[arg(long, conflicts_with = "latex")]
        json: bool,
    },

    /// Print the canonical form of Python source files
    Canonicalize {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Compare two files instead; exits with status 1 when they differ
        #[arg(long)]
        check: bool,
    },

    /// Show the class each raw label normalizes to
    Normalize {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
