use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use complexity_common::{Config, ScoringRule};
use complexity_evaluation::{plot, report, Evaluator};

#[derive(Debug, Default)]
pub struct EvaluateArgs {
    pub input: Option<PathBuf>,
    pub scoring: Option<ScoringRule>,
    /// `Some(None)` writes to the configured path.
    pub plot: Option<Option<PathBuf>>,
    pub latex: bool,
    pub json: bool,
}

/// Evaluate the predictions file and return the report to print.
pub fn run(config: &Config, args: EvaluateArgs) -> Result<String> {
    let settings = &config.evaluation;
    let input = args.input.unwrap_or_else(|| settings.input_path.clone());
    let rule = args.scoring.unwrap_or(settings.scoring);

    let file = File::open(&input)
        .with_context(|| format!("Failed to open predictions file {}", input.display()))?;
    let evaluation = Evaluator::new(rule)
        .evaluate_reader(BufReader::new(file))
        .with_context(|| format!("Failed to evaluate {}", input.display()))?;

    if let Some(path) = args.plot {
        let path = path.unwrap_or_else(|| settings.confusion_matrix_path.clone());
        plot::save_heatmap(&evaluation.matrix, &path)?;
    }

    if args.json {
        return Ok(report::render_json(&evaluation)? + "\n");
    }

    let mut out = report::render_text(&evaluation);
    if args.latex {
        out.push('\n');
        out.push_str(&report::render_latex_table(
            &evaluation.report,
            &settings.table_caption,
            &settings.table_label,
        ));
    }
    Ok(out)
}
