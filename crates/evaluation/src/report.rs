//! Plain-text and LaTeX renderings of an [`Evaluation`].
//!
//! Each block is a `Display` type; the `render_*` functions collect them
//! into strings.

use std::fmt;

use complexity_common::{ComplexityClass, Result};
use strum::IntoEnumIterator;

use crate::metrics::{AverageMetrics, ClassificationReport, ConfusionMatrix};
use crate::scoring::Evaluation;

const NAME_WIDTH: usize = 16;

pub fn render_accuracy(evaluation: &Evaluation) -> String {
    format!("Accuracy: {:.4}", evaluation.accuracy)
}

/// Counts table, true classes down the side, predicted classes across.
pub fn render_confusion_matrix(cm: &ConfusionMatrix) -> String {
    MatrixTable(cm).to_string()
}

/// Per-class precision/recall/F1/support with macro and weighted averages.
pub fn render_classification_report(report: &ClassificationReport) -> String {
    ReportTable(report).to_string()
}

/// LaTeX `table` block with one row per class, two decimals.
pub fn render_latex_table(report: &ClassificationReport, caption: &str, label: &str) -> String {
    LatexTable {
        report,
        caption,
        label,
    }
    .to_string()
}

/// Accuracy, scoring summary, matrix and per-class report in one block.
pub fn render_text(evaluation: &Evaluation) -> String {
    TextReport(evaluation).to_string()
}

pub fn render_json(evaluation: &Evaluation) -> Result<String> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}

struct MatrixTable<'a>(&'a ConfusionMatrix);

impl fmt::Display for MatrixTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cm = self.0;
        let row_header = ComplexityClass::iter()
            .map(|c| c.label().len())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = ComplexityClass::iter()
            .map(|c| c.label().len().max(cm.column_max(c).to_string().len()))
            .collect();

        write!(f, "{:row_header$}", "")?;
        for (class, &width) in ComplexityClass::iter().zip(&widths) {
            write!(f, "  {:>width$}", class.label())?;
        }
        writeln!(f)?;

        for (truth, row) in ComplexityClass::iter().zip(cm.rows()) {
            write!(f, "{:<row_header$}", truth.label())?;
            for (count, &width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct ReportTable<'a>(&'a ClassificationReport);

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>NAME_WIDTH$}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for m in &self.0.per_class {
            writeln!(
                f,
                "{:>NAME_WIDTH$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                m.class.label(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        average_row(f, "macro avg", &self.0.macro_avg)?;
        average_row(f, "weighted avg", &self.0.weighted_avg)
    }
}

fn average_row(f: &mut fmt::Formatter<'_>, name: &str, avg: &AverageMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>NAME_WIDTH$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
        name, avg.precision, avg.recall, avg.f1, avg.support
    )
}

struct LatexTable<'a> {
    report: &'a ClassificationReport,
    caption: &'a str,
    label: &'a str,
}

impl fmt::Display for LatexTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("% ---------- TABLE ----------\n")?;
        f.write_str("\\begin{table}[H]\n\\centering\n\\small\n")?;
        f.write_str("\\begin{tabular}{|l|c|c|c|}\n\\hline\n")?;
        f.write_str(
            "\\textbf{Class} & \\textbf{Precision} & \\textbf{Recall} & \\textbf{F1-score} \\\\\n",
        )?;
        f.write_str("\\hline\n")?;
        for m in &self.report.per_class {
            writeln!(
                f,
                "{} & {:.2} & {:.2} & {:.2} \\\\",
                latex_class(m.class),
                m.precision,
                m.recall,
                m.f1
            )?;
        }
        f.write_str("\\hline\n\\end{tabular}\n")?;
        writeln!(f, "\\caption{{{}}}", self.caption)?;
        writeln!(f, "\\label{{{}}}", self.label)?;
        f.write_str("\\end{table}\n")
    }
}

fn latex_class(class: ComplexityClass) -> &'static str {
    match class {
        ComplexityClass::Constant => "$O(1)$",
        ComplexityClass::Logarithmic => "$O(\\log n)$",
        ComplexityClass::Linear => "$O(n)$",
        ComplexityClass::Linearithmic => "$O(n \\log n)$",
        ComplexityClass::Quadratic => "$O(n^2)$",
        ComplexityClass::Cubic => "$O(n^3)$",
        ComplexityClass::Other => "other complexity",
    }
}

struct TextReport<'a>(&'a Evaluation);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let evaluation = self.0;
        writeln!(f, "{}", render_accuracy(evaluation))?;
        writeln!(
            f,
            "Scored {} of {} records (rule: {}, skipped: {})",
            evaluation.scored, evaluation.records, evaluation.rule, evaluation.skipped
        )?;
        writeln!(f)?;
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "{}", MatrixTable(&evaluation.matrix))?;
        writeln!(f)?;
        write!(f, "{}", ReportTable(&evaluation.report))
    }
}
