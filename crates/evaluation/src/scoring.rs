//! Pairs raw ground truth with raw predictions and aggregates the metrics.

use std::io::BufRead;

use complexity_common::{ComplexityClass, EvaluationConfig, Result, Sample, SampleReader, ScoringRule};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::labels::normalize_value;
use crate::metrics::{ClassificationReport, ConfusionMatrix};

/// Display prefix every standard class starts with.
pub const NOTATION_PREFIX: &str = "O(";

/// Result of one evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub rule: ScoringRule,
    /// Pairs seen, scored or not.
    pub records: usize,
    pub scored: usize,
    pub skipped: usize,
    pub accuracy: f64,
    pub matrix: ConfusionMatrix,
    pub report: ClassificationReport,
}

#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    rule: ScoringRule,
}

impl Evaluator {
    pub fn new(rule: ScoringRule) -> Self {
        Self { rule }
    }

    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::new(config.scoring)
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Normalize both sides and decide whether the pair is scored.
    pub fn score_pair(
        &self,
        truth: Option<&Value>,
        predicted: Option<&Value>,
    ) -> Option<(ComplexityClass, ComplexityClass)> {
        let truth = normalize_value(truth);
        let predicted = normalize_value(predicted);
        match self.rule {
            ScoringRule::ClosedSet => Some((truth, predicted)),
            ScoringRule::NotationPrefix if predicted.label().starts_with(NOTATION_PREFIX) => {
                Some((truth, predicted))
            }
            ScoringRule::NotationPrefix => None,
        }
    }

    pub fn accumulator(&self) -> Accumulator {
        Accumulator {
            evaluator: *self,
            records: 0,
            skipped: 0,
            matrix: ConfusionMatrix::new(),
        }
    }

    /// Score raw `(truth, prediction)` label pairs.
    pub fn evaluate_pairs<'a, I>(&self, pairs: I) -> Evaluation
    where
        I: IntoIterator<Item = (Option<&'a Value>, Option<&'a Value>)>,
    {
        let mut acc = self.accumulator();
        for (truth, predicted) in pairs {
            acc.push(truth, predicted);
        }
        acc.finish()
    }

    /// Score a stream of samples. The first malformed record aborts the run.
    pub fn evaluate_samples<I>(&self, samples: I) -> Result<Evaluation>
    where
        I: IntoIterator<Item = Result<Sample>>,
    {
        let mut acc = self.accumulator();
        for sample in samples {
            acc.push_sample(&sample?);
        }
        Ok(acc.finish())
    }

    #[instrument(skip_all, fields(rule = %self.rule))]
    pub fn evaluate_reader<R: BufRead>(&self, reader: R) -> Result<Evaluation> {
        let evaluation = self.evaluate_samples(SampleReader::new(reader))?;
        info!(
            "Evaluated {} records: {} scored, {} skipped, accuracy {:.4}",
            evaluation.records, evaluation.scored, evaluation.skipped, evaluation.accuracy
        );
        Ok(evaluation)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(ScoringRule::default())
    }
}

/// Incremental form of [`Evaluator`], fed one pair at a time.
#[derive(Debug, Clone)]
pub struct Accumulator {
    evaluator: Evaluator,
    records: usize,
    skipped: usize,
    matrix: ConfusionMatrix,
}

impl Accumulator {
    pub fn push(&mut self, truth: Option<&Value>, predicted: Option<&Value>) {
        self.records += 1;
        match self.evaluator.score_pair(truth, predicted) {
            Some((truth, predicted)) => self.matrix.add(truth, predicted),
            None => {
                self.skipped += 1;
                debug!("Skipping pair without a notation prediction: {:?}", predicted);
            }
        }
    }

    pub fn push_sample(&mut self, sample: &Sample) {
        self.push(sample.ground_truth(), sample.prediction());
    }

    pub fn finish(self) -> Evaluation {
        let report = ClassificationReport::from_matrix(&self.matrix);
        Evaluation {
            rule: self.evaluator.rule,
            records: self.records,
            scored: self.matrix.total() as usize,
            skipped: self.skipped,
            accuracy: self.matrix.accuracy(),
            matrix: self.matrix,
            report,
        }
    }
}
