//! Confusion matrix and per-class classification metrics.

use complexity_common::ComplexityClass;
use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};

const K: usize = ComplexityClass::COUNT;

/// Counts over the fixed class axis, rows = true class, columns = predicted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[u64; K]; K],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ComplexityClass, ComplexityClass)>,
    {
        let mut cm = Self::new();
        for (truth, predicted) in pairs {
            cm.add(truth, predicted);
        }
        cm
    }

    pub fn add(&mut self, truth: ComplexityClass, predicted: ComplexityClass) {
        self.counts[truth.index()][predicted.index()] += 1;
    }

    pub fn get(&self, truth: ComplexityClass, predicted: ComplexityClass) -> u64 {
        self.counts[truth.index()][predicted.index()]
    }

    pub fn rows(&self) -> &[[u64; K]; K] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> u64 {
        (0..K).map(|i| self.counts[i][i]).sum()
    }

    /// Number of samples whose true class is `class`.
    pub fn row_total(&self, class: ComplexityClass) -> u64 {
        self.counts[class.index()].iter().sum()
    }

    /// Number of samples predicted as `class`.
    pub fn column_total(&self, class: ComplexityClass) -> u64 {
        self.counts.iter().map(|row| row[class.index()]).sum()
    }

    pub fn column_max(&self, class: ComplexityClass) -> u64 {
        self.counts.iter().map(|row| row[class.index()]).max().unwrap_or(0)
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// `correct / total`, or 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }
}

/// Precision/recall/F1 for a single class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub class: ComplexityClass,
    /// `TP / (TP + FP)`.
    pub precision: f64,
    /// `TP / (TP + FN)`.
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of the class.
    pub support: u64,
}

/// Unweighted or support-weighted mean over classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub per_class: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    pub fn from_matrix(cm: &ConfusionMatrix) -> Self {
        let per_class: Vec<ClassMetrics> = ComplexityClass::iter()
            .map(|class| class_metrics(cm, class))
            .collect();

        let total = cm.total();
        let n = per_class.len() as f64;
        let macro_avg = AverageMetrics {
            precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
            recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
            f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
            support: total,
        };

        let weighted = |f: fn(&ClassMetrics) -> f64| -> f64 {
            if total == 0 {
                return 0.0;
            }
            per_class
                .iter()
                .map(|m| f(m) * m.support as f64)
                .sum::<f64>()
                / total as f64
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1: weighted(|m| m.f1),
            support: total,
        };

        Self {
            per_class,
            macro_avg,
            weighted_avg,
        }
    }

    pub fn get(&self, class: ComplexityClass) -> &ClassMetrics {
        &self.per_class[class.index()]
    }
}

fn class_metrics(cm: &ConfusionMatrix, class: ComplexityClass) -> ClassMetrics {
    let tp = cm.get(class, class);
    let predicted = cm.column_total(class);
    let support = cm.row_total(class);

    let precision = ratio(tp, predicted);
    let recall = ratio(tp, support);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    ClassMetrics {
        class,
        precision,
        recall,
        f1,
        support,
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
