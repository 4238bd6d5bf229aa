//! Confusion-matrix-derived rates.
//!
//! Every ratio whose denominator is zero evaluates to `0`, and the MCC
//! normaliser is floored to `1`, so a [`MetricsVector`] is always finite.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::confusion::ConfusionCounts;

/// Derived rates for one confusion matrix. All fields lie in `[0, 1]`
/// except `mcc`, which lies in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsVector {
    pub accuracy: f64,
    pub precision: f64,
    /// True positive rate.
    pub recall: f64,
    /// True negative rate.
    pub specificity: f64,
    pub fpr: f64,
    pub fnr: f64,
    pub f1: f64,
    pub mcc: f64,
}

/// Selector for one component of a [`MetricsVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Accuracy,
    Precision,
    Recall,
    Specificity,
    Fpr,
    Fnr,
    F1,
    Mcc,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Accuracy,
        Metric::Precision,
        Metric::Recall,
        Metric::Specificity,
        Metric::Fpr,
        Metric::Fnr,
        Metric::F1,
        Metric::Mcc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Accuracy => "Accuracy",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall (TPR)",
            Metric::Specificity => "Specificity (TNR)",
            Metric::Fpr => "False Positive Rate",
            Metric::Fnr => "False Negative Rate",
            Metric::F1 => "F1 Score",
            Metric::Mcc => "MCC",
        }
    }
}

impl MetricsVector {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::Specificity => self.specificity,
            Metric::Fpr => self.fpr,
            Metric::Fnr => self.fnr,
            Metric::F1 => self.f1,
            Metric::Mcc => self.mcc,
        }
    }
}

impl From<ConfusionCounts> for MetricsVector {
    fn from(counts: ConfusionCounts) -> Self {
        derive(&counts)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Map confusion counts to the derived-rate vector.
pub fn derive(counts: &ConfusionCounts) -> MetricsVector {
    let tp = counts.tp as f64;
    let fp = counts.fp as f64;
    let tn = counts.tn as f64;
    let fn_ = counts.fn_count as f64;

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);

    // f64 on purpose: the u64 product of four margins overflows.
    let mut normaliser = (tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_);
    if normaliser == 0.0 {
        normaliser = 1.0;
    }
    let mcc = ((tp * tn - fp * fn_) / normaliser.sqrt()).clamp(-1.0, 1.0);

    MetricsVector {
        accuracy: ratio(tp + tn, tp + fp + tn + fn_),
        precision,
        recall,
        specificity: ratio(tn, tn + fp),
        fpr: ratio(fp, fp + tn),
        fnr: ratio(fn_, tp + fn_),
        f1: ratio(2.0 * precision * recall, precision + recall),
        mcc,
    }
}

impl fmt::Display for MetricsVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acc={:.2}% prec={:.2}% rec={:.2}% spec={:.2}% fpr={:.2}% fnr={:.2}% f1={:.2} mcc={:.2}",
            self.accuracy * 100.0,
            self.precision * 100.0,
            self.recall * 100.0,
            self.specificity * 100.0,
            self.fpr * 100.0,
            self.fnr * 100.0,
            self.f1,
            self.mcc,
        )
    }
}
