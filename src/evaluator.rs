//! Alert Evaluator
//!
//! Static OR policy: mitigate when confidence exceeds the threshold, or when
//! either the FRAG or RST indicator is set.

use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;

/// Inputs to the mitigation decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignals {
    /// Classifier confidence
    pub confidence: f64,
    /// Fragmented packet indicator
    pub frag: bool,
    /// Reset flag indicator
    pub rst: bool,
}

/// Outcome of evaluating an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Install a mitigation rule
    Urgent,
    /// Log only
    Routine,
}

/// Threshold evaluator
#[derive(Debug, Clone, Copy)]
pub struct AlertEvaluator {
    threshold: f64,
}

impl AlertEvaluator {
    /// Create evaluator with a confidence threshold (strict greater-than)
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the signals warrant mitigation
    pub fn should_mitigate(&self, signals: RiskSignals) -> bool {
        signals.confidence > self.threshold || signals.frag || signals.rst
    }

    /// Classify the signals
    pub fn evaluate(&self, signals: RiskSignals) -> Disposition {
        if self.should_mitigate(signals) {
            Disposition::Urgent
        } else {
            Disposition::Routine
        }
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
