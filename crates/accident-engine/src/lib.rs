//! Accident rule/scoring engine
//!
//! Resolves conflicting, probabilistic damage evidence into a stable,
//! explainable verdict:
//! - declarative weighted scoring over normalized, region-tagged detections
//! - a decision policy with explicit tie-break and dampening rules
//! - primary-damage selection by importance-weighted ranking
//!
//! Everything is a pure function of (detections, car count, mode) over one
//! immutable rule table; re-invoking with the same inputs always yields the
//! same result.

pub mod assessment;
mod policy;
pub mod primary;
pub mod rules;
pub mod score;

pub use assessment::{
    message_for, AccidentAssessment, AccidentState, AccidentType, AssessmentMode,
    ConfidenceLevel,
};
pub use primary::ImportanceWeights;
pub use rules::{PartRule, RegionPartRule, RuleSet, SideBonusPolicy, SideBonusRule};
pub use score::{AccidentCategory, ScoreBoard};

use damage_core::Detection;
use thiserror::Error;

/// Engine error types. The engine itself never fails on well-formed input;
/// only loading an external rule table can go wrong.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid rule set: {0}")]
    InvalidRuleSet(#[from] serde_json::Error),
}

/// The assessment engine: one rule table plus importance weights, immutable
/// after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct AccidentEngine {
    rules: RuleSet,
    importance: ImportanceWeights,
}

impl AccidentEngine {
    pub fn new(rules: RuleSet, importance: ImportanceWeights) -> Self {
        Self { rules, importance }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Produce the structured verdict for one set of detections.
    ///
    /// `car_count` is the number of localized vehicles (1 when the caller
    /// has no better information), `mode` distinguishes a single capture
    /// from multi-angle captures of the same scene.
    pub fn estimate_accident(
        &self,
        detections: &[Detection],
        car_count: usize,
        mode: AssessmentMode,
    ) -> AccidentAssessment {
        policy::estimate(&self.rules, detections, car_count, mode)
    }

    /// Single-capture convenience: one vehicle assumed, single mode.
    pub fn estimate_single(&self, detections: &[Detection]) -> AccidentAssessment {
        self.estimate_accident(detections, 1, AssessmentMode::Single)
    }

    /// The single most significant detection, `None` only for empty input.
    pub fn select_primary_damage<'a>(&self, detections: &'a [Detection]) -> Option<&'a Detection> {
        primary::select_primary(&self.importance, detections)
    }
}

impl Default for AccidentEngine {
    fn default() -> Self {
        Self::new(RuleSet::default(), ImportanceWeights::default())
    }
}
