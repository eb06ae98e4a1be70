//! Assessment result types and canonical messages

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::score::AccidentCategory;

/// Accident state for one assessment call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccidentState {
    NoAccident,
    SuspectedAccident,
    ConfirmedAccident,
}

/// Directional classification of a confirmed accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccidentType {
    FrontCollision,
    RearCollision,
    SideCollision,
    MultiCollision,
    ComplexDamage,
    Unknown,
}

impl From<AccidentCategory> for AccidentType {
    fn from(category: AccidentCategory) -> Self {
        match category {
            AccidentCategory::FrontCollision => Self::FrontCollision,
            AccidentCategory::RearCollision => Self::RearCollision,
            AccidentCategory::SideCollision => Self::SideCollision,
            AccidentCategory::MultiCollision => Self::MultiCollision,
        }
    }
}

/// How much evidence backs the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Capture mode of the evidence being assessed.
///
/// `Multi` means several angles of the same scene; damage on both ends of a
/// single vehicle then reads as one complex-damage event rather than an
/// undecidable direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    #[default]
    Single,
    Multi,
}

/// The structured verdict for one set of detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentAssessment {
    pub detected: bool,
    pub state: AccidentState,
    pub accident_type: AccidentType,
    pub confidence_level: ConfidenceLevel,
    pub scores: BTreeMap<AccidentCategory, f32>,
    pub message: String,
}

impl AccidentAssessment {
    pub(crate) fn no_accident() -> Self {
        Self {
            detected: false,
            state: AccidentState::NoAccident,
            accident_type: AccidentType::Unknown,
            confidence_level: ConfidenceLevel::Low,
            scores: BTreeMap::new(),
            message: message_for(AccidentState::NoAccident, AccidentType::Unknown).to_owned(),
        }
    }
}

/// Canonical explanation for each (state, type) combination. Fixed strings,
/// reproduced verbatim for compatibility with existing consumers.
pub fn message_for(state: AccidentState, accident_type: AccidentType) -> &'static str {
    match state {
        AccidentState::NoAccident => "no damage clearly detected",
        AccidentState::SuspectedAccident => "damage confirmed but accident status uncertain",
        AccidentState::ConfirmedAccident => match accident_type {
            AccidentType::MultiCollision => "multiple vehicles involved",
            AccidentType::ComplexDamage => {
                "same vehicle shows damage on multiple sides; classified as complex"
            }
            AccidentType::FrontCollision
            | AccidentType::RearCollision
            | AccidentType::SideCollision => {
                "accident direction identified with reasonable confidence"
            }
            AccidentType::Unknown => "accident confirmed but direction could not be determined",
        },
    }
}
