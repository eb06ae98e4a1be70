//! Assessment pipeline
//!
//! Ties the stages together: localize vehicles and damage, run the rule
//! engine, pick the primary damage, judge drivability. Supports a single
//! capture and the multi-angle flow where several photos of the same scene
//! are pooled into one verdict.

mod pipeline;
mod severity;

pub use pipeline::{AssessmentPipeline, AssessmentReport};
pub use severity::{Drivability, PermissiveSeverityJudge, SeverityJudge};

use thiserror::Error;
use vehicle_localizer::{DetectorError, LocalizerError};

/// Pipeline error types.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Localizer(#[from] LocalizerError),

    #[error("severity judge failed: {0}")]
    Severity(#[source] DetectorError),

    #[error("no images supplied")]
    NoImages,
}
