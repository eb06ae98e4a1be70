//! Drivability judgment collaborator
//!
//! The severity classifier that decides whether a damaged vehicle can still
//! be driven is an external model; this module only fixes its interface and
//! provides a permissive stand-in for deployments without one.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use damage_core::Detection;
use vehicle_localizer::DetectorError;

/// Drivability verdict with a short machine-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drivability {
    pub drivable: bool,
    pub reason: String,
}

/// Severity-classification collaborator over the detections and the image
/// they came from.
pub trait SeverityJudge: Send + Sync {
    fn judge(
        &self,
        image: &DynamicImage,
        detections: &[Detection],
    ) -> Result<Drivability, DetectorError>;
}

/// Default judge for deployments without a severity model: drivable unless
/// proven otherwise.
pub struct PermissiveSeverityJudge;

impl SeverityJudge for PermissiveSeverityJudge {
    fn judge(
        &self,
        _image: &DynamicImage,
        detections: &[Detection],
    ) -> Result<Drivability, DetectorError> {
        let reason = if detections.is_empty() {
            "no_damage_detected"
        } else {
            "severity_model_unavailable"
        };
        Ok(Drivability {
            drivable: true,
            reason: reason.to_owned(),
        })
    }
}
