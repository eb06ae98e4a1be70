//! Detector collaborator interfaces
//!
//! The object-detection models are external collaborators. They are
//! specified here only by the interface they provide, so tests (and
//! deployments without a model) can substitute deterministic stubs.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use damage_core::BoundingBox;

/// Failures inside a detector collaborator.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// One raw detector output: label, confidence, box in the frame of the
/// image that was passed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl RawDetection {
    pub fn new(class_name: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox,
        }
    }
}

/// Damaged-part detector over a decoded image or crop.
pub trait DamageDetector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<RawDetection>, DetectorError>;
}

/// Whole-vehicle detector over a decoded image.
pub trait VehicleDetector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<RawDetection>, DetectorError>;
}
