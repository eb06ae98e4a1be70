//! Vehicle localization and crop-based damage detection
//!
//! Turns whole-image vehicle-detector output into reference frames for
//! region assignment:
//! - vehicle boxes filtered to known classes and a confidence floor
//! - damage detection inside each vehicle crop, translated back to the
//!   full-image frame
//! - a heuristic fallback when the vehicle detector finds nothing, so a
//!   missed vehicle does not erase genuine damage evidence
//!
//! Detector models are injected behind trait boundaries; this crate never
//! loads models or decodes images itself.

pub mod config;
pub mod detector;
pub mod fallback;
mod localizer;

pub use config::LocalizerConfig;
pub use detector::{DamageDetector, DetectorError, RawDetection, VehicleDetector};
pub use fallback::FallbackPolicy;
pub use localizer::{Localization, VehicleLocalizer};

use thiserror::Error;

/// Localizer error types: the only failure modes are collaborator failures.
#[derive(Debug, Error)]
pub enum LocalizerError {
    #[error("vehicle detector failed: {0}")]
    VehicleDetection(#[source] DetectorError),

    #[error("damage detector failed: {0}")]
    DamageDetection(#[source] DetectorError),
}
