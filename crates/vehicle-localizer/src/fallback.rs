//! Single-vehicle presumption for the detector-miss fallback
//!
//! When the vehicle detector finds nothing but the damage detector still
//! fires on the full frame, the evidence has to be reconciled: a missed
//! vehicle must not erase genuine damage. This policy decides whether the
//! damage looks convincing enough to presume exactly one vehicle, trading
//! localization precision for recall on the car count. It is a judgment
//! call, kept as its own tunable unit.

use serde::{Deserialize, Serialize};

use damage_core::Detection;

/// Thresholds for presuming a vehicle from damage evidence alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackPolicy {
    /// This many damages presume a vehicle even without a strong part
    pub min_damage_count: usize,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            min_damage_count: 2,
        }
    }
}

impl FallbackPolicy {
    /// Presume one vehicle when enough damages are present, or when any
    /// strong part (Trunk, Bonnet, Windshield) is.
    pub fn presumes_vehicle(&self, detections: &[Detection]) -> bool {
        if detections.len() >= self.min_damage_count {
            return true;
        }
        detections
            .iter()
            .any(|d| d.part().is_some_and(|p| p.is_strong()))
    }
}
