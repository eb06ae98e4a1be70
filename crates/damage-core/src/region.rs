//! Coarse positional regions

use serde::{Deserialize, Serialize};

/// Horizontal position bucket of a detection relative to a reference width.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Front,
    Side,
    Rear,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Rear => "rear",
        }
    }
}

/// Map a horizontal center to a region by thirds of the reference width.
///
/// Left third is treated as front, middle as side, right third as rear.
/// This is a modeling approximation, not a geometric fact: it holds for the
/// typical three-quarter capture angle the damage model was tuned on, and
/// stands in for true front/rear/side geometry.
pub fn assign_region(center_x: f32, reference_width: f32) -> Region {
    if center_x < reference_width * 0.33 {
        Region::Front
    } else if center_x < reference_width * 0.66 {
        Region::Side
    } else {
        Region::Rear
    }
}
