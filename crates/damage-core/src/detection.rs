//! The detection record shared across the pipeline

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::part::{normalize_label, DamagePart};
use crate::region::{assign_region, Region};

/// One localized, labeled, confidence-scored observation of a damaged part.
///
/// Created at the object-detector boundary, mutated only by label
/// normalization and region assignment, then treated as immutable by the
/// scoring and decision stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Part label as reported by the detector (canonical after
    /// [`Detection::normalize`])
    pub class_name: String,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Bounding box in the full-image pixel frame
    pub bbox: BoundingBox,
    /// Positional bucket, set once a reference frame is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox,
            region: None,
        }
    }

    /// Horizontal center of the bounding box
    pub fn center_x(&self) -> f32 {
        self.bbox.center_x()
    }

    /// Canonical part for this detection, `None` outside the taxonomy
    pub fn part(&self) -> Option<DamagePart> {
        DamagePart::from_label(&self.class_name)
    }

    /// Rewrite `class_name` to its canonical form
    pub fn normalize(&mut self) {
        let canonical = normalize_label(&self.class_name);
        if canonical != self.class_name {
            self.class_name = canonical.to_owned();
        }
    }

    /// Assign the region bucket from the current center against a reference
    /// width (enclosing vehicle crop, or the full image).
    pub fn assign_region(&mut self, reference_width: f32) {
        self.region = Some(assign_region(self.center_x(), reference_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rewrites_synonym() {
        let mut d = Detection::new("Dickey", 0.8, BoundingBox::new(0, 0, 10, 10));
        d.normalize();
        assert_eq!(d.class_name, "Trunk");
        assert_eq!(d.part(), Some(DamagePart::Trunk));
    }

    #[test]
    fn test_part_resolves_without_normalize() {
        let d = Detection::new("CAR_TRUNK-KP48", 0.8, BoundingBox::new(0, 0, 10, 10));
        assert_eq!(d.part(), Some(DamagePart::Trunk));
    }

    #[test]
    fn test_assign_region_uses_center() {
        let mut d = Detection::new("Bumper", 0.5, BoundingBox::new(0, 0, 40, 40));
        d.assign_region(100.0);
        assert_eq!(d.region, Some(Region::Front));

        d.bbox = BoundingBox::new(60, 0, 90, 40);
        d.assign_region(100.0);
        assert_eq!(d.region, Some(Region::Rear));
    }

    #[test]
    fn test_region_absent_from_json_until_assigned() {
        let d = Detection::new("Bumper", 0.5, BoundingBox::new(0, 0, 40, 40));
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("region"));
    }
}
