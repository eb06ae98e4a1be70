//! Primary damage selection
//!
//! Ranks detections by an importance-weighted composite score and returns
//! the single most significant one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use damage_core::{DamagePart, Detection, Region};

/// Importance weights for primary-damage ranking. Parts and regions absent
/// from the tables weigh 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceWeights {
    pub part: BTreeMap<DamagePart, f32>,
    pub region: BTreeMap<Region, f32>,
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            part: BTreeMap::from([
                (DamagePart::Windshield, 1.5),
                (DamagePart::Trunk, 1.4),
                (DamagePart::Bonnet, 1.3),
                (DamagePart::Door, 1.2),
                (DamagePart::Fender, 1.1),
                (DamagePart::Bumper, 1.0),
                (DamagePart::Light, 0.9),
            ]),
            region: BTreeMap::from([
                (Region::Front, 1.2),
                (Region::Rear, 1.2),
                (Region::Side, 1.0),
            ]),
        }
    }
}

impl ImportanceWeights {
    /// Composite significance score: confidence x part weight x region weight.
    pub fn composite_score(&self, detection: &Detection) -> f32 {
        let part_weight = detection
            .part()
            .and_then(|p| self.part.get(&p).copied())
            .unwrap_or(1.0);
        let region_weight = detection
            .region
            .and_then(|r| self.region.get(&r).copied())
            .unwrap_or(1.0);
        detection.confidence * part_weight * region_weight
    }
}

/// Argmax by composite score; exact ties keep the first-encountered
/// detection, so selection is stable in the input order.
pub(crate) fn select_primary<'a>(
    weights: &ImportanceWeights,
    detections: &'a [Detection],
) -> Option<&'a Detection> {
    let mut best: Option<(&Detection, f32)> = None;
    for detection in detections {
        let score = weights.composite_score(detection);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((detection, score)),
        }
    }
    best.map(|(detection, _)| detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use damage_core::BoundingBox;

    fn det(class: &str, conf: f32, region: Region) -> Detection {
        let mut d = Detection::new(class, conf, BoundingBox::new(0, 0, 10, 10));
        d.region = Some(region);
        d
    }

    #[test]
    fn test_empty_input_yields_none() {
        let weights = ImportanceWeights::default();
        assert_eq!(select_primary(&weights, &[]), None);
    }

    #[test]
    fn test_importance_outranks_raw_confidence() {
        let weights = ImportanceWeights::default();
        let detections = [
            det("Bumper", 0.8, Region::Side), // 0.8 * 1.0 * 1.0
            det("Trunk", 0.7, Region::Rear),  // 0.7 * 1.4 * 1.2 = 1.176
        ];
        let primary = select_primary(&weights, &detections).unwrap();
        assert_eq!(primary.class_name, "Trunk");
    }

    #[test]
    fn test_exact_tie_keeps_first_in_both_orderings() {
        let weights = ImportanceWeights::default();
        // 0.6 * 1.5 * 1.2 == 0.9 * 1.0 * 1.2 == 1.08
        let windshield = det("Windshield", 0.6, Region::Front);
        let bumper = det("Bumper", 0.9, Region::Front);

        let forward = [windshield.clone(), bumper.clone()];
        let primary = select_primary(&weights, &forward).unwrap();
        assert_eq!(primary.class_name, "Windshield");

        let reversed = [bumper, windshield];
        let primary = select_primary(&weights, &reversed).unwrap();
        assert_eq!(primary.class_name, "Bumper");
    }

    #[test]
    fn test_unknown_part_and_missing_region_default_to_one() {
        let weights = ImportanceWeights::default();
        let mirror = Detection::new("Mirror", 0.9, BoundingBox::new(0, 0, 10, 10));
        assert!((weights.composite_score(&mirror) - 0.9).abs() < 1e-6);
    }
}
