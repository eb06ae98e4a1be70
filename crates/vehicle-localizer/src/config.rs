//! Localizer configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Thresholds and class vocabularies for vehicle localization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// Confidence floor for a vehicle box to count
    pub vehicle_confidence: f32,

    /// Vehicle-class vocabulary, matched case-insensitively
    pub vehicle_classes: Vec<String>,

    /// Default confidence floor for damage detections
    pub default_damage_confidence: f32,

    /// Per-class damage floors. Core parts sit near the default; rare
    /// classes the model tends to drop into background get a lower floor,
    /// under-trained ones a higher one.
    pub damage_class_confidence: BTreeMap<String, f32>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            vehicle_confidence: 0.5,
            vehicle_classes: vec!["car".to_owned(), "truck".to_owned(), "bus".to_owned()],
            default_damage_confidence: 0.3,
            damage_class_confidence: BTreeMap::from([
                ("Bumper".to_owned(), 0.2),
                ("Bonnet".to_owned(), 0.2),
                ("Fender".to_owned(), 0.2),
                ("Door".to_owned(), 0.25),
                ("Trunk".to_owned(), 0.1),
                ("Windshield".to_owned(), 0.1),
                ("Light".to_owned(), 0.1),
            ]),
        }
    }
}

impl LocalizerConfig {
    /// Confidence floor for one damage class.
    pub fn damage_threshold(&self, class_name: &str) -> f32 {
        self.damage_class_confidence
            .get(class_name)
            .copied()
            .unwrap_or(self.default_damage_confidence)
    }

    /// Whether a detector label names a vehicle class.
    pub fn is_vehicle_class(&self, label: &str) -> bool {
        let lowered = label.to_lowercase();
        self.vehicle_classes.iter().any(|c| c == &lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_thresholds() {
        let config = LocalizerConfig::default();
        assert_eq!(config.damage_threshold("Trunk"), 0.1);
        assert_eq!(config.damage_threshold("Door"), 0.25);
        assert_eq!(config.damage_threshold("SomethingElse"), 0.3);
    }

    #[test]
    fn test_vehicle_class_match_is_case_insensitive() {
        let config = LocalizerConfig::default();
        assert!(config.is_vehicle_class("car"));
        assert!(config.is_vehicle_class("Car"));
        assert!(config.is_vehicle_class("TRUCK"));
        assert!(!config.is_vehicle_class("person"));
    }
}
