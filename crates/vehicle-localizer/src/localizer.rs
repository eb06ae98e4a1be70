//! Crop-and-detect localization over injected detector collaborators

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use damage_core::{BoundingBox, Detection};

use crate::config::LocalizerConfig;
use crate::detector::{DamageDetector, VehicleDetector};
use crate::fallback::FallbackPolicy;
use crate::LocalizerError;

/// Localization result: region-tagged damage detections in full-image
/// coordinates, plus the vehicle count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    pub detections: Vec<Detection>,
    pub car_count: usize,
}

/// Runs the vehicle detector to establish reference frames, then the damage
/// detector inside each frame. Assumes a valid decoded image; undecodable
/// input is the caller's validation problem.
pub struct VehicleLocalizer {
    config: LocalizerConfig,
    fallback: FallbackPolicy,
    vehicle_detector: Box<dyn VehicleDetector>,
    damage_detector: Box<dyn DamageDetector>,
}

impl VehicleLocalizer {
    pub fn new(
        config: LocalizerConfig,
        vehicle_detector: Box<dyn VehicleDetector>,
        damage_detector: Box<dyn DamageDetector>,
    ) -> Self {
        Self {
            config,
            fallback: FallbackPolicy::default(),
            vehicle_detector,
            damage_detector,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Localize vehicles and the damage on them.
    pub fn localize(&self, image: &DynamicImage) -> Result<Localization, LocalizerError> {
        let (width, _height) = image.dimensions();
        let vehicle_boxes = self.vehicle_boxes(image)?;

        if vehicle_boxes.is_empty() {
            info!("no vehicle box above threshold, detecting damage on the full frame");
            let detections = self.damage_in(image, 0, 0, width as f32)?;
            let car_count = usize::from(self.fallback.presumes_vehicle(&detections));
            return Ok(Localization {
                detections,
                car_count,
            });
        }

        let mut detections = Vec::new();
        for vehicle_box in &vehicle_boxes {
            let crop = image.crop_imm(
                vehicle_box.x1 as u32,
                vehicle_box.y1 as u32,
                vehicle_box.width() as u32,
                vehicle_box.height() as u32,
            );
            // region is assigned against the crop width before the box moves
            // back into full-image coordinates
            let in_crop = self.damage_in(
                &crop,
                vehicle_box.x1,
                vehicle_box.y1,
                vehicle_box.width() as f32,
            )?;
            detections.extend(in_crop);
        }

        debug!(
            vehicles = vehicle_boxes.len(),
            damages = detections.len(),
            "localized damage in vehicle crops"
        );
        Ok(Localization {
            car_count: vehicle_boxes.len(),
            detections,
        })
    }

    /// Vehicle boxes above the confidence floor, restricted to the vehicle
    /// vocabulary and clamped to the image.
    fn vehicle_boxes(&self, image: &DynamicImage) -> Result<Vec<BoundingBox>, LocalizerError> {
        let (width, height) = image.dimensions();
        let raw = self
            .vehicle_detector
            .detect(image)
            .map_err(LocalizerError::VehicleDetection)?;

        let boxes = raw
            .into_iter()
            .filter(|r| self.config.is_vehicle_class(&r.class_name))
            .filter(|r| r.confidence >= self.config.vehicle_confidence)
            .filter_map(|r| r.bbox.clamp_to(width, height))
            .collect();
        Ok(boxes)
    }

    /// Damage detections in `image`, thresholded per class, normalized,
    /// region-tagged against `reference_width`, and translated by
    /// `(dx, dy)` into the full-image frame.
    fn damage_in(
        &self,
        image: &DynamicImage,
        dx: i32,
        dy: i32,
        reference_width: f32,
    ) -> Result<Vec<Detection>, LocalizerError> {
        let raw = self
            .damage_detector
            .detect(image)
            .map_err(LocalizerError::DamageDetection)?;

        let mut detections = Vec::new();
        for r in raw {
            if r.confidence < self.config.damage_threshold(&r.class_name) {
                continue;
            }
            let mut detection = Detection::new(r.class_name, r.confidence, r.bbox);
            detection.normalize();
            detection.assign_region(reference_width);
            detection.bbox = detection.bbox.translate(dx, dy);
            detections.push(detection);
        }
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{DetectorError, RawDetection};
    use damage_core::Region;

    struct StubVehicleDetector(Vec<RawDetection>);

    impl VehicleDetector for StubVehicleDetector {
        fn detect(&self, _image: &DynamicImage) -> Result<Vec<RawDetection>, DetectorError> {
            Ok(self.0.clone())
        }
    }

    struct StubDamageDetector(Vec<RawDetection>);

    impl DamageDetector for StubDamageDetector {
        fn detect(&self, _image: &DynamicImage) -> Result<Vec<RawDetection>, DetectorError> {
            Ok(self.0.clone())
        }
    }

    struct FailingVehicleDetector;

    impl VehicleDetector for FailingVehicleDetector {
        fn detect(&self, _image: &DynamicImage) -> Result<Vec<RawDetection>, DetectorError> {
            Err(DetectorError::Inference("session crashed".to_owned()))
        }
    }

    fn test_image() -> DynamicImage {
        DynamicImage::new_rgb8(640, 480)
    }

    fn localizer(
        vehicles: Vec<RawDetection>,
        damages: Vec<RawDetection>,
    ) -> VehicleLocalizer {
        VehicleLocalizer::new(
            LocalizerConfig::default(),
            Box::new(StubVehicleDetector(vehicles)),
            Box::new(StubDamageDetector(damages)),
        )
    }

    #[test]
    fn test_crop_detection_translates_back_to_image_frame() {
        let vehicles = vec![RawDetection::new(
            "car",
            0.9,
            BoundingBox::new(100, 50, 300, 250),
        )];
        // crop-local box, center_x 30 of a 200-wide crop: front
        let damages = vec![RawDetection::new(
            "Bumper",
            0.9,
            BoundingBox::new(10, 10, 50, 50),
        )];

        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 1);
        assert_eq!(result.detections.len(), 1);

        let d = &result.detections[0];
        assert_eq!(d.bbox, BoundingBox::new(110, 60, 150, 100));
        assert_eq!(d.region, Some(Region::Front));
    }

    #[test]
    fn test_region_uses_crop_width_not_image_width() {
        let vehicles = vec![RawDetection::new(
            "car",
            0.9,
            BoundingBox::new(400, 0, 600, 200),
        )];
        // center_x 150 of a 200-wide crop: rear, although 550 of 640 in the
        // full image would also be rear; pick one that diverges
        let damages = vec![RawDetection::new(
            "Light",
            0.9,
            BoundingBox::new(140, 10, 160, 50),
        )];

        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        let d = &result.detections[0];
        // 150 / 200 = 0.75 of the crop: rear
        assert_eq!(d.region, Some(Region::Rear));
        assert_eq!(d.bbox, BoundingBox::new(540, 10, 560, 50));
    }

    #[test]
    fn test_multiple_vehicles_accumulate_detections() {
        let vehicles = vec![
            RawDetection::new("car", 0.9, BoundingBox::new(0, 0, 200, 200)),
            RawDetection::new("truck", 0.8, BoundingBox::new(300, 0, 600, 200)),
        ];
        let damages = vec![RawDetection::new(
            "Door",
            0.5,
            BoundingBox::new(80, 10, 120, 50),
        )];

        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 2);
        assert_eq!(result.detections.len(), 2);
    }

    #[test]
    fn test_vehicle_filter_drops_wrong_class_and_low_confidence() {
        let vehicles = vec![
            RawDetection::new("person", 0.9, BoundingBox::new(0, 0, 200, 200)),
            RawDetection::new("car", 0.4, BoundingBox::new(0, 0, 200, 200)),
        ];
        let damages = vec![
            RawDetection::new("Bumper", 0.5, BoundingBox::new(10, 10, 50, 50)),
            RawDetection::new("Light", 0.4, BoundingBox::new(500, 10, 540, 50)),
        ];

        // both vehicle candidates rejected: full-frame fallback, two damages
        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 1);
        assert_eq!(result.detections.len(), 2);
        // regions against the full 640 width
        assert_eq!(result.detections[0].region, Some(Region::Front));
        assert_eq!(result.detections[1].region, Some(Region::Rear));
    }

    #[test]
    fn test_fallback_weak_single_damage_reports_no_vehicle() {
        let damages = vec![RawDetection::new(
            "Light",
            0.4,
            BoundingBox::new(10, 10, 50, 50),
        )];
        let result = localizer(vec![], damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 0);
        assert_eq!(result.detections.len(), 1);
    }

    #[test]
    fn test_fallback_strong_part_presumes_one_vehicle() {
        let damages = vec![RawDetection::new(
            "Windshield",
            0.5,
            BoundingBox::new(10, 10, 50, 50),
        )];
        let result = localizer(vec![], damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 1);
    }

    #[test]
    fn test_per_class_damage_thresholds() {
        let vehicles = vec![RawDetection::new(
            "car",
            0.9,
            BoundingBox::new(0, 0, 400, 400),
        )];
        let damages = vec![
            // Trunk floor is 0.1: kept
            RawDetection::new("Trunk", 0.12, BoundingBox::new(10, 10, 50, 50)),
            // Door floor is 0.25: dropped
            RawDetection::new("Door", 0.2, BoundingBox::new(60, 10, 100, 50)),
        ];

        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        assert_eq!(result.detections.len(), 1);
        assert_eq!(result.detections[0].class_name, "Trunk");
    }

    #[test]
    fn test_labels_are_normalized() {
        let damages = vec![
            RawDetection::new("Dickey", 0.5, BoundingBox::new(10, 10, 50, 50)),
            RawDetection::new("Bumper", 0.5, BoundingBox::new(60, 10, 100, 50)),
        ];
        let result = localizer(vec![], damages).localize(&test_image()).unwrap();
        assert_eq!(result.detections[0].class_name, "Trunk");
    }

    #[test]
    fn test_oversized_vehicle_box_is_clamped() {
        let vehicles = vec![RawDetection::new(
            "car",
            0.9,
            BoundingBox::new(-50, -20, 700, 500),
        )];
        let damages = vec![RawDetection::new(
            "Bumper",
            0.5,
            BoundingBox::new(10, 10, 50, 50),
        )];
        let result = localizer(vehicles, damages).localize(&test_image()).unwrap();
        assert_eq!(result.car_count, 1);
        // clamped crop starts at the origin, so no translation offset
        assert_eq!(result.detections[0].bbox, BoundingBox::new(10, 10, 50, 50));
    }

    #[test]
    fn test_detector_failure_propagates() {
        let localizer = VehicleLocalizer::new(
            LocalizerConfig::default(),
            Box::new(FailingVehicleDetector),
            Box::new(StubDamageDetector(vec![])),
        );
        let err = localizer.localize(&test_image()).unwrap_err();
        assert!(matches!(err, LocalizerError::VehicleDetection(_)));
    }
}
