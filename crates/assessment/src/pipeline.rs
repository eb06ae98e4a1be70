//! Single- and multi-capture assessment flows

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use accident_engine::{AccidentAssessment, AccidentEngine, AssessmentMode};
use damage_core::Detection;
use vehicle_localizer::VehicleLocalizer;

use crate::severity::{Drivability, SeverityJudge};
use crate::PipelineError;

/// Everything one assessment call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment: AccidentAssessment,
    pub primary_damage: Option<Detection>,
    pub detections: Vec<Detection>,
    pub car_count: usize,
    pub drivability: Drivability,
}

/// The full assessment pipeline over injected collaborators.
pub struct AssessmentPipeline {
    localizer: VehicleLocalizer,
    engine: AccidentEngine,
    severity: Box<dyn SeverityJudge>,
}

impl AssessmentPipeline {
    pub fn new(
        localizer: VehicleLocalizer,
        engine: AccidentEngine,
        severity: Box<dyn SeverityJudge>,
    ) -> Self {
        Self {
            localizer,
            engine,
            severity,
        }
    }

    /// Assess a single capture.
    pub fn assess(&self, image: &DynamicImage) -> Result<AssessmentReport, PipelineError> {
        let localization = self.localizer.localize(image)?;
        info!(
            car_count = localization.car_count,
            damages = localization.detections.len(),
            "assessing single capture"
        );

        let assessment = self.engine.estimate_accident(
            &localization.detections,
            localization.car_count,
            AssessmentMode::Single,
        );
        let primary_damage = self
            .engine
            .select_primary_damage(&localization.detections)
            .cloned();
        let drivability = self
            .severity
            .judge(image, &localization.detections)
            .map_err(PipelineError::Severity)?;

        Ok(AssessmentReport {
            assessment,
            primary_damage,
            detections: localization.detections,
            car_count: localization.car_count,
            drivability,
        })
    }

    /// Assess several captures of the same scene as one event: detections
    /// are pooled, the car count is the maximum over the images, and the
    /// severity judge runs once against the first (representative) image.
    pub fn assess_multi(
        &self,
        images: &[DynamicImage],
    ) -> Result<AssessmentReport, PipelineError> {
        let representative = images.first().ok_or(PipelineError::NoImages)?;

        let mut detections = Vec::new();
        let mut car_count = 0;
        for image in images {
            let localization = self.localizer.localize(image)?;
            car_count = car_count.max(localization.car_count);
            detections.extend(localization.detections);
        }
        info!(
            images = images.len(),
            car_count,
            damages = detections.len(),
            "assessing multi-angle capture"
        );

        let assessment =
            self.engine
                .estimate_accident(&detections, car_count, AssessmentMode::Multi);
        let primary_damage = self.engine.select_primary_damage(&detections).cloned();
        let drivability = self
            .severity
            .judge(representative, &detections)
            .map_err(PipelineError::Severity)?;

        Ok(AssessmentReport {
            assessment,
            primary_damage,
            detections,
            car_count,
            drivability,
        })
    }
}
