//! Decision policy: from scores and counts to a verdict
//!
//! A fresh state machine per call, no cross-call memory. The ordering of the
//! type-resolution branches is deliberate and load-bearing:
//! side correction, then multi-vehicle, then complex damage, then score
//! argmax, then unknown.

use tracing::debug;

use damage_core::{Detection, Region};

use crate::assessment::{
    message_for, AccidentAssessment, AccidentState, AccidentType, AssessmentMode,
    ConfidenceLevel,
};
use crate::rules::RuleSet;
use crate::score::{score_detections, AccidentCategory, ScoreBoard};

pub(crate) fn estimate(
    rules: &RuleSet,
    detections: &[Detection],
    car_count: usize,
    mode: AssessmentMode,
) -> AccidentAssessment {
    // A detection missing its part or region is non-evidence, not an error:
    // it neither scores nor counts as damage.
    let valid: Vec<&Detection> = detections
        .iter()
        .filter(|d| {
            d.part().is_some() && d.region.is_some() && d.confidence >= rules.min_confidence
        })
        .collect();

    let damage_count = valid.len();
    if damage_count == 0 {
        return AccidentAssessment::no_accident();
    }

    let scores = score_detections(rules, &valid);

    let state = if damage_count >= 2 {
        AccidentState::ConfirmedAccident
    } else {
        AccidentState::SuspectedAccident
    };

    let accident_type = if state == AccidentState::ConfirmedAccident {
        resolve_type(rules, &scores, &valid, car_count, mode)
    } else {
        // a single piece of evidence never names a direction
        AccidentType::Unknown
    };

    let confidence_level = match damage_count {
        n if n >= 3 => ConfidenceLevel::High,
        2 => ConfidenceLevel::Medium,
        _ => ConfidenceLevel::Low,
    };

    debug!(
        ?state,
        ?accident_type,
        damage_count,
        car_count,
        "accident estimate"
    );

    AccidentAssessment {
        detected: state == AccidentState::ConfirmedAccident,
        state,
        accident_type,
        confidence_level,
        scores: scores.snapshot(),
        message: message_for(state, accident_type).to_owned(),
    }
}

fn resolve_type(
    rules: &RuleSet,
    scores: &ScoreBoard,
    valid: &[&Detection],
    car_count: usize,
    mode: AssessmentMode,
) -> AccidentType {
    let has_side_part = valid
        .iter()
        .any(|d| d.part().is_some_and(|p| p.is_side_typical()));
    let has_strong_front = valid
        .iter()
        .any(|d| d.part().is_some_and(|p| p.is_strong_front()));
    let has_strong_rear = valid
        .iter()
        .any(|d| d.part().is_some_and(|p| p.is_strong_rear()));

    let front = scores.get(AccidentCategory::FrontCollision);
    let rear = scores.get(AccidentCategory::RearCollision);

    // Side evidence with no competing strong direction wins outright, even
    // when the raw score comparison would stay undecidable.
    if has_side_part
        && !has_strong_front
        && !has_strong_rear
        && front < rules.side_correction_cutoff
        && rear < rules.side_correction_cutoff
    {
        return AccidentType::SideCollision;
    }

    // A second vehicle is conclusive regardless of score shape.
    if car_count >= 2 {
        return AccidentType::MultiCollision;
    }

    // One vehicle photographed from several angles, damaged on both ends.
    if mode == AssessmentMode::Multi && car_count == 1 {
        let has_front_region = valid.iter().any(|d| d.region == Some(Region::Front));
        let has_rear_region = valid.iter().any(|d| d.region == Some(Region::Rear));
        if has_front_region && has_rear_region {
            return AccidentType::ComplexDamage;
        }
    }

    match decide_direction(rules, scores) {
        Some(category) => category.into(),
        None => AccidentType::Unknown,
    }
}

/// Whether the direction scores are conclusive enough to name a direction:
/// the top score must reach the minimum, and either be the only non-zero
/// category or lead the runner-up by the minimum gap. Prevents naming a
/// direction from a narrow plurality.
fn decide_direction(rules: &RuleSet, scores: &ScoreBoard) -> Option<AccidentCategory> {
    let mut directions: Vec<(AccidentCategory, f32)> = scores
        .directions()
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .collect();

    if directions.is_empty() {
        return None;
    }

    directions.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (top_category, top) = directions[0];
    if top < rules.decide_min_score {
        return None;
    }
    if directions.len() >= 2 && top - directions[1].1 < rules.decide_min_gap {
        return None;
    }

    Some(top_category)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use damage_core::BoundingBox;
    use proptest::prelude::*;

    fn arb_detection() -> impl Strategy<Value = Detection> {
        let classes = prop::sample::select(vec![
            "Bumper",
            "Fender",
            "Light",
            "Bonnet",
            "Windshield",
            "Door",
            "Trunk",
            "Dickey",
            "Mirror",
        ]);
        let regions = prop::sample::select(vec![Region::Front, Region::Side, Region::Rear]);
        (classes, 0.0f32..=1.0, regions).prop_map(|(class, confidence, region)| {
            let mut d = Detection::new(class, confidence, BoundingBox::new(0, 0, 10, 10));
            d.region = Some(region);
            d
        })
    }

    proptest! {
        #[test]
        fn estimate_is_deterministic_and_consistent(
            detections in prop::collection::vec(arb_detection(), 0..8),
            car_count in 0usize..4,
        ) {
            let rules = RuleSet::default();
            let first = estimate(&rules, &detections, car_count, AssessmentMode::Single);
            let second = estimate(&rules, &detections, car_count, AssessmentMode::Single);
            prop_assert_eq!(&first, &second);

            for value in first.scores.values() {
                prop_assert!(*value >= 0.0);
            }
            // a direction is only ever named for a confirmed accident
            if first.state != AccidentState::ConfirmedAccident {
                prop_assert_eq!(first.accident_type, AccidentType::Unknown);
            }
            prop_assert_eq!(first.detected, first.state == AccidentState::ConfirmedAccident);
        }
    }
}
