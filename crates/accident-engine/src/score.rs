//! Score accumulation over valid detections

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use damage_core::{Detection, Region};

use crate::rules::RuleSet;

/// Accident score categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccidentCategory {
    FrontCollision,
    RearCollision,
    SideCollision,
    MultiCollision,
}

/// Accumulated per-category scores for one assessment call.
///
/// Built fresh per call and never persisted; all entries stay non-negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    front: f32,
    rear: f32,
    side: f32,
    multi: f32,
}

impl ScoreBoard {
    pub fn get(&self, category: AccidentCategory) -> f32 {
        match category {
            AccidentCategory::FrontCollision => self.front,
            AccidentCategory::RearCollision => self.rear,
            AccidentCategory::SideCollision => self.side,
            AccidentCategory::MultiCollision => self.multi,
        }
    }

    pub fn add(&mut self, category: AccidentCategory, amount: f32) {
        let slot = match category {
            AccidentCategory::FrontCollision => &mut self.front,
            AccidentCategory::RearCollision => &mut self.rear,
            AccidentCategory::SideCollision => &mut self.side,
            AccidentCategory::MultiCollision => &mut self.multi,
        };
        *slot += amount;
    }

    pub fn scale(&mut self, category: AccidentCategory, factor: f32) {
        let scaled = self.get(category) * factor;
        match category {
            AccidentCategory::FrontCollision => self.front = scaled,
            AccidentCategory::RearCollision => self.rear = scaled,
            AccidentCategory::SideCollision => self.side = scaled,
            AccidentCategory::MultiCollision => self.multi = scaled,
        }
    }

    /// The three directional categories and their scores, in a fixed order.
    pub fn directions(&self) -> [(AccidentCategory, f32); 3] {
        [
            (AccidentCategory::FrontCollision, self.front),
            (AccidentCategory::RearCollision, self.rear),
            (AccidentCategory::SideCollision, self.side),
        ]
    }

    /// Non-zero entries, keyed for serialization into the assessment.
    pub fn snapshot(&self) -> BTreeMap<AccidentCategory, f32> {
        let mut map = BTreeMap::new();
        for category in [
            AccidentCategory::FrontCollision,
            AccidentCategory::RearCollision,
            AccidentCategory::SideCollision,
            AccidentCategory::MultiCollision,
        ] {
            let value = self.get(category);
            if value > 0.0 {
                map.insert(category, value);
            }
        }
        map
    }
}

/// Accumulate rule weights over the valid detections.
///
/// Every weight is multiplied by the detection's confidence. After
/// accumulation two adjustments apply: the flat multi-collision bonus when
/// both ends of the vehicle show damage, and the weak-front dampening when
/// a front score rests on bumper/light/fender evidence alone.
pub(crate) fn score_detections(rules: &RuleSet, valid: &[&Detection]) -> ScoreBoard {
    let mut scores = ScoreBoard::default();

    for detection in valid {
        let (Some(part), Some(region)) = (detection.part(), detection.region) else {
            continue;
        };
        let conf = detection.confidence;

        if let Some((category, weight)) = rules.part_only_weight(part) {
            scores.add(category, weight * conf);
        }
        if let Some((category, weight)) = rules.region_part_weight(region, part) {
            scores.add(category, weight * conf);
        }
        if let Some(bonus) = rules.side_bonus_weight(part) {
            if rules.side_bonus_policy.applies(region) {
                scores.add(AccidentCategory::SideCollision, bonus * conf);
            }
        }
    }

    let has_front = valid.iter().any(|d| d.region == Some(Region::Front));
    let has_rear = valid.iter().any(|d| d.region == Some(Region::Rear));
    if has_front && has_rear {
        scores.add(AccidentCategory::MultiCollision, rules.multi_collision_bonus);
    }

    let has_strong_front = valid
        .iter()
        .any(|d| d.part().is_some_and(|p| p.is_strong_front()));
    if scores.get(AccidentCategory::FrontCollision) > 0.0 && !has_strong_front {
        scores.scale(AccidentCategory::FrontCollision, rules.weak_front_factor);
    }

    scores
}
