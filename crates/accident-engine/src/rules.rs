//! Declarative, versioned scoring rules
//!
//! All weights, bonuses, and thresholds used by the scoring and decision
//! stages live here as data. The engine itself is a pure function over one
//! `RuleSet`, so tuning never touches control flow and the whole table can
//! be reviewed (or loaded from JSON) in one place.

use serde::{Deserialize, Serialize};

use damage_core::{DamagePart, Region};

use crate::score::AccidentCategory;
use crate::EngineError;

/// One region-independent rule: the part alone is directional evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRule {
    pub part: DamagePart,
    pub category: AccidentCategory,
    pub weight: f32,
}

/// One corroborating rule keyed on (region, part).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPartRule {
    pub region: Region,
    pub part: DamagePart,
    pub category: AccidentCategory,
    pub weight: f32,
}

/// Extra side-collision weight for side-typical parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBonusRule {
    pub part: DamagePart,
    pub weight: f32,
}

/// Which regions earn the side bonus.
///
/// The two historical copies of the scoring logic disagreed here: one
/// applied the bonus only to side-region detections, the other to anything
/// outside the front region. Both behaviors stay selectable until field
/// data settles which was intended; the default is the stricter, later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideBonusPolicy {
    #[default]
    SideRegionOnly,
    NonFrontRegion,
}

impl SideBonusPolicy {
    pub fn applies(self, region: Region) -> bool {
        match self {
            Self::SideRegionOnly => region == Region::Side,
            Self::NonFrontRegion => region != Region::Front,
        }
    }
}

/// The complete rule table driving scoring and decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Bumped whenever the tables change shape or meaning
    pub version: u32,

    pub part_only: Vec<PartRule>,
    pub region_part: Vec<RegionPartRule>,
    pub side_bonus: Vec<SideBonusRule>,
    pub side_bonus_policy: SideBonusPolicy,

    /// Evidence floor: detections below this confidence are noise and do
    /// not count as damage at all
    pub min_confidence: f32,
    /// A direction is only named when the top score reaches this
    pub decide_min_score: f32,
    /// ... and leads the runner-up by at least this
    pub decide_min_gap: f32,
    /// Flat bonus to MULTI_COLLISION when front and rear are both damaged
    pub multi_collision_bonus: f32,
    /// Dampening factor for a front score with no strong front part behind it
    pub weak_front_factor: f32,
    /// Side correction fires only while front and rear scores stay below this
    pub side_correction_cutoff: f32,
}

impl RuleSet {
    /// Parse a rule set from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub(crate) fn part_only_weight(&self, part: DamagePart) -> Option<(AccidentCategory, f32)> {
        self.part_only
            .iter()
            .find(|r| r.part == part)
            .map(|r| (r.category, r.weight))
    }

    pub(crate) fn region_part_weight(
        &self,
        region: Region,
        part: DamagePart,
    ) -> Option<(AccidentCategory, f32)> {
        self.region_part
            .iter()
            .find(|r| r.region == region && r.part == part)
            .map(|r| (r.category, r.weight))
    }

    pub(crate) fn side_bonus_weight(&self, part: DamagePart) -> Option<f32> {
        self.side_bonus
            .iter()
            .find(|r| r.part == part)
            .map(|r| r.weight)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        use AccidentCategory::{FrontCollision, RearCollision, SideCollision};
        use DamagePart::{Bonnet, Bumper, Door, Fender, Light, Trunk, Windshield};
        use Region::{Front, Rear, Side};

        let part = |part, category, weight| PartRule {
            part,
            category,
            weight,
        };
        let region_part = |region, part, category, weight| RegionPartRule {
            region,
            part,
            category,
            weight,
        };

        Self {
            version: 1,
            part_only: vec![
                // near-conclusive directional evidence
                part(Bonnet, FrontCollision, 4.0),
                part(Windshield, FrontCollision, 4.0),
                part(Trunk, RearCollision, 4.0),
                // a damaged door alone is weaker proof
                part(Door, SideCollision, 2.0),
            ],
            region_part: vec![
                region_part(Rear, Trunk, RearCollision, 2.5),
                region_part(Rear, Bumper, RearCollision, 2.0),
                region_part(Rear, Light, RearCollision, 1.0),
                region_part(Rear, Fender, RearCollision, 1.0),
                region_part(Side, Door, SideCollision, 1.5),
                region_part(Side, Fender, SideCollision, 1.5),
                region_part(Side, Bumper, SideCollision, 1.0),
                region_part(Side, Light, SideCollision, 1.0),
                region_part(Front, Bumper, FrontCollision, 0.8),
                region_part(Front, Fender, FrontCollision, 1.0),
                region_part(Front, Light, FrontCollision, 1.0),
            ],
            side_bonus: vec![
                SideBonusRule {
                    part: Door,
                    weight: 1.5,
                },
                SideBonusRule {
                    part: Fender,
                    weight: 1.2,
                },
            ],
            side_bonus_policy: SideBonusPolicy::default(),
            min_confidence: 0.2,
            decide_min_score: 2.0,
            decide_min_gap: 1.0,
            multi_collision_bonus: 3.0,
            weak_front_factor: 0.6,
            side_correction_cutoff: 1.0,
        }
    }
}
