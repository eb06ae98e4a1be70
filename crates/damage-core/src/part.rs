//! Canonical damaged-part taxonomy and label normalization

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonicalize a raw detector label.
///
/// The damage model was trained across datasets that name the trunk
/// differently ("CAR_TRUNK-KP48", "Dickey"); both collapse to "Trunk".
/// Every other label passes through unchanged, so the function is total and
/// idempotent.
pub fn normalize_label(raw: &str) -> &str {
    match raw {
        "CAR_TRUNK-KP48" | "Dickey" => "Trunk",
        other => other,
    }
}

/// Accident-relevant part classes, as a closed enum.
///
/// Keeping the taxonomy closed lets the rule engine match on parts
/// exhaustively instead of comparing strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DamagePart {
    Bumper,
    Fender,
    Light,
    Bonnet,
    Windshield,
    Door,
    Trunk,
}

impl DamagePart {
    /// Resolve a (possibly raw) label to a canonical part. Labels outside
    /// the taxonomy yield `None` and are treated as non-evidence downstream.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label) {
            "Bumper" => Some(Self::Bumper),
            "Fender" => Some(Self::Fender),
            "Light" => Some(Self::Light),
            "Bonnet" => Some(Self::Bonnet),
            "Windshield" => Some(Self::Windshield),
            "Door" => Some(Self::Door),
            "Trunk" => Some(Self::Trunk),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bumper => "Bumper",
            Self::Fender => "Fender",
            Self::Light => "Light",
            Self::Bonnet => "Bonnet",
            Self::Windshield => "Windshield",
            Self::Door => "Door",
            Self::Trunk => "Trunk",
        }
    }

    /// Parts whose presence alone is near-conclusive frontal evidence
    pub fn is_strong_front(&self) -> bool {
        matches!(self, Self::Bonnet | Self::Windshield)
    }

    /// Parts whose presence alone is near-conclusive rear evidence
    pub fn is_strong_rear(&self) -> bool {
        matches!(self, Self::Trunk)
    }

    /// Any strong directional part (Trunk, Bonnet, Windshield)
    pub fn is_strong(&self) -> bool {
        self.is_strong_front() || self.is_strong_rear()
    }

    /// Parts typical of side impacts (Door, Fender)
    pub fn is_side_typical(&self) -> bool {
        matches!(self, Self::Door | Self::Fender)
    }
}

impl fmt::Display for DamagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
