use serde::{Deserialize, Serialize};

use crate::record::GroundTruth;

/// sRGB colour without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderStyle {
    pub width: f32,
    pub color: Rgb,
}

pub const IMPLAUSIBLE_BORDER: BorderStyle = BorderStyle {
    width: 4.0,
    color: Rgb(220, 38, 38),
};

pub const NEUTRAL_BORDER: BorderStyle = BorderStyle {
    width: 1.0,
    color: Rgb(200, 200, 200),
};

/// Highlight applied to a scene tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Ground truth says the depicted event is physically implausible.
    Implausible,
    Neutral,
}

impl Highlight {
    pub fn for_ground_truth(ground_truth: &GroundTruth) -> Self {
        if ground_truth.is_implausible() {
            Highlight::Implausible
        } else {
            Highlight::Neutral
        }
    }

    pub fn border(self) -> BorderStyle {
        match self {
            Highlight::Implausible => IMPLAUSIBLE_BORDER,
            Highlight::Neutral => NEUTRAL_BORDER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Implausible => "implausible",
            Highlight::Neutral => "neutral",
        }
    }
}
