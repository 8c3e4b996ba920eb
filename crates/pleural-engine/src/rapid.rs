//! RAPID score for pleural infection

use crate::input::RapidInputs;
use crate::reference::{Reference, RAHMAN_2014};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Risk band derived from the RAPID score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// 0-1
    Low,
    /// 2-3
    Medium,
    /// 4-5
    High,
}

impl RiskBand {
    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }

    pub fn reference(self) -> Reference {
        RAHMAN_2014
    }
}

/// Highest possible RAPID score
pub const MAX_SCORE: u8 = 5;

/// RAPID score, 0 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RapidScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("RAPID score {0} is above 5")]
pub struct RapidScoreOutOfRange(pub u8);

impl TryFrom<u8> for RapidScore {
    type Error = RapidScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_SCORE {
            return Err(RapidScoreOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<RapidScore> for u8 {
    fn from(score: RapidScore) -> u8 {
        score.0
    }
}

impl RapidScore {
    /// Count of "Yes" answers
    pub fn from_inputs(inputs: &RapidInputs) -> Self {
        let count = inputs
            .components()
            .iter()
            .filter(|(_, answer)| answer.is_yes())
            .count();
        Self(count as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> RiskBand {
        match self.0 {
            0..=1 => RiskBand::Low,
            2..=3 => RiskBand::Medium,
            _ => RiskBand::High,
        }
    }
}
