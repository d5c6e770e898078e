//! Recommended split of training time across zones 1-5 for each goal type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FiveZoneError, Result};
use crate::zones::Zone;

/// Training goal categories a user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    CardioHealth,
    Marathon,
    Sprint,
    Custom,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        GoalType::WeightLoss,
        GoalType::CardioHealth,
        GoalType::Marathon,
        GoalType::Sprint,
        GoalType::Custom,
    ];

    /// Stable tag used in forms, config and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "weight_loss",
            GoalType::CardioHealth => "cardio_health",
            GoalType::Marathon => "marathon",
            GoalType::Sprint => "sprint",
            GoalType::Custom => "custom",
        }
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weight_loss" => Ok(GoalType::WeightLoss),
            "cardio_health" => Ok(GoalType::CardioHealth),
            "marathon" => Ok(GoalType::Marathon),
            "sprint" => Ok(GoalType::Sprint),
            "custom" => Ok(GoalType::Custom),
            _ => Err(format!("Unknown goal type: {}", s)),
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", distribution_profile(*self).name)
    }
}

/// Target percentage of training time per zone for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneDistributionProfile {
    pub goal: GoalType,
    pub name: &'static str,
    /// Percent of time in zones 1-5
    pub distribution: [u8; 5],
    pub description: &'static str,
}

impl ZoneDistributionProfile {
    /// Target percent for `zone`; zone 0 is never a target
    pub fn percent(&self, zone: Zone) -> u8 {
        zone.training_index()
            .map(|index| self.distribution[index])
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.distribution.iter().map(|&p| u32::from(p)).sum()
    }
}

static DISTRIBUTION_PROFILES: [ZoneDistributionProfile; 5] = [
    ZoneDistributionProfile {
        goal: GoalType::WeightLoss,
        name: "Weight Loss & Fat Burning",
        distribution: [30, 50, 15, 5, 0],
        description: "Centred on zones 1-2, where fat burning is most efficient, \
                      with some zone 3 to raise basal metabolism.",
    },
    ZoneDistributionProfile {
        goal: GoalType::CardioHealth,
        name: "Cardio Health & Stamina",
        distribution: [20, 40, 30, 10, 0],
        description: "Built around zone 2 for base endurance, with plenty of zone 3 \
                      to improve cardiorespiratory fitness.",
    },
    ZoneDistributionProfile {
        goal: GoalType::Marathon,
        name: "Marathon & Long-Distance Racing",
        distribution: [25, 45, 20, 8, 2],
        description: "Zones 1-2 for long-duration endurance, plus zones 3-4 close \
                      to race pace.",
    },
    ZoneDistributionProfile {
        goal: GoalType::Sprint,
        name: "Sprint & Short-Distance Speed",
        distribution: [20, 20, 25, 25, 10],
        description: "Lots of high-intensity zone 4-5 work, balanced with zones 1-2 \
                      for recovery and endurance.",
    },
    ZoneDistributionProfile {
        goal: GoalType::Custom,
        name: "Custom",
        distribution: [20, 30, 30, 15, 5],
        description: "A balanced starting split that can be tailored to your goal.",
    },
];

/// Recommended profile for a goal type
pub fn distribution_profile(goal: GoalType) -> &'static ZoneDistributionProfile {
    match goal {
        GoalType::WeightLoss => &DISTRIBUTION_PROFILES[0],
        GoalType::CardioHealth => &DISTRIBUTION_PROFILES[1],
        GoalType::Marathon => &DISTRIBUTION_PROFILES[2],
        GoalType::Sprint => &DISTRIBUTION_PROFILES[3],
        GoalType::Custom => &DISTRIBUTION_PROFILES[4],
    }
}

/// All profiles in goal order
pub fn distribution_profiles() -> &'static [ZoneDistributionProfile] {
    &DISTRIBUTION_PROFILES
}

/// Check that every profile's percentages add up to 100
pub fn validate_profiles() -> Result<()> {
    for profile in distribution_profiles() {
        let total = profile.total();
        if total != 100 {
            return Err(FiveZoneError::Configuration(format!(
                "Zone distribution for {} sums to {}, expected 100",
                profile.goal.as_str(),
                total
            )));
        }
    }
    Ok(())
}
