use chrono::{DateTime, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::str::FromStr;
use uuid::Uuid;

use crate::distribution::{distribution_profile, GoalType, ZoneDistributionProfile};
use crate::error::ZoneError;
use crate::validation::{NewGoal, Registration};
use crate::zones::{all_zone_ranges, classify_zone, estimate_max_heart_rate, HeartRateZones, Zone};

/// Gender as entered at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Activity types for planned and logged workouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Run,
    Walk,
    Cycle,
    Swim,
    Other,
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "run" | "running" => Ok(ActivityType::Run),
            "walk" | "walking" => Ok(ActivityType::Walk),
            "cycle" | "cycling" | "bike" => Ok(ActivityType::Cycle),
            "swim" | "swimming" => Ok(ActivityType::Swim),
            "other" => Ok(ActivityType::Other),
            _ => Err(format!("Unknown activity type: {}", s)),
        }
    }
}

/// Minutes spent (or planned) in each training zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneMinutes {
    pub zone1: u32,
    pub zone2: u32,
    pub zone3: u32,
    pub zone4: u32,
    pub zone5: u32,
}

impl ZoneMinutes {
    pub fn from_array(minutes: [u32; 5]) -> Self {
        let [zone1, zone2, zone3, zone4, zone5] = minutes;
        Self {
            zone1,
            zone2,
            zone3,
            zone4,
            zone5,
        }
    }

    pub fn as_array(&self) -> [u32; 5] {
        [self.zone1, self.zone2, self.zone3, self.zone4, self.zone5]
    }

    /// Minutes in `zone`; zone 0 is not tracked
    pub fn get(&self, zone: Zone) -> u32 {
        zone.training_index()
            .map(|index| self.as_array()[index])
            .unwrap_or(0)
    }

    /// Sum of all zones, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.as_array().iter().fold(0u32, |sum, &minutes| sum.saturating_add(minutes))
    }

    /// Whole-percent share of each zone: `round(minutes / total * 100)` in
    /// double precision, halves rounded up. All zeros when nothing was recorded.
    pub fn shares(&self) -> [u8; 5] {
        let total = self.total();
        if total == 0 {
            return [0; 5];
        }

        let total = f64::from(total);
        self.as_array()
            .map(|minutes| (f64::from(minutes) / total * 100.0).round() as u8)
    }

    /// Zone with the most minutes, lowest zone on ties, `None` if empty
    pub fn primary_zone(&self) -> Option<Zone> {
        if self.total() == 0 {
            return None;
        }

        let mut best = Zone::Zone1;
        for zone in Zone::TRAINING {
            if self.get(zone) > self.get(best) {
                best = zone;
            }
        }
        Some(best)
    }
}

impl AddAssign for ZoneMinutes {
    fn add_assign(&mut self, other: Self) {
        self.zone1 = self.zone1.saturating_add(other.zone1);
        self.zone2 = self.zone2.saturating_add(other.zone2);
        self.zone3 = self.zone3.saturating_add(other.zone3);
        self.zone4 = self.zone4.saturating_add(other.zone4);
        self.zone5 = self.zone5.saturating_add(other.zone5);
    }
}

/// Registered user with derived heart rate data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,

    /// Height in centimeters
    pub height_cm: Decimal,

    /// Weight in kilograms
    pub weight_kg: Decimal,

    /// Estimated from age at registration, or a measured value
    pub max_heart_rate: u16,

    /// Zone ranges derived from `max_heart_rate`
    pub heart_rate_zones: HeartRateZones,

    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile from a validated registration, estimating max heart
    /// rate from age and deriving the zone ranges from it
    pub fn register(registration: &Registration) -> Self {
        let max_heart_rate = estimate_max_heart_rate(registration.age);

        tracing::info!(
            email = %registration.email,
            age = registration.age,
            max_heart_rate,
            "Registered user profile"
        );

        Self {
            id: Uuid::new_v4(),
            email: registration.email.clone(),
            name: registration.name.clone(),
            age: registration.age,
            gender: registration.gender,
            height_cm: registration.height_cm,
            weight_kg: registration.weight_kg,
            max_heart_rate,
            heart_rate_zones: all_zone_ranges(max_heart_rate),
            created_at: Utc::now(),
        }
    }

    /// Replace the estimate with a measured max heart rate and refresh zones
    pub fn set_max_heart_rate(&mut self, max_heart_rate: u16) {
        self.max_heart_rate = max_heart_rate;
        self.heart_rate_zones = all_zone_ranges(max_heart_rate);
    }

    /// Zone of `heart_rate` relative to this user's max heart rate
    pub fn classify(&self, heart_rate: f64) -> Result<Zone, ZoneError> {
        classify_zone(heart_rate, f64::from(self.max_heart_rate))
    }
}

/// A goal the user is training towards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingGoal {
    pub id: Uuid,
    pub goal_type: GoalType,
    pub custom_description: Option<String>,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl TrainingGoal {
    pub fn new(goal: NewGoal) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_type: goal.goal_type,
            custom_description: goal.custom_description,
            start_date: goal.start_date,
            target_date: goal.target_date,
            created_at: Utc::now(),
        }
    }

    /// Recommended zone split for this goal
    pub fn profile(&self) -> &'static ZoneDistributionProfile {
        distribution_profile(self.goal_type)
    }

    /// Days left until the target date, negative once it has passed
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.target_date.map(|target| (target - today).num_days())
    }
}

/// One workout of a weekly training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// 0 = Sunday through 6 = Saturday
    pub day_of_week: u8,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub activity_type: ActivityType,

    /// Total planned duration in minutes
    pub duration_minutes: u32,

    #[serde(default)]
    pub zone_minutes: ZoneMinutes,
}

/// Weekly plan of workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub goal_type: GoalType,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub workouts: Vec<PlannedWorkout>,
}

fn default_active() -> bool {
    true
}

impl TrainingPlan {
    /// Workout scheduled on `weekday`, if any
    pub fn workout_for(&self, weekday: Weekday) -> Option<&PlannedWorkout> {
        let day = weekday.num_days_from_sunday() as u8;
        self.workouts.iter().find(|w| w.day_of_week == day)
    }
}

/// A completed workout as logged by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub date: NaiveDate,

    #[serde(default)]
    pub activity_type: ActivityType,

    /// Total duration in minutes
    pub duration_minutes: u32,

    #[serde(default)]
    pub average_heart_rate: Option<u16>,

    #[serde(default)]
    pub max_heart_rate: Option<u16>,

    /// Minutes per zone; zones not recorded count as zero
    #[serde(default)]
    pub zone_minutes: ZoneMinutes,

    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutLog {
    /// Zone of the workout's average heart rate, if one was recorded
    pub fn average_zone(&self, max_heart_rate: u16) -> Result<Option<Zone>, ZoneError> {
        self.average_heart_rate
            .map(|hr| classify_zone(f64::from(hr), f64::from(max_heart_rate)))
            .transpose()
    }

    /// Zone where most of the logged time was spent
    pub fn primary_zone(&self) -> Option<Zone> {
        self.zone_minutes.primary_zone()
    }
}
