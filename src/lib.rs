// Library interface for FiveZone modules
// Heart rate zone model plus the records and aggregation built on top of it

pub mod config;
pub mod dashboard;
pub mod descriptions;
pub mod distribution;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod validation;
pub mod zones;

// Re-export commonly used types for convenience
pub use dashboard::{Dashboard, DashboardSettings, ZoneComparison};
pub use descriptions::{zone_description, zone_descriptions, ZoneDescription};
pub use distribution::{distribution_profile, distribution_profiles, GoalType, ZoneDistributionProfile};
pub use error::{FiveZoneError, Result, ValidationErrors, ZoneError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{TrainingGoal, TrainingPlan, UserProfile, WorkoutLog, ZoneMinutes};
pub use zones::{
    all_zone_ranges, classify_zone, estimate_max_heart_rate, zone_range, HeartRateZones, Zone,
    ZoneAnalyzer, ZoneRange,
};
