//! Typed validation of user-submitted forms
//!
//! Each form arrives as raw strings (`*Input`) and is validated once into a
//! typed value. Every failing field is reported, not just the first one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::distribution::GoalType;
use crate::error::ValidationErrors;
use crate::models::{ActivityType, Gender, WorkoutLog, ZoneMinutes};

/// Bounds applied to submitted forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub age_min: u8,
    pub age_max: u8,
    pub height_min_cm: u16,
    pub height_max_cm: u16,
    pub weight_min_kg: u16,
    pub weight_max_kg: u16,
    pub password_min_length: usize,
    pub custom_description_min_length: usize,
    pub heart_rate_min: u16,
    pub heart_rate_max: u16,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            age_min: 10,
            age_max: 100,
            height_min_cm: 100,
            height_max_cm: 250,
            weight_min_kg: 30,
            weight_max_kg: 300,
            password_min_length: 6,
            custom_description_min_length: 5,
            heart_rate_min: 30,
            heart_rate_max: 250,
        }
    }
}

/// Raw registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
}

/// Registration that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    /// Plain password, to be hashed by the storage layer
    pub password: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
}

impl RegistrationInput {
    pub fn validate(&self, settings: &ValidationSettings) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.add("email", "Enter a valid email address");
        }

        if self.password.chars().count() < settings.password_min_length {
            errors.add(
                "password",
                format!("Password must be at least {} characters", settings.password_min_length),
            );
        }

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        let age = match self.age.trim().parse::<i64>() {
            Ok(age) if age < i64::from(settings.age_min) => {
                errors.add("age", format!("Age must be at least {}", settings.age_min));
                None
            }
            Ok(age) if age > i64::from(settings.age_max) => {
                errors.add("age", format!("Age must be at most {}", settings.age_max));
                None
            }
            Ok(age) => u8::try_from(age).ok(),
            Err(_) => {
                errors.add("age", "Age must be a whole number");
                None
            }
        };

        let gender = match self.gender.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(_) => {
                errors.add("gender", "Select a gender");
                None
            }
        };

        let height = parse_bounded(
            &self.height,
            settings.height_min_cm,
            settings.height_max_cm,
            "Height",
            "cm",
        )
        .map_err(|message| errors.add("height", message))
        .ok();

        let weight = parse_bounded(
            &self.weight,
            settings.weight_min_kg,
            settings.weight_max_kg,
            "Weight",
            "kg",
        )
        .map_err(|message| errors.add("weight", message))
        .ok();

        match (age, gender, height, weight) {
            (Some(age), Some(gender), Some(height_cm), Some(weight_kg)) if errors.is_empty() => {
                Ok(Registration {
                    email: email.to_string(),
                    password: self.password.clone(),
                    name: name.to_string(),
                    age,
                    gender,
                    height_cm,
                    weight_kg,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw goal form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalInput {
    pub goal_type: String,
    pub custom_description: Option<String>,
    pub start_date: String,
    pub target_date: Option<String>,
}

/// Goal that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub goal_type: GoalType,
    /// Only kept for custom goals
    pub custom_description: Option<String>,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
}

impl GoalInput {
    pub fn validate(&self, settings: &ValidationSettings) -> Result<NewGoal, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let goal_type = match self.goal_type.parse::<GoalType>() {
            Ok(goal_type) => Some(goal_type),
            Err(_) => {
                errors.add("goal_type", "Select a goal type");
                None
            }
        };

        let description = non_empty(self.custom_description.as_deref());
        let custom_description = match goal_type {
            Some(GoalType::Custom) => match description {
                None => {
                    errors.add("custom_description", "A custom goal needs a description");
                    None
                }
                Some(text) if text.chars().count() < settings.custom_description_min_length => {
                    errors.add(
                        "custom_description",
                        format!(
                            "Goal description must be at least {} characters",
                            settings.custom_description_min_length
                        ),
                    );
                    None
                }
                Some(text) => Some(text.to_string()),
            },
            _ => None,
        };

        let start_date = match non_empty(Some(&self.start_date)) {
            None => {
                errors.add("start_date", "Start date is required");
                None
            }
            Some(text) => parse_date(text)
                .map_err(|message| errors.add("start_date", message))
                .ok(),
        };

        let target_date = match non_empty(self.target_date.as_deref()) {
            None => None,
            Some(text) => parse_date(text)
                .map_err(|message| errors.add("target_date", message))
                .ok(),
        };

        if let (Some(start), Some(target)) = (start_date, target_date) {
            if target < start {
                errors.add("target_date", "Target date cannot be before the start date");
            }
        }

        match (goal_type, start_date) {
            (Some(goal_type), Some(start_date)) if errors.is_empty() => Ok(NewGoal {
                goal_type,
                custom_description,
                start_date,
                target_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw workout log form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutLogInput {
    pub date: String,
    pub activity_type: String,
    pub duration: String,
    pub average_heart_rate: Option<String>,
    pub max_heart_rate: Option<String>,
    /// Minutes in zones 1-5, blank when not recorded
    pub zone_minutes: [Option<String>; 5],
    pub notes: Option<String>,
}

impl WorkoutLogInput {
    pub fn validate(&self, settings: &ValidationSettings) -> Result<WorkoutLog, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let date = match non_empty(Some(&self.date)) {
            None => {
                errors.add("date", "Date is required");
                None
            }
            Some(text) => parse_date(text).map_err(|message| errors.add("date", message)).ok(),
        };

        let activity_type = match non_empty(Some(&self.activity_type)) {
            None => ActivityType::default(),
            Some(text) => text.parse::<ActivityType>().unwrap_or_else(|message| {
                errors.add("activity_type", message);
                ActivityType::default()
            }),
        };

        let duration = match self.duration.trim().parse::<u32>() {
            Ok(minutes) => {
                check_duration(minutes, &mut errors);
                Some(minutes).filter(|&minutes| minutes > 0)
            }
            Err(_) => {
                errors.add("duration", DURATION_MESSAGE);
                None
            }
        };

        let mut heart_rate = |field: &str, value: Option<&str>| -> Option<u16> {
            let bpm = match non_empty(value)?.parse::<u16>() {
                Ok(bpm) => bpm,
                Err(_) => {
                    errors.add(field, heart_rate_message(settings));
                    return None;
                }
            };
            check_heart_rate(field, Some(bpm), settings, &mut errors);
            Some(bpm)
        };
        let average_heart_rate = heart_rate("average_heart_rate", self.average_heart_rate.as_deref());
        let max_heart_rate = heart_rate("max_heart_rate", self.max_heart_rate.as_deref());

        let mut minutes = [0u32; 5];
        for (index, value) in self.zone_minutes.iter().enumerate() {
            if let Some(text) = non_empty(value.as_deref()) {
                match text.parse::<u32>() {
                    Ok(value) => minutes[index] = value,
                    Err(_) => errors.add(
                        format!("zone{}_minutes", index + 1),
                        "Zone minutes must be a whole number",
                    ),
                }
            }
        }
        let zone_minutes = ZoneMinutes::from_array(minutes);

        if let Some(duration) = duration {
            check_zone_minutes(&zone_minutes, duration, &mut errors);
        }

        match (date, duration) {
            (Some(date), Some(duration_minutes)) if errors.is_empty() => Ok(WorkoutLog {
                id: Uuid::new_v4(),
                date,
                activity_type,
                duration_minutes,
                average_heart_rate,
                max_heart_rate,
                zone_minutes,
                notes: non_empty(self.notes.as_deref()).map(str::to_string),
            }),
            _ => Err(errors),
        }
    }
}

const DURATION_MESSAGE: &str = "Duration must be a positive number of minutes";

/// Range rules for an already parsed workout log.
///
/// Applied to form input and to imported files alike.
pub fn check_workout_log(log: &WorkoutLog, settings: &ValidationSettings) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_duration(log.duration_minutes, &mut errors);
    check_heart_rate("average_heart_rate", log.average_heart_rate, settings, &mut errors);
    check_heart_rate("max_heart_rate", log.max_heart_rate, settings, &mut errors);
    check_zone_minutes(&log.zone_minutes, log.duration_minutes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_duration(minutes: u32, errors: &mut ValidationErrors) {
    if minutes == 0 {
        errors.add("duration", DURATION_MESSAGE);
    }
}

fn heart_rate_message(settings: &ValidationSettings) -> String {
    format!(
        "Heart rate must be between {} and {} bpm",
        settings.heart_rate_min, settings.heart_rate_max
    )
}

fn check_heart_rate(field: &str, bpm: Option<u16>, settings: &ValidationSettings, errors: &mut ValidationErrors) {
    if let Some(bpm) = bpm {
        if !(settings.heart_rate_min..=settings.heart_rate_max).contains(&bpm) {
            errors.add(field, heart_rate_message(settings));
        }
    }
}

fn check_zone_minutes(zone_minutes: &ZoneMinutes, duration: u32, errors: &mut ValidationErrors) {
    if zone_minutes.total() > duration {
        errors.add("zone_minutes", "Time in zones cannot exceed the workout duration");
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", text))
}

fn parse_bounded(text: &str, min: u16, max: u16, label: &str, unit: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(text.trim()).map_err(|_| format!("{} must be a number", label))?;
    if value < Decimal::from(min) {
        return Err(format!("{} must be at least {}{}", label, min, unit));
    }
    if value > Decimal::from(max) {
        return Err(format!("{} must be at most {}{}", label, max, unit));
    }
    Ok(value)
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_registration() -> RegistrationInput {
        RegistrationInput {
            email: "runner@example.com".to_string(),
            password: "secret123".to_string(),
            name: "Test Runner".to_string(),
            age: "30".to_string(),
            gender: "male".to_string(),
            height: "178".to_string(),
            weight: "72.5".to_string(),
        }
    }

    fn valid_goal() -> GoalInput {
        GoalInput {
            goal_type: "weight_loss".to_string(),
            custom_description: None,
            start_date: "2024-05-01".to_string(),
            target_date: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        let registration = valid_registration().validate(&ValidationSettings::default()).unwrap();
        assert_eq!(registration.age, 30);
        assert_eq!(registration.gender, Gender::Male);
        assert_eq!(registration.weight_kg, dec!(72.5));
    }

    #[test]
    fn test_registration_age_bounds() {
        let settings = ValidationSettings::default();

        for (age, ok) in [("9", false), ("10", true), ("100", true), ("101", false), ("-3", false)] {
            let mut input = valid_registration();
            input.age = age.to_string();
            assert_eq!(input.validate(&settings).is_ok(), ok, "age {}", age);
        }

        let mut input = valid_registration();
        input.age = "thirty".to_string();
        let errors = input.validate(&settings).unwrap_err();
        assert_eq!(errors.get("age"), Some("Age must be a whole number"));
    }

    #[test]
    fn test_registration_collects_every_field_error() {
        let input = RegistrationInput {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            name: "  ".to_string(),
            age: "5".to_string(),
            gender: "robot".to_string(),
            height: "90".to_string(),
            weight: "301".to_string(),
        };

        let errors = input.validate(&ValidationSettings::default()).unwrap_err();
        for field in ["email", "password", "name", "age", "gender", "height", "weight"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert_eq!(errors.get("height"), Some("Height must be at least 100cm"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@example."));
    }

    #[test]
    fn test_custom_goal_requires_description() {
        let settings = ValidationSettings::default();

        let mut input = valid_goal();
        input.goal_type = "custom".to_string();
        let errors = input.validate(&settings).unwrap_err();
        assert!(errors.contains("custom_description"));

        input.custom_description = Some("5km".to_string());
        let errors = input.validate(&settings).unwrap_err();
        assert!(errors.get("custom_description").unwrap().contains("at least 5"));

        input.custom_description = Some("Run a sub-25 5km".to_string());
        let goal = input.validate(&settings).unwrap();
        assert_eq!(goal.custom_description.as_deref(), Some("Run a sub-25 5km"));
    }

    #[test]
    fn test_description_dropped_for_other_goal_types() {
        let mut input = valid_goal();
        input.custom_description = Some("x".to_string());
        let goal = input.validate(&ValidationSettings::default()).unwrap();
        assert_eq!(goal.goal_type, GoalType::WeightLoss);
        assert!(goal.custom_description.is_none());
    }

    #[test]
    fn test_goal_dates() {
        let settings = ValidationSettings::default();

        let mut input = valid_goal();
        input.start_date = " ".to_string();
        assert!(input.validate(&settings).unwrap_err().contains("start_date"));

        let mut input = valid_goal();
        input.target_date = Some("2024-04-30".to_string());
        assert!(input.validate(&settings).unwrap_err().contains("target_date"));

        let mut input = valid_goal();
        input.target_date = Some("".to_string());
        assert!(input.validate(&settings).unwrap().target_date.is_none());

        let mut input = valid_goal();
        input.start_date = "01/05/2024".to_string();
        assert!(input.validate(&settings).is_err());
    }

    #[test]
    fn test_unknown_goal_type() {
        let mut input = valid_goal();
        input.goal_type = "triathlon".to_string();
        let errors = input.validate(&ValidationSettings::default()).unwrap_err();
        assert_eq!(errors.get("goal_type"), Some("Select a goal type"));
    }

    #[test]
    fn test_workout_log_input() {
        let settings = ValidationSettings::default();
        let input = WorkoutLogInput {
            date: "2024-05-02".to_string(),
            activity_type: "cycle".to_string(),
            duration: "60".to_string(),
            average_heart_rate: Some("142".to_string()),
            max_heart_rate: Some("".to_string()),
            zone_minutes: [
                Some("10".to_string()),
                Some("30".to_string()),
                Some("20".to_string()),
                None,
                Some(" ".to_string()),
            ],
            notes: Some("Hilly loop".to_string()),
        };

        let log = input.validate(&settings).unwrap();
        assert_eq!(log.activity_type, ActivityType::Cycle);
        assert_eq!(log.average_heart_rate, Some(142));
        assert_eq!(log.max_heart_rate, None);
        assert_eq!(log.zone_minutes.as_array(), [10, 30, 20, 0, 0]);

        let mut too_long = input.clone();
        too_long.duration = "45".to_string();
        assert!(too_long.validate(&settings).unwrap_err().contains("zone_minutes"));

        let mut bad_hr = input.clone();
        bad_hr.average_heart_rate = Some("400".to_string());
        assert!(bad_hr.validate(&settings).unwrap_err().contains("average_heart_rate"));

        let mut no_duration = input;
        no_duration.duration = "0".to_string();
        assert!(no_duration.validate(&settings).unwrap_err().contains("duration"));
    }

    #[test]
    fn test_check_workout_log() {
        let settings = ValidationSettings::default();
        let mut log = WorkoutLog {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            activity_type: ActivityType::Run,
            duration_minutes: 40,
            average_heart_rate: Some(150),
            max_heart_rate: Some(178),
            zone_minutes: ZoneMinutes::from_array([10, 30, 0, 0, 0]),
            notes: None,
        };
        assert!(check_workout_log(&log, &settings).is_ok());

        log.max_heart_rate = Some(20);
        log.zone_minutes = ZoneMinutes::from_array([u32::MAX, 1, 0, 0, 0]);
        let errors = check_workout_log(&log, &settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("max_heart_rate"));
        assert!(errors.contains("zone_minutes"));
    }
}
