use chrono::NaiveDate;
use fivezone::dashboard::{Dashboard, DashboardSettings};
use fivezone::error::{FiveZoneError, ImportError};
use fivezone::import::{import_workout_logs, load_training_plan};
use fivezone::models::{ActivityType, TrainingGoal, UserProfile};
use fivezone::validation::{GoalInput, RegistrationInput, ValidationSettings, WorkoutLogInput};
use fivezone::{GoalType, Zone};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// End-to-end workflows: register, set a goal, import logs, build the dashboard

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const WEEK_CSV: &str = "\
Date,Activity,Duration,Avg HR,Zone1,Zone2,Zone3,Zone4,Zone5,Notes
2024-05-07,run,60,140,10,30,15,5,0,Easy run with strides
2024-05-05,cycle,90,128,20,50,20,0,0,
2024-04-20,run,30,150,0,0,30,0,0,Outside the window
";

const PLAN_JSON: &str = r#"{
    "name": "Base building",
    "goal_type": "weight_loss",
    "workouts": [
        {
            "day_of_week": 3,
            "name": "Tempo run",
            "description": "Steady effort after warm-up",
            "activity_type": "run",
            "duration_minutes": 45,
            "zone_minutes": { "zone2": 15, "zone3": 30 }
        },
        {
            "day_of_week": 6,
            "name": "Long ride",
            "activity_type": "cycle",
            "duration_minutes": 120,
            "zone_minutes": { "zone2": 120 }
        }
    ]
}"#;

#[test]
fn test_registration_to_classification() {
    let input = RegistrationInput {
        email: "runner@example.com".to_string(),
        password: "secret123".to_string(),
        name: "Test Runner".to_string(),
        age: "40".to_string(),
        gender: "female".to_string(),
        height: "165".to_string(),
        weight: "58".to_string(),
    };

    let registration = input.validate(&ValidationSettings::default()).unwrap();
    let profile = UserProfile::register(&registration);

    assert_eq!(profile.max_heart_rate, 185);
    assert_eq!(profile.heart_rate_zones.zone3.min, 130);
    assert_eq!(profile.classify(145.0).unwrap(), Zone::Zone3);
}

#[test]
fn test_dashboard_from_imported_files() {
    let logs_file = temp_file(".csv", WEEK_CSV);
    let plan_file = temp_file(".json", PLAN_JSON);

    let logs = import_workout_logs(logs_file.path(), &ValidationSettings::default()).unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[1].activity_type, ActivityType::Cycle);
    assert_eq!(logs[1].notes, None);

    let plan = load_training_plan(plan_file.path()).unwrap();
    assert!(plan.is_active);

    let goal = GoalInput {
        goal_type: "weight-loss".to_string(),
        custom_description: None,
        start_date: "2024-05-01".to_string(),
        target_date: Some("2024-08-01".to_string()),
    }
    .validate(&ValidationSettings::default())
    .unwrap();
    let goal = TrainingGoal::new(goal);

    // Wednesday
    let today = date(2024, 5, 8);
    let dashboard = Dashboard::build(
        185,
        &[goal],
        &[plan],
        &logs,
        today,
        &DashboardSettings::default(),
    );

    let workout = dashboard.todays_workout.as_ref().unwrap();
    assert_eq!(workout.name, "Tempo run");
    assert_eq!(workout.zone_minutes.get(Zone::Zone3), 30);

    assert_eq!(dashboard.weekly_totals.as_array(), [30, 80, 35, 5, 0]);
    assert_eq!(dashboard.weekly_shares, [20, 53, 23, 3, 0]);
    assert_eq!(dashboard.weekly_totals.primary_zone(), Some(Zone::Zone2));

    let differences: Vec<i16> = dashboard
        .comparison
        .as_ref()
        .unwrap()
        .iter()
        .map(|comparison| comparison.difference())
        .collect();
    assert_eq!(differences, vec![-10, 3, 8, -2, 0]);

    assert_eq!(dashboard.recent_logs.first().unwrap().date, date(2024, 5, 7));
    assert_eq!(dashboard.goal.as_ref().unwrap().goal_type, GoalType::WeightLoss);
}

#[test]
fn test_logged_form_joins_imported_logs() {
    let logs_file = temp_file(".json", r#"[{"date": "2024-05-06", "duration_minutes": 40, "zone_minutes": {"zone2": 40}}]"#);
    let mut logs = import_workout_logs(logs_file.path(), &ValidationSettings::default()).unwrap();

    let entered = WorkoutLogInput {
        date: "2024-05-08".to_string(),
        activity_type: "walk".to_string(),
        duration: "30".to_string(),
        average_heart_rate: Some("105".to_string()),
        max_heart_rate: None,
        zone_minutes: [Some("30".to_string()), None, None, None, None],
        notes: None,
    }
    .validate(&ValidationSettings::default())
    .unwrap();
    logs.push(entered);

    let dashboard = Dashboard::build(185, &[], &[], &logs, date(2024, 5, 8), &DashboardSettings::default());

    assert!(dashboard.comparison.is_none());
    assert!(dashboard.todays_workout.is_none());
    assert_eq!(dashboard.weekly_totals.total(), 70);
    assert_eq!(dashboard.recent_logs[0].activity_type, ActivityType::Walk);
    assert_eq!(dashboard.recent_logs[0].average_zone(185).unwrap(), Some(Zone::Zone1));
}

#[test]
fn test_import_failures_are_reported() {
    let settings = ValidationSettings::default();
    let missing = import_workout_logs(std::path::Path::new("/nonexistent/logs.csv"), &settings).unwrap_err();
    assert!(matches!(missing, FiveZoneError::Import(ImportError::FileNotFound { .. })));
    assert!(missing.user_message().contains("logs.csv"));

    let bad_row = temp_file(".csv", "date,duration\n2024-05-01,sixty\n");
    let error = import_workout_logs(bad_row.path(), &ValidationSettings::default()).unwrap_err();
    match error {
        FiveZoneError::Import(ImportError::ParseError { location, .. }) => assert_eq!(location, "line 2"),
        other => panic!("unexpected error: {other}"),
    }

    let overfull = temp_file(".csv", "date,duration,zone1,zone2\n2024-05-01,30,4294967295,1\n");
    match import_workout_logs(overfull.path(), &ValidationSettings::default()).unwrap_err() {
        FiveZoneError::Import(ImportError::ParseError { location, reason, .. }) => {
            assert_eq!(location, "line 2");
            assert!(reason.contains("cannot exceed the workout duration"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let no_duration = temp_file(".csv", "date,avg_hr\n2024-05-01,140\n");
    assert!(matches!(
        import_workout_logs(no_duration.path(), &ValidationSettings::default()).unwrap_err(),
        FiveZoneError::Import(ImportError::MissingColumn { .. })
    ));
}
