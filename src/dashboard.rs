//! Dashboard aggregation over a user's goals, plans and workout logs

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distribution::{distribution_profile, GoalType};
use crate::models::{PlannedWorkout, TrainingGoal, TrainingPlan, WorkoutLog, ZoneMinutes};
use crate::zones::{all_zone_ranges, HeartRateZones, Zone};

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Days counted as "this week" when totalling zone time
    pub window_days: u32,

    /// Number of recent workout logs listed
    pub recent_log_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            window_days: 7,
            recent_log_limit: 5,
        }
    }
}

/// Actual share of one zone next to the goal's target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneComparison {
    pub zone: Zone,
    pub actual_percent: u8,
    pub target_percent: u8,
}

impl ZoneComparison {
    /// Positive when more time than recommended went into the zone
    pub fn difference(&self) -> i16 {
        i16::from(self.actual_percent) - i16::from(self.target_percent)
    }
}

/// Sum zone minutes of logs dated within `window_days` before `today`
pub fn weekly_zone_totals(logs: &[WorkoutLog], today: NaiveDate, window_days: u32) -> ZoneMinutes {
    let since = today - Duration::days(i64::from(window_days));

    let mut totals = ZoneMinutes::default();
    for log in logs.iter().filter(|log| log.date >= since) {
        totals += log.zone_minutes;
    }

    debug!(%since, total_minutes = totals.total(), "Aggregated weekly zone totals");
    totals
}

/// Planned workout for today's weekday (Sunday = 0)
pub fn todays_workout(plan: &TrainingPlan, today: NaiveDate) -> Option<&PlannedWorkout> {
    plan.workout_for(today.weekday())
}

/// Compare actual zone shares with the recommended split for `goal`
pub fn compare_with_profile(totals: &ZoneMinutes, goal: GoalType) -> Vec<ZoneComparison> {
    let profile = distribution_profile(goal);
    let shares = totals.shares();

    Zone::TRAINING
        .iter()
        .zip(shares)
        .map(|(&zone, actual_percent)| ZoneComparison {
            zone,
            actual_percent,
            target_percent: profile.percent(zone),
        })
        .collect()
}

/// Everything shown on the dashboard page
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub max_heart_rate: u16,
    pub zones: HeartRateZones,
    pub goal: Option<TrainingGoal>,
    pub active_plan: Option<TrainingPlan>,
    pub todays_workout: Option<PlannedWorkout>,
    pub recent_logs: Vec<WorkoutLog>,
    pub weekly_totals: ZoneMinutes,
    pub weekly_shares: [u8; 5],
    pub comparison: Option<Vec<ZoneComparison>>,
}

impl Dashboard {
    /// Assemble the dashboard for `today`.
    ///
    /// Uses the most recently created goal and active plan. Weekly totals cover
    /// every log in the window, not only the ones listed as recent.
    pub fn build(
        max_heart_rate: u16,
        goals: &[TrainingGoal],
        plans: &[TrainingPlan],
        logs: &[WorkoutLog],
        today: NaiveDate,
        settings: &DashboardSettings,
    ) -> Self {
        let goal = goals.iter().max_by_key(|goal| goal.created_at).cloned();

        let active_plan = plans
            .iter()
            .filter(|plan| plan.is_active)
            .max_by_key(|plan| plan.created_at)
            .cloned();

        let todays_workout = active_plan
            .as_ref()
            .and_then(|plan| todays_workout(plan, today))
            .cloned();

        let mut recent_logs = logs.to_vec();
        recent_logs.sort_by(|a, b| b.date.cmp(&a.date));
        recent_logs.truncate(settings.recent_log_limit);

        let weekly_totals = weekly_zone_totals(logs, today, settings.window_days);
        let comparison = goal
            .as_ref()
            .map(|goal| compare_with_profile(&weekly_totals, goal.goal_type));

        Self {
            max_heart_rate,
            zones: all_zone_ranges(max_heart_rate),
            goal,
            active_plan,
            todays_workout,
            recent_logs,
            weekly_totals,
            weekly_shares: weekly_totals.shares(),
            comparison,
        }
    }
}
