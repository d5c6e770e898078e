use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use fivezone::config::AppConfig;
use fivezone::dashboard::Dashboard;
use fivezone::distribution::validate_profiles;
use fivezone::import::{import_workout_logs, load_training_plan};
use fivezone::logging::{init_logging, LogFormat};
use fivezone::validation::NewGoal;
use fivezone::{
    all_zone_ranges, classify_zone, distribution_profile, distribution_profiles,
    estimate_max_heart_rate, zone_description, zone_descriptions, GoalType, TrainingGoal, Zone,
    ZoneAnalyzer,
};

/// FiveZone - Heart Rate Zone Training CLI
///
/// Estimates max heart rate, derives the five training zones and compares
/// logged training time with the recommended split for a goal.
#[derive(Parser)]
#[command(name = "fivezone")]
#[command(author = "FiveZone Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Heart Rate Zone Training CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the max heart rate comes from
#[derive(Args)]
struct MaxHeartRateArgs {
    /// Measured max heart rate in bpm
    #[arg(short, long, conflicts_with = "age")]
    max_hr: Option<u16>,

    /// Age, to estimate max heart rate
    #[arg(short, long)]
    age: Option<u8>,
}

impl MaxHeartRateArgs {
    fn resolve(&self, config: &AppConfig) -> Result<u16> {
        let max_hr = self
            .max_hr
            .or_else(|| self.age.map(estimate_max_heart_rate))
            .or_else(|| config.profile.resolve_max_heart_rate());

        match max_hr {
            Some(0) => bail!("Max heart rate must be positive"),
            Some(max_hr) => Ok(max_hr),
            None => bail!("Provide --max-hr or --age, or set a profile in the config file"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate max heart rate from age (211 - 0.64 x age)
    MaxHr {
        /// Age in years
        #[arg(short, long)]
        age: u8,
    },

    /// Show heart rate ranges of zones 1-5
    Zones {
        #[command(flatten)]
        source: MaxHeartRateArgs,
    },

    /// Classify a heart rate into zone 0-5
    Classify {
        /// Observed heart rate in bpm
        #[arg(long)]
        heart_rate: f64,

        #[command(flatten)]
        source: MaxHeartRateArgs,
    },

    /// Tag a comma-separated series of heart rate samples with zones
    Analyze {
        /// Heart rate samples, e.g. 120,135,150
        #[arg(short, long, value_delimiter = ',', required = true)]
        samples: Vec<u16>,

        #[command(flatten)]
        source: MaxHeartRateArgs,
    },

    /// Describe the training zones
    Describe {
        /// Single zone number (0-5)
        #[arg(short, long)]
        zone: Option<u8>,
    },

    /// Show recommended zone distributions per goal
    Distribution {
        /// Goal type (weight_loss, cardio_health, marathon, sprint, custom)
        #[arg(short, long)]
        goal: Option<GoalType>,
    },

    /// Summarize logged workouts against the zone model
    Dashboard {
        /// Workout log file (CSV or JSON)
        #[arg(short, long)]
        logs: PathBuf,

        /// Training plan file (JSON)
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Goal type to compare against
        #[arg(short, long)]
        goal: Option<GoalType>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        today: Option<NaiveDate>,

        #[command(flatten)]
        source: MaxHeartRateArgs,
    },
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: u8,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "% Max HR")]
    percent: String,
    #[tabled(rename = "Range")]
    range: String,
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Goal")]
    goal: &'static str,
    #[tabled(rename = "Z1")]
    zone1: u8,
    #[tabled(rename = "Z2")]
    zone2: u8,
    #[tabled(rename = "Z3")]
    zone3: u8,
    #[tabled(rename = "Z4")]
    zone4: u8,
    #[tabled(rename = "Z5")]
    zone5: u8,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Zone")]
    zone: u8,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Actual %")]
    actual: u8,
    #[tabled(rename = "Target %")]
    target: String,
    #[tabled(rename = "Diff")]
    difference: String,
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Avg HR")]
    average_hr: String,
    #[tabled(rename = "Avg zone")]
    average_zone: String,
    #[tabled(rename = "Primary zone")]
    primary_zone: String,
}

fn colored_zone(zone: Zone) -> ColoredString {
    let label = format!("{} ({})", zone, zone_description(zone).name);
    match zone {
        Zone::Recovery => label.dimmed(),
        Zone::Zone1 => label.blue(),
        Zone::Zone2 => label.green(),
        Zone::Zone3 => label.yellow(),
        Zone::Zone4 => label.magenta(),
        Zone::Zone5 => label.red().bold(),
    }
}

fn zone_table(max_hr: u16) -> String {
    let zones = all_zone_ranges(max_hr);
    let rows: Vec<ZoneRow> = zones
        .iter()
        .map(|(zone, range)| {
            let (lower, upper) = zone.fractions().unwrap_or_default();
            ZoneRow {
                zone: zone.number(),
                name: zone_description(zone).name,
                percent: format!("{:.0}-{:.0}%", lower * 100.0, upper * 100.0),
                range: range.to_string(),
            }
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let mut log_config = config.logging.clone().with_verbosity(cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    validate_profiles().context("Built-in zone distributions are inconsistent")?;

    match cli.command {
        Commands::MaxHr { age } => {
            let max_hr = estimate_max_heart_rate(age);
            println!("{}", "Estimated max heart rate".green().bold());
            println!("  Age: {}", age);
            println!("  Max HR: {} bpm", max_hr.to_string().bold());
        }

        Commands::Zones { source } => {
            let max_hr = source.resolve(&config)?;
            println!("{}", format!("Heart rate zones for max HR {} bpm", max_hr).blue().bold());
            println!("{}", zone_table(max_hr));
        }

        Commands::Classify { heart_rate, source } => {
            let max_hr = source.resolve(&config)?;
            let zone = classify_zone(heart_rate, f64::from(max_hr))?;
            println!(
                "{} bpm is {:.1}% of max HR {} bpm",
                heart_rate,
                heart_rate / f64::from(max_hr) * 100.0,
                max_hr
            );
            println!("  {}", colored_zone(zone));
            println!("  {}", zone_description(zone).description.dimmed());
        }

        Commands::Analyze { samples, source } => {
            let max_hr = source.resolve(&config)?;
            let distribution = ZoneAnalyzer::analyze(&samples, max_hr)?;

            println!("{}", format!("{} samples, max HR {} bpm", distribution.total_points, max_hr).blue().bold());
            for zone in Zone::ALL {
                let count = distribution.count(zone);
                if count > 0 {
                    println!(
                        "  {}: {} samples ({}%)",
                        colored_zone(zone),
                        count,
                        distribution.percent(zone).round_dp(1)
                    );
                }
            }
        }

        Commands::Describe { zone } => {
            let descriptions = match zone {
                Some(number) => vec![zone_description(Zone::try_from(number)?)],
                None => zone_descriptions().iter().collect(),
            };

            for description in descriptions {
                println!("{}", colored_zone(description.zone));
                println!("  {}", description.description);
                println!("  {} {}", "Benefits:".bold(), description.benefits.join(", "));
                println!("  {} {}", "Examples:".bold(), description.examples.join(", "));
                println!();
            }
        }

        Commands::Distribution { goal } => {
            let profiles = match goal {
                Some(goal) => vec![distribution_profile(goal)],
                None => distribution_profiles().iter().collect(),
            };

            let rows: Vec<DistributionRow> = profiles
                .iter()
                .map(|profile| DistributionRow {
                    goal: profile.goal.as_str(),
                    zone1: profile.distribution[0],
                    zone2: profile.distribution[1],
                    zone3: profile.distribution[2],
                    zone4: profile.distribution[3],
                    zone5: profile.distribution[4],
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));

            if let [profile] = profiles.as_slice() {
                println!("{}", profile.name.bold());
                println!("{}", profile.description);
            }
        }

        Commands::Dashboard {
            logs,
            plan,
            goal,
            today,
            source,
        } => {
            let max_hr = source.resolve(&config)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let logs = import_workout_logs(&logs, &config.validation)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let plans = match plan {
                Some(path) => vec![load_training_plan(&path)?],
                None => Vec::new(),
            };
            let goals: Vec<TrainingGoal> = goal
                .or(config.profile.goal)
                .map(|goal_type| {
                    TrainingGoal::new(NewGoal {
                        goal_type,
                        custom_description: None,
                        start_date: today,
                        target_date: None,
                    })
                })
                .into_iter()
                .collect();

            let dashboard = Dashboard::build(max_hr, &goals, &plans, &logs, today, &config.dashboard);

            println!("{}", format!("Dashboard for {}", today).green().bold());
            println!("{}", zone_table(dashboard.max_heart_rate));

            match &dashboard.todays_workout {
                Some(workout) => {
                    println!("{}", "Today's workout".bold());
                    println!("  {} ({} min)", workout.name, workout.duration_minutes);
                    if !workout.description.is_empty() {
                        println!("  {}", workout.description.dimmed());
                    }
                    for zone in Zone::TRAINING {
                        let minutes = workout.zone_minutes.get(zone);
                        if minutes > 0 {
                            println!("    {}: {} min", colored_zone(zone), minutes);
                        }
                    }
                }
                None => println!("{}", "No workout planned for today".dimmed()),
            }

            println!(
                "{}",
                format!(
                    "Last {} days: {} min in zones",
                    config.dashboard.window_days,
                    dashboard.weekly_totals.total()
                )
                .bold()
            );
            let rows: Vec<ComparisonRow> = Zone::TRAINING
                .iter()
                .enumerate()
                .map(|(index, &zone)| {
                    let comparison = dashboard.comparison.as_ref().map(|c| c[index]);
                    ComparisonRow {
                        zone: zone.number(),
                        minutes: dashboard.weekly_totals.get(zone),
                        actual: dashboard.weekly_shares[index],
                        target: comparison
                            .map(|c| c.target_percent.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        difference: comparison
                            .map(|c| format!("{:+}", c.difference()))
                            .unwrap_or_else(|| "-".to_string()),
                    }
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));

            if let Some(goal) = &dashboard.goal {
                println!("Compared with: {}", goal.goal_type.to_string().bold());
            }

            if !dashboard.recent_logs.is_empty() {
                println!("{}", "Recent workouts".bold());
                let rows: Vec<LogRow> = dashboard
                    .recent_logs
                    .iter()
                    .map(|log| -> Result<LogRow> {
                        Ok(LogRow {
                            date: log.date,
                            minutes: log.duration_minutes,
                            average_hr: log
                                .average_heart_rate
                                .map(|hr| hr.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                            average_zone: log
                                .average_zone(max_hr)?
                                .map(|zone| zone.number().to_string())
                                .unwrap_or_else(|| "-".to_string()),
                            primary_zone: log
                                .primary_zone()
                                .map(|zone| zone.number().to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        })
                    })
                    .collect::<Result<_>>()?;
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }

    Ok(())
}
