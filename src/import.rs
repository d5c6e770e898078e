//! Workout log and training plan import from CSV and JSON files

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ImportError, Result};
use crate::models::{ActivityType, TrainingPlan, WorkoutLog, ZoneMinutes};
use crate::validation::{check_workout_log, ValidationSettings};

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "json" => Ok(ImportFormat::Json),
            _ => Err(ImportError::UnsupportedFormat { format: extension }.into()),
        }
    }
}

/// CSV importer with flexible column naming
pub struct CsvLogImporter {
    column_mapping: HashMap<String, String>,
    settings: ValidationSettings,
}

impl Default for CsvLogImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLogImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        Self::add_mapping(&mut column_mapping, "date", &["date", "day", "workout_date"]);
        Self::add_mapping(
            &mut column_mapping,
            "activity",
            &["activity", "activity_type", "type", "sport"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "duration",
            &["duration", "duration_minutes", "minutes", "total_minutes"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "avg_hr",
            &["avg_hr", "average_heart_rate", "avg_heart_rate", "average_hr"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "max_hr",
            &["max_hr", "max_heart_rate", "maximum_heart_rate"],
        );
        for zone in 1..=5 {
            let standard = format!("zone{}", zone);
            Self::add_mapping(
                &mut column_mapping,
                &standard,
                &[
                    &standard,
                    &format!("zone{}_minutes", zone),
                    &format!("zone{}_duration", zone),
                    &format!("z{}", zone),
                ],
            );
        }
        Self::add_mapping(&mut column_mapping, "notes", &["notes", "note", "comment"]);

        Self {
            column_mapping,
            settings: ValidationSettings::default(),
        }
    }

    /// Check rows against `settings` instead of the default bounds
    pub fn with_settings(mut self, settings: ValidationSettings) -> Self {
        self.settings = settings;
        self
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    fn normalize_column_name(&self, name: &str) -> String {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");

        self.column_mapping
            .get(&normalized)
            .cloned()
            .unwrap_or(normalized)
    }

    fn parse_date(text: &str) -> Option<NaiveDate> {
        ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }

    /// Parse workout logs from CSV text
    pub fn parse(&self, content: &str) -> Result<Vec<WorkoutLog>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers().map_err(|e| parse_error("header", e))?;
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (self.normalize_column_name(name), index))
            .collect();

        for required in ["date", "duration"] {
            if !columns.contains_key(required) {
                return Err(ImportError::MissingColumn {
                    column: required.to_string(),
                }
                .into());
            }
        }

        let mut logs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            // header is line 1
            let location = format!("line {}", row + 2);
            let record = record.map_err(|e| parse_error(&location, e))?;

            let field = |name: &str| column_value(&columns, &record, name);

            let date_text = field("date").unwrap_or_default();
            let date = Self::parse_date(date_text)
                .ok_or_else(|| parse_error(&location, format!("invalid date '{}'", date_text)))?;

            let duration_minutes = parse_number::<u32>(field("duration"), &location, "duration")?
                .ok_or_else(|| parse_error(&location, "missing duration"))?;

            let activity_type = match field("activity") {
                Some(text) => text.parse::<ActivityType>().unwrap_or_else(|message| {
                    warn!(%location, "{}, recording as other", message);
                    ActivityType::Other
                }),
                None => ActivityType::default(),
            };

            let mut minutes = [0u32; 5];
            for (index, slot) in minutes.iter_mut().enumerate() {
                let column = format!("zone{}", index + 1);
                *slot = parse_number::<u32>(field(&column), &location, &column)?.unwrap_or(0);
            }

            let log = WorkoutLog {
                id: Uuid::new_v4(),
                date,
                activity_type,
                duration_minutes,
                average_heart_rate: parse_number::<u16>(field("avg_hr"), &location, "avg_hr")?,
                max_heart_rate: parse_number::<u16>(field("max_hr"), &location, "max_hr")?,
                zone_minutes: ZoneMinutes::from_array(minutes),
                notes: field("notes").map(str::to_string),
            };
            check_workout_log(&log, &self.settings).map_err(|errors| parse_error(&location, errors))?;
            logs.push(log);
        }

        Ok(logs)
    }
}

fn column_value<'r>(columns: &HashMap<String, usize>, record: &'r StringRecord, name: &str) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&index| record.get(index))
        .filter(|value| !value.is_empty())
}

fn parse_error(location: &str, reason: impl ToString) -> crate::error::FiveZoneError {
    ImportError::ParseError {
        format: "csv".to_string(),
        location: location.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>, location: &str, column: &str) -> Result<Option<T>> {
    value
        .map(|text| {
            text.parse::<T>()
                .map_err(|_| parse_error(location, format!("invalid {} '{}'", column, text)))
        })
        .transpose()
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(fs::read_to_string(path)?)
}

fn json_error(path: &Path, error: serde_json::Error) -> crate::error::FiveZoneError {
    ImportError::ParseError {
        format: "json".to_string(),
        location: format!("{}:{}", path.display(), error.line()),
        reason: error.to_string(),
    }
    .into()
}

/// Import workout logs, picking the parser from the file extension.
///
/// Every log must pass the same range checks as a submitted workout form.
pub fn import_workout_logs(path: &Path, settings: &ValidationSettings) -> Result<Vec<WorkoutLog>> {
    let format = ImportFormat::from_path(path)?;
    let content = read_file(path)?;

    let logs = match format {
        ImportFormat::Csv => CsvLogImporter::new()
            .with_settings(settings.clone())
            .parse(&content)?,
        ImportFormat::Json => {
            let logs: Vec<WorkoutLog> =
                serde_json::from_str(&content).map_err(|e| json_error(path, e))?;
            for (index, log) in logs.iter().enumerate() {
                check_workout_log(log, settings).map_err(|errors| {
                    ImportError::ParseError {
                        format: "json".to_string(),
                        location: format!("{} record {}", path.display(), index + 1),
                        reason: errors.to_string(),
                    }
                })?;
            }
            logs
        }
    };

    info!(path = %path.display(), count = logs.len(), ?format, "Imported workout logs");
    Ok(logs)
}

/// Load a training plan from a JSON file
pub fn load_training_plan(path: &Path) -> Result<TrainingPlan> {
    match ImportFormat::from_path(path)? {
        ImportFormat::Json => {
            let content = read_file(path)?;
            serde_json::from_str(&content).map_err(|e| json_error(path, e))
        }
        ImportFormat::Csv => Err(ImportError::UnsupportedFormat {
            format: "csv".to_string(),
        }
        .into()),
    }
}
