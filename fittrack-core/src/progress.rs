//! Chart series and summaries derived from fetched sessions and body-weight
//! entries.
//!
//! Everything here is a pure function of its inputs except
//! [`log_body_weight`]. Dates are UTC calendar dates.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{BodyWeightEntry, Exercise, NewBodyWeight, Session, SetLog};

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Weight already logged for today. Update from history instead.")]
    AlreadyLogged,

    #[error("Please enter a valid weight")]
    InvalidWeight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Window of data shown on the progress charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    All,
}

impl TimeRange {
    /// Window length in days; `None` for everything.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::All => None,
        }
    }

    /// True if something dated `date` is at most the window's age on `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.days() {
            Some(days) => (today - date).num_days() <= days,
            None => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "7d" => Ok(TimeRange::Week),
            "month" | "30d" => Ok(TimeRange::Month),
            "all" => Ok(TimeRange::All),
            _ => Err(format!(
                "Invalid time range '{}'. Valid options: week, month, all",
                s
            )),
        }
    }
}

/// Volume per muscle group on one date. Every muscle seen in the window is
/// present, zero when untrained that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleVolumePoint {
    pub date: NaiveDate,
    pub volumes: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f64,
    pub avg_weight: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub workouts: usize,
    pub total_volume: f64,
    pub total_sets: u32,
    /// Mean duration in minutes of the sessions that report one
    pub average_duration: f64,
    pub current_weight: Option<f64>,
    /// Newest minus oldest body weight within the window
    pub weight_change: Option<f64>,
}

/// Sessions started within `range`, oldest first.
pub fn filter_sessions<'a>(
    sessions: &'a [Session],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<&'a Session> {
    let mut kept: Vec<&Session> = sessions
        .iter()
        .filter(|s| range.contains(s.start_time.date_naive(), today))
        .collect();
    kept.sort_by_key(|s| s.start_time);
    kept
}

/// Body-weight entries within `range`, oldest first.
pub fn filter_body_weights<'a>(
    entries: &'a [BodyWeightEntry],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<&'a BodyWeightEntry> {
    let mut kept: Vec<&BodyWeightEntry> = entries
        .iter()
        .filter(|e| range.contains(e.date, today))
        .collect();
    kept.sort_by_key(|e| e.date);
    kept
}

/// Muscles a set's volume is credited to: the set's embedded muscle data,
/// else the exercise list. `None` for unknown exercises.
fn set_muscles(set: &SetLog, exercises: &[Exercise]) -> Option<Vec<String>> {
    if let Some(primary) = set.exercise_muscle_group.as_ref().filter(|m| !m.is_empty()) {
        let mut muscles = vec![primary.clone()];
        muscles.extend(set.exercise_secondary_muscles.iter().cloned());
        return Some(muscles);
    }
    exercises
        .iter()
        .find(|e| e.id == set.exercise)
        .map(|e| e.muscles().into_iter().map(str::to_string).collect())
}

/// Per-date muscle-group volume.
///
/// Each set's volume is split equally between the exercise's primary and
/// secondary muscle groups.
pub fn muscle_volume(sessions: &[&Session], exercises: &[Exercise]) -> Vec<MuscleVolumePoint> {
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for session in sessions {
        let date = session.start_time.date_naive();
        for set in &session.exercise_sets {
            let Some(muscles) = set_muscles(set, exercises) else {
                tracing::debug!(exercise = set.exercise, "skipping set of unknown exercise");
                continue;
            };
            let share = set.volume() / muscles.len() as f64;
            let day = by_date.entry(date).or_default();
            for muscle in muscles {
                *day.entry(muscle.clone()).or_insert(0.0) += share;
                seen.insert(muscle);
            }
        }
    }

    by_date
        .into_iter()
        .map(|(date, mut volumes)| {
            for muscle in &seen {
                volumes.entry(muscle.clone()).or_insert(0.0);
            }
            MuscleVolumePoint { date, volumes }
        })
        .collect()
}

/// Weight and volume progression of one exercise, oldest first.
///
/// Sets are dated by their creation time, falling back to the session start.
pub fn exercise_progress(sessions: &[&Session], exercise_id: i64) -> Vec<ExerciseProgressPoint> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&SetLog>> = BTreeMap::new();
    for session in sessions {
        for set in session.exercise_sets.iter().filter(|s| s.exercise == exercise_id) {
            let date = set
                .created_at
                .unwrap_or(session.start_time)
                .date_naive();
            by_date.entry(date).or_default().push(set);
        }
    }

    by_date
        .into_iter()
        .map(|(date, sets)| {
            let max_weight = sets.iter().map(|s| s.weight).fold(0.0, f64::max);
            let avg_weight = sets.iter().map(|s| s.weight).sum::<f64>() / sets.len() as f64;
            let volume = sets.iter().map(|s| s.volume()).sum();
            ExerciseProgressPoint {
                date,
                max_weight,
                avg_weight,
                volume,
            }
        })
        .collect()
}

/// `(date, weight)` points within `range`, oldest first.
pub fn body_weight_series(
    entries: &[BodyWeightEntry],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<(NaiveDate, f64)> {
    filter_body_weights(entries, range, today)
        .into_iter()
        .map(|e| (e.date, e.weight))
        .collect()
}

/// Headline numbers for the progress page.
pub fn summarize(
    sessions: &[Session],
    weights: &[BodyWeightEntry],
    range: TimeRange,
    today: NaiveDate,
) -> ProgressSummary {
    let window = filter_sessions(sessions, range, today);
    let durations: Vec<u32> = window.iter().filter_map(|s| s.duration_minutes).collect();
    let average_duration = if durations.is_empty() {
        0.0
    } else {
        durations.iter().map(|d| *d as f64).sum::<f64>() / durations.len() as f64
    };

    let current_weight = weights.iter().max_by_key(|e| e.date).map(|e| e.weight);
    let in_window = filter_body_weights(weights, range, today);
    let weight_change = match (in_window.first(), in_window.last()) {
        (Some(oldest), Some(newest)) if in_window.len() > 1 => Some(newest.weight - oldest.weight),
        _ => None,
    };

    ProgressSummary {
        workouts: window.len(),
        total_volume: window.iter().map(|s| s.total_volume).sum(),
        total_sets: window.iter().map(|s| s.total_sets).sum(),
        average_duration,
        current_weight,
        weight_change,
    }
}

/// Rejects a second entry for a date that already has one.
pub fn check_not_logged(existing: &[BodyWeightEntry], date: NaiveDate) -> Result<(), ProgressError> {
    if existing.iter().any(|e| e.date == date) {
        Err(ProgressError::AlreadyLogged)
    } else {
        Ok(())
    }
}

/// Records a body-weight entry, at most one per date.
///
/// Duplicates are caught locally before posting; a `400` from the server
/// is reported the same way.
pub async fn log_body_weight(
    api: &ApiClient,
    entry: &NewBodyWeight,
) -> Result<BodyWeightEntry, ProgressError> {
    if !entry.weight.is_finite() || entry.weight <= 0.0 {
        return Err(ProgressError::InvalidWeight);
    }

    let existing = api.body_weights().await?;
    check_not_logged(&existing, entry.date)?;

    match api.log_body_weight(entry).await {
        Ok(saved) => Ok(saved),
        Err(e) if e.status() == Some(reqwest::StatusCode::BAD_REQUEST) => {
            tracing::warn!(error = %e, date = %entry.date, "server rejected body weight entry");
            Err(ProgressError::AlreadyLogged)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to log body weight");
            Err(e.into())
        }
    }
}
