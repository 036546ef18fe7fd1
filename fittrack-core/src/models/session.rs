use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    #[default]
    Normal,
    Warmup,
    Dropset,
    Failure,
}

/// One logged set, as returned by the session and set endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
    pub id: i64,
    pub exercise: i64,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub exercise_muscle_group: Option<String>,
    #[serde(default)]
    pub exercise_secondary_muscles: Vec<String>,
    pub set_number: u32,
    #[serde(default)]
    pub set_type: SetType,
    pub reps: u32,
    #[serde(default, deserialize_with = "decimal::number")]
    pub weight: f64,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SetLog {
    /// Reps × weight.
    pub fn volume(&self) -> f64 {
        self.reps as f64 * self.weight
    }
}

/// Body of `POST workouts/sessions/{id}/sets/` and `PUT workouts/sets/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSet {
    pub session: i64,
    pub exercise: i64,
    pub set_number: u32,
    pub set_type: SetType,
    pub reps: u32,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    #[serde(default)]
    pub routine: Option<i64>,
    #[serde(default)]
    pub routine_name: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default, deserialize_with = "decimal::number")]
    pub total_volume: f64,
    #[serde(default)]
    pub total_sets: u32,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub exercise_sets: Vec<SetLog>,
}

impl Session {
    /// Routine name when known, otherwise the session's own name.
    pub fn title(&self) -> &str {
        match &self.routine_name {
            Some(name) if !name.is_empty() => name,
            _ if !self.name.is_empty() => &self.name,
            _ => "Workout",
        }
    }

    /// Number of distinct exercises with at least one logged set.
    pub fn exercise_count(&self) -> usize {
        let mut ids: Vec<i64> = self.exercise_sets.iter().map(|s| s.exercise).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Logged sets grouped by exercise name, in order of first appearance.
    pub fn sets_by_exercise(&self) -> Vec<(&str, Vec<&SetLog>)> {
        let mut groups: Vec<(&str, Vec<&SetLog>)> = Vec::new();
        for set in &self.exercise_sets {
            match groups.iter_mut().find(|(name, _)| *name == set.exercise_name) {
                Some((_, sets)) => sets.push(set),
                None => groups.push((set.exercise_name.as_str(), vec![set])),
            }
        }
        groups
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title();
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Started: {}", self.start_time.format("%Y-%m-%d %H:%M"))?;
        if let Some(minutes) = self.duration_minutes {
            writeln!(f, "Duration: {} min", minutes)?;
        }
        writeln!(f, "Volume: {} kg", self.total_volume)?;
        writeln!(f, "Sets: {}", self.total_sets)?;
        writeln!(
            f,
            "Status: {}",
            if self.is_completed {
                "completed"
            } else {
                "in progress"
            }
        )?;
        if !self.notes.is_empty() {
            writeln!(f, "Notes: {}", self.notes)?;
        }

        for (name, sets) in self.sets_by_exercise() {
            writeln!(f, "\n{}", name)?;
            for set in sets {
                writeln!(
                    f,
                    "  Set {}: {} x {} kg ({} kg)",
                    set.set_number,
                    set.reps,
                    set.weight,
                    set.volume()
                )?;
            }
        }
        Ok(())
    }
}

/// Query parameters of `GET workouts/sessions/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl SessionFilter {
    pub fn completed() -> Self {
        Self {
            is_completed: Some(true),
            ..Default::default()
        }
    }
}

/// Response of `GET workouts/stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default, deserialize_with = "decimal::number")]
    pub total_volume: f64,
    #[serde(default, deserialize_with = "decimal::number")]
    pub average_duration: f64,
    #[serde(default)]
    pub recent_sessions: Vec<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        serde_json::from_str(
            r#"{
                "id": 9,
                "routine": 3,
                "routine_name": "Push",
                "name": "",
                "notes": "",
                "start_time": "2025-03-01T10:00:00Z",
                "end_time": "2025-03-01T11:00:00Z",
                "duration_minutes": 60,
                "total_volume": "1000.00",
                "total_sets": 3,
                "exercise_count": 2,
                "is_completed": true,
                "exercise_sets": [
                    {"id": 1, "exercise": 1, "exercise_name": "Bench Press", "set_number": 1,
                     "set_type": "normal", "reps": 10, "weight": "50.00", "volume": 500.0},
                    {"id": 2, "exercise": 2, "exercise_name": "Dips", "set_number": 1,
                     "reps": 12, "weight": null},
                    {"id": 3, "exercise": 1, "exercise_name": "Bench Press", "set_number": 2,
                     "reps": 10, "weight": "50.00"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_session_decodes_decimals() {
        let session = sample_session();
        assert_eq!(session.total_volume, 1000.0);
        assert_eq!(session.exercise_sets[0].weight, 50.0);
        assert_eq!(session.exercise_sets[1].weight, 0.0);
        assert_eq!(session.exercise_sets[0].volume(), 500.0);
    }

    #[test]
    fn test_sets_grouped_by_first_appearance() {
        let session = sample_session();
        let groups = session.sets_by_exercise();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Bench Press");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Dips");
        assert_eq!(session.exercise_count(), 2);
    }

    #[test]
    fn test_title_fallbacks() {
        let mut session = sample_session();
        assert_eq!(session.title(), "Push");
        session.routine_name = None;
        assert_eq!(session.title(), "Workout");
        session.name = "Morning".to_string();
        assert_eq!(session.title(), "Morning");
    }

    #[test]
    fn test_new_set_payload() {
        let set = NewSet {
            session: 9,
            exercise: 1,
            set_number: 1,
            set_type: SetType::Normal,
            reps: 8,
            weight: 20.0,
            rest_seconds: None,
        };
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!({
                "session": 9, "exercise": 1, "set_number": 1,
                "set_type": "normal", "reps": 8, "weight": 20.0
            })
        );
    }

    #[test]
    fn test_session_filter_query() {
        let filter = SessionFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..SessionFilter::completed()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"is_completed": true, "start_date": "2025-01-01"})
        );
    }
}
