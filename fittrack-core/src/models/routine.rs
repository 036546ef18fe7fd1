use serde::{Deserialize, Serialize};
use std::fmt;

use super::decimal;
use super::exercise::Exercise;

/// Per-set override within a routine exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSet {
    pub set_number: u32,
    pub reps: u32,
    #[serde(default, deserialize_with = "decimal::number")]
    pub weight: f64,
    pub rest_seconds: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub name: String,
}

impl CustomSet {
    pub fn new(set_number: u32, reps: u32, weight: f64, rest_seconds: u32) -> Self {
        Self {
            set_number,
            reps,
            weight,
            rest_seconds,
            notes: String::new(),
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    #[serde(default)]
    pub id: Option<i64>,
    pub exercise: i64,
    #[serde(default)]
    pub exercise_details: Option<Exercise>,
    #[serde(default)]
    pub order: u32,
    pub default_sets: u32,
    pub default_reps: u32,
    #[serde(default, deserialize_with = "decimal::number")]
    pub default_weight: f64,
    pub default_rest_seconds: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub use_custom_sets: bool,
    #[serde(default)]
    pub custom_sets: Vec<CustomSet>,
}

impl RoutineExercise {
    pub fn new(exercise: i64, order: u32) -> Self {
        Self {
            id: None,
            exercise,
            exercise_details: None,
            order,
            default_sets: 3,
            default_reps: 10,
            default_weight: 0.0,
            default_rest_seconds: 60,
            notes: String::new(),
            use_custom_sets: false,
            custom_sets: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Exercise) -> Self {
        self.exercise_details = Some(details);
        self
    }

    pub fn with_defaults(mut self, sets: u32, reps: u32, weight: f64, rest_seconds: u32) -> Self {
        self.default_sets = sets;
        self.default_reps = reps;
        self.default_weight = weight;
        self.default_rest_seconds = rest_seconds;
        self
    }

    pub fn with_custom_sets(mut self, sets: Vec<CustomSet>) -> Self {
        self.default_sets = sets.len() as u32;
        self.custom_sets = sets;
        self.use_custom_sets = true;
        self
    }

    /// Exercise name, when the details were embedded by the server.
    pub fn name(&self) -> String {
        match &self.exercise_details {
            Some(details) => details.name.clone(),
            None => format!("Exercise #{}", self.exercise),
        }
    }

    /// True when per-set overrides replace the default group.
    pub fn has_custom_sets(&self) -> bool {
        self.use_custom_sets && !self.custom_sets.is_empty()
    }
}

/// Full routine as returned by `GET workouts/routines/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
    #[serde(default)]
    pub total_uses: u32,
    #[serde(default)]
    pub average_duration: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub username: String,
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(
            f,
            "Visibility: {}",
            if self.is_public { "public" } else { "private" }
        )?;
        if !self.username.is_empty() {
            writeln!(f, "Owner: {}", self.username)?;
        }
        writeln!(f, "Uses: {}  Likes: {}", self.total_uses, self.likes_count)?;

        if !self.exercises.is_empty() {
            writeln!(f, "\nExercises:")?;
            for (i, ex) in self.exercises.iter().enumerate() {
                if ex.has_custom_sets() {
                    writeln!(f, "  {}. {} ({} custom sets)", i + 1, ex.name(), ex.custom_sets.len())?;
                    for set in &ex.custom_sets {
                        writeln!(
                            f,
                            "       set {}: {} x {} kg, rest {}s{}",
                            set.set_number,
                            set.reps,
                            set.weight,
                            set.rest_seconds,
                            if set.name.is_empty() {
                                String::new()
                            } else {
                                format!(" ({})", set.name)
                            }
                        )?;
                    }
                } else {
                    writeln!(
                        f,
                        "  {}. {} - {} x {} @ {} kg, rest {}s",
                        i + 1,
                        ex.name(),
                        ex.default_sets,
                        ex.default_reps,
                        ex.default_weight,
                        ex.default_rest_seconds
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Routine as listed by `GET workouts/routines/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub exercise_count: u32,
    #[serde(default)]
    pub total_uses: u32,
    #[serde(default)]
    pub average_duration: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub username: String,
}

/// Body of `POST workouts/routines/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRoutine {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub exercises: Vec<NewRoutineExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRoutineExercise {
    pub exercise: i64,
    pub order: u32,
    pub default_sets: u32,
    pub default_reps: u32,
    pub default_weight: f64,
    pub default_rest_seconds: u32,
    pub notes: String,
    pub use_custom_sets: bool,
    pub custom_sets: Vec<CustomSet>,
}

/// Query parameters of `GET workouts/routines/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutineFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_routines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Result of toggling a like.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    pub message: String,
}

impl LikeResponse {
    pub fn liked(&self) -> bool {
        !self.message.to_lowercase().contains("unliked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_decodes_backend_detail() {
        let routine: Routine = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Push",
                "description": "",
                "is_public": false,
                "exercises": [{
                    "id": 11,
                    "exercise": 1,
                    "exercise_details": {
                        "id": 1, "name": "Bench Press", "category": "strength",
                        "muscle_group": "chest", "equipment": "barbell",
                        "secondary_muscles": ["triceps"]
                    },
                    "order": 0,
                    "default_sets": 3,
                    "default_reps": 10,
                    "default_weight": null,
                    "default_rest_seconds": 60,
                    "notes": ""
                }],
                "exercise_count": 1,
                "total_uses": 0,
                "average_duration": 0,
                "is_liked": false,
                "likes_count": 0,
                "username": "a"
            }"#,
        )
        .unwrap();
        assert_eq!(routine.exercises.len(), 1);
        let ex = &routine.exercises[0];
        assert_eq!(ex.default_weight, 0.0);
        assert_eq!(ex.name(), "Bench Press");
        assert!(!ex.has_custom_sets());
    }

    #[test]
    fn test_with_custom_sets_tracks_count() {
        let ex = RoutineExercise::new(1, 0).with_custom_sets(vec![
            CustomSet::new(1, 12, 40.0, 60),
            CustomSet::new(2, 10, 45.0, 90),
        ]);
        assert_eq!(ex.default_sets, 2);
        assert!(ex.has_custom_sets());
        assert_eq!(ex.name(), "Exercise #1");
    }

    #[test]
    fn test_like_response() {
        let liked: LikeResponse = serde_json::from_str(r#"{"message": "Routine liked"}"#).unwrap();
        assert!(liked.liked());
        let unliked: LikeResponse =
            serde_json::from_str(r#"{"message": "Routine unliked"}"#).unwrap();
        assert!(!unliked.liked());
    }

    #[test]
    fn test_routine_display() {
        let routine = Routine {
            id: 1,
            name: "Legs".to_string(),
            description: "Heavy day".to_string(),
            is_public: true,
            exercises: vec![RoutineExercise::new(5, 0).with_defaults(5, 5, 100.0, 180)],
            total_uses: 2,
            average_duration: 50,
            is_liked: false,
            likes_count: 1,
            username: "a".to_string(),
        };
        let output = format!("{}", routine);
        assert!(output.contains("Visibility: public"));
        assert!(output.contains("1. Exercise #5 - 5 x 5 @ 100 kg, rest 180s"));
    }
}
