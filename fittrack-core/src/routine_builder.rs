//! Building a new routine before it is submitted.

use thiserror::Error;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::input::{coerce_f64, coerce_u32};
use crate::models::{
    Category, CustomSet, Equipment, Exercise, MuscleGroup, NewExercise, NewRoutine,
    NewRoutineExercise, Routine, SecondaryMuscle,
};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_WEIGHT: f64 = 0.0;
pub const DEFAULT_REST_SECONDS: u32 = 60;

pub const MAX_SETS: u32 = 30;
pub const MAX_REPS: u32 = 999;
pub const MAX_WEIGHT: f64 = 999.0;
pub const MAX_REST_SECONDS: u32 = 600;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Please add a name and at least one exercise")]
    Incomplete,

    #[error("Exercise name is required")]
    MissingExerciseName,

    #[error("No exercise at position {0}")]
    NoSuchEntry(usize),

    #[error("No custom set {0}")]
    NoSuchCustomSet(usize),

    #[error("Custom sets are not enabled for this exercise")]
    NotCustom,

    #[error("An exercise can have at most 30 sets")]
    TooManySets,

    #[error("An exercise needs at least one set")]
    LastSet,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Numeric fields of a draft entry that accept free-form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Sets,
    Reps,
    Weight,
    Rest,
}

/// One exercise of a routine being built.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntry {
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub rest_seconds: u32,
    pub notes: String,
    pub use_custom_sets: bool,
    pub custom_sets: Vec<CustomSet>,
}

impl DraftEntry {
    fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            weight: DEFAULT_WEIGHT,
            rest_seconds: DEFAULT_REST_SECONDS,
            notes: String::new(),
            use_custom_sets: false,
            custom_sets: Vec::new(),
        }
    }

    fn default_custom_set(&self, set_number: u32) -> CustomSet {
        CustomSet::new(set_number, self.reps, self.weight, self.rest_seconds)
    }

    fn renumber(&mut self) {
        for (i, set) in self.custom_sets.iter_mut().enumerate() {
            set.set_number = i as u32 + 1;
        }
        self.sets = self.custom_sets.len() as u32;
    }

    /// Grows or shrinks the custom sets to match `sets`.
    fn resize_custom_sets(&mut self) {
        let wanted = self.sets as usize;
        self.custom_sets.truncate(wanted);
        while self.custom_sets.len() < wanted {
            let set = self.default_custom_set(self.custom_sets.len() as u32 + 1);
            self.custom_sets.push(set);
        }
    }
}

/// A routine under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutineDraft {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    entries: Vec<DraftEntry>,
}

impl RoutineDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    /// Appends an exercise with default parameters. Returns its position.
    pub fn add_exercise(&mut self, exercise: Exercise) -> usize {
        self.entries.push(DraftEntry::new(exercise));
        self.entries.len() - 1
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<DraftEntry, RoutineError> {
        if index >= self.entries.len() {
            return Err(RoutineError::NoSuchEntry(index));
        }
        Ok(self.entries.remove(index))
    }

    /// Sets the set count. In custom mode the count never drops below one.
    pub fn set_sets(&mut self, index: usize, sets: u32) -> Result<(), RoutineError> {
        let entry = self.entry_mut(index)?;
        entry.sets = sets.min(MAX_SETS);
        if entry.use_custom_sets {
            entry.sets = entry.sets.max(1);
            entry.resize_custom_sets();
        }
        Ok(())
    }

    pub fn set_reps(&mut self, index: usize, reps: u32) -> Result<(), RoutineError> {
        self.entry_mut(index)?.reps = reps.min(MAX_REPS);
        Ok(())
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), RoutineError> {
        self.entry_mut(index)?.weight = clamp_weight(weight);
        Ok(())
    }

    pub fn set_rest(&mut self, index: usize, rest_seconds: u32) -> Result<(), RoutineError> {
        self.entry_mut(index)?.rest_seconds = rest_seconds.min(MAX_REST_SECONDS);
        Ok(())
    }

    pub fn set_notes(&mut self, index: usize, notes: impl Into<String>) -> Result<(), RoutineError> {
        self.entry_mut(index)?.notes = notes.into();
        Ok(())
    }

    /// Sets a numeric field from raw input; non-numeric input becomes zero.
    pub fn set_input(
        &mut self,
        index: usize,
        field: DraftField,
        input: &str,
    ) -> Result<(), RoutineError> {
        match field {
            DraftField::Sets => self.set_sets(index, coerce_u32(input)),
            DraftField::Reps => self.set_reps(index, coerce_u32(input)),
            DraftField::Weight => self.set_weight(index, coerce_f64(input)),
            DraftField::Rest => self.set_rest(index, coerce_u32(input)),
        }
    }

    /// Switches an entry to per-set overrides, one per default set.
    pub fn enable_custom_sets(&mut self, index: usize) -> Result<(), RoutineError> {
        let entry = self.entry_mut(index)?;
        if entry.use_custom_sets {
            return Ok(());
        }
        entry.sets = entry.sets.max(1);
        let sets: Vec<CustomSet> = (1..=entry.sets)
            .map(|n| entry.default_custom_set(n))
            .collect();
        entry.use_custom_sets = true;
        entry.custom_sets = sets;
        Ok(())
    }

    pub fn disable_custom_sets(&mut self, index: usize) -> Result<(), RoutineError> {
        let entry = self.entry_mut(index)?;
        entry.use_custom_sets = false;
        entry.custom_sets.clear();
        Ok(())
    }

    pub fn update_custom_set(
        &mut self,
        index: usize,
        set_index: usize,
        reps: u32,
        weight: f64,
        rest_seconds: u32,
    ) -> Result<(), RoutineError> {
        let set = self.custom_set_mut(index, set_index)?;
        set.reps = reps.min(MAX_REPS);
        set.weight = clamp_weight(weight);
        set.rest_seconds = rest_seconds.min(MAX_REST_SECONDS);
        Ok(())
    }

    pub fn label_custom_set(
        &mut self,
        index: usize,
        set_index: usize,
        name: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<(), RoutineError> {
        let set = self.custom_set_mut(index, set_index)?;
        set.name = name.into();
        set.notes = notes.into();
        Ok(())
    }

    /// Moves a custom set to another position and renumbers.
    pub fn move_custom_set(&mut self, index: usize, from: usize, to: usize) -> Result<(), RoutineError> {
        let entry = self.custom_entry_mut(index)?;
        let len = entry.custom_sets.len();
        if from >= len {
            return Err(RoutineError::NoSuchCustomSet(from));
        }
        if to >= len {
            return Err(RoutineError::NoSuchCustomSet(to));
        }
        let set = entry.custom_sets.remove(from);
        entry.custom_sets.insert(to, set);
        entry.renumber();
        Ok(())
    }

    /// Inserts a copy of a custom set right after it.
    pub fn clone_custom_set(&mut self, index: usize, set_index: usize) -> Result<(), RoutineError> {
        let entry = self.custom_entry_mut(index)?;
        let source = entry
            .custom_sets
            .get(set_index)
            .cloned()
            .ok_or(RoutineError::NoSuchCustomSet(set_index))?;
        if entry.custom_sets.len() as u32 >= MAX_SETS {
            return Err(RoutineError::TooManySets);
        }
        entry.custom_sets.insert(set_index + 1, source);
        entry.renumber();
        Ok(())
    }

    pub fn remove_custom_set(&mut self, index: usize, set_index: usize) -> Result<(), RoutineError> {
        let entry = self.custom_entry_mut(index)?;
        if set_index >= entry.custom_sets.len() {
            return Err(RoutineError::NoSuchCustomSet(set_index));
        }
        if entry.custom_sets.len() == 1 {
            return Err(RoutineError::LastSet);
        }
        entry.custom_sets.remove(set_index);
        entry.renumber();
        Ok(())
    }

    /// Checks the draft and builds the create request.
    pub fn validate(&self) -> Result<NewRoutine, RoutineError> {
        let name = self.name.trim();
        if name.is_empty() || self.entries.is_empty() {
            return Err(RoutineError::Incomplete);
        }

        let exercises = self
            .entries
            .iter()
            .enumerate()
            .map(|(order, entry)| NewRoutineExercise {
                exercise: entry.exercise.id,
                order: order as u32,
                default_sets: entry.sets,
                default_reps: entry.reps,
                default_weight: entry.weight,
                default_rest_seconds: entry.rest_seconds,
                notes: entry.notes.clone(),
                use_custom_sets: entry.use_custom_sets,
                custom_sets: if entry.use_custom_sets {
                    entry.custom_sets.clone()
                } else {
                    Vec::new()
                },
            })
            .collect();

        Ok(NewRoutine {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            is_public: self.is_public,
            exercises,
        })
    }

    /// Validates locally, then creates the routine.
    pub async fn submit(&self, api: &ApiClient) -> Result<Routine, RoutineError> {
        let request = self.validate()?;
        let routine = api.create_routine(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to create routine");
            e
        })?;
        tracing::debug!(routine_id = routine.id, "routine created");
        Ok(routine)
    }

    /// Creates a new exercise on the server and adds it to the draft.
    pub async fn create_and_add_exercise(
        &mut self,
        api: &ApiClient,
        draft: &ExerciseDraft,
    ) -> Result<usize, RoutineError> {
        let exercise = draft.create(api).await?;
        Ok(self.add_exercise(exercise))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut DraftEntry, RoutineError> {
        self.entries
            .get_mut(index)
            .ok_or(RoutineError::NoSuchEntry(index))
    }

    fn custom_entry_mut(&mut self, index: usize) -> Result<&mut DraftEntry, RoutineError> {
        let entry = self.entry_mut(index)?;
        if !entry.use_custom_sets {
            return Err(RoutineError::NotCustom);
        }
        Ok(entry)
    }

    fn custom_set_mut(&mut self, index: usize, set_index: usize) -> Result<&mut CustomSet, RoutineError> {
        self.custom_entry_mut(index)?
            .custom_sets
            .get_mut(set_index)
            .ok_or(RoutineError::NoSuchCustomSet(set_index))
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.clamp(0.0, MAX_WEIGHT)
    } else {
        0.0
    }
}

/// A custom exercise to be created inline while building a routine.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub secondary_muscles: Vec<SecondaryMuscle>,
    pub equipment: Equipment,
}

impl ExerciseDraft {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            muscle_group,
            secondary_muscles: Vec::new(),
            equipment,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_secondary(mut self, muscle: SecondaryMuscle) -> Self {
        if !self.secondary_muscles.contains(&muscle) {
            self.secondary_muscles.push(muscle);
        }
        self
    }

    /// Adds the muscle if absent, removes it if present.
    pub fn toggle_secondary(&mut self, muscle: SecondaryMuscle) {
        match self.secondary_muscles.iter().position(|m| *m == muscle) {
            Some(i) => {
                self.secondary_muscles.remove(i);
            }
            None => self.secondary_muscles.push(muscle),
        }
    }

    pub fn validate(&self) -> Result<NewExercise, RoutineError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RoutineError::MissingExerciseName);
        }
        Ok(NewExercise {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            muscle_group: self.muscle_group,
            secondary_muscles: self.secondary_muscles.clone(),
            equipment: self.equipment,
            is_custom: true,
        })
    }

    pub async fn create(&self, api: &ApiClient) -> Result<Exercise, RoutineError> {
        let request = self.validate()?;
        let exercise = api.create_exercise(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to create exercise");
            e
        })?;
        Ok(exercise)
    }
}

/// Exercises whose name contains `query`, ignoring case.
pub fn search_exercises<'a>(exercises: &'a [Exercise], query: &str) -> Vec<&'a Exercise> {
    let query = query.trim().to_lowercase();
    exercises
        .iter()
        .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
        .collect()
}

/// Secondary muscles whose name contains `query`, for the muscle picker.
pub fn search_secondary_muscles(query: &str) -> Vec<SecondaryMuscle> {
    let query = query.trim().to_lowercase();
    SecondaryMuscle::ALL
        .iter()
        .copied()
        .filter(|m| m.as_str().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{exercise_json, routine_json, serve, Hits};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    fn exercise(id: i64, name: &str) -> Exercise {
        serde_json::from_value(exercise_json(id, name, "chest", &["triceps"])).unwrap()
    }

    fn draft_with_bench() -> RoutineDraft {
        let mut draft = RoutineDraft::new("Push");
        draft.add_exercise(exercise(1, "Bench Press"));
        draft
    }

    #[test]
    fn test_added_exercise_gets_defaults() {
        let draft = draft_with_bench();
        let entry = &draft.entries()[0];
        assert_eq!(entry.sets, 3);
        assert_eq!(entry.reps, 10);
        assert_eq!(entry.weight, 0.0);
        assert_eq!(entry.rest_seconds, 60);
        assert!(!entry.use_custom_sets);
    }

    #[test]
    fn test_numeric_inputs_are_clamped_and_coerced() {
        let mut draft = draft_with_bench();
        draft.set_input(0, DraftField::Sets, "45").unwrap();
        draft.set_input(0, DraftField::Reps, "5000").unwrap();
        draft.set_input(0, DraftField::Weight, "1200.5").unwrap();
        draft.set_input(0, DraftField::Rest, "900").unwrap();
        let entry = &draft.entries()[0];
        assert_eq!(entry.sets, 30);
        assert_eq!(entry.reps, 999);
        assert_eq!(entry.weight, 999.0);
        assert_eq!(entry.rest_seconds, 600);

        draft.set_input(0, DraftField::Reps, "").unwrap();
        draft.set_input(0, DraftField::Weight, "heavy").unwrap();
        let entry = &draft.entries()[0];
        assert_eq!(entry.reps, 0);
        assert_eq!(entry.weight, 0.0);
    }

    #[test]
    fn test_removing_entry_renumbers_order() {
        let mut draft = draft_with_bench();
        draft.add_exercise(exercise(2, "Dips"));
        draft.add_exercise(exercise(3, "Flyes"));
        draft.remove_exercise(0).unwrap();

        let request = draft.validate().unwrap();
        let orders: Vec<(i64, u32)> = request.exercises.iter().map(|e| (e.exercise, e.order)).collect();
        assert_eq!(orders, vec![(2, 0), (3, 1)]);
        assert!(matches!(draft.remove_exercise(5), Err(RoutineError::NoSuchEntry(5))));
    }

    #[test]
    fn test_custom_sets_expand_and_track_count() {
        let mut draft = draft_with_bench();
        draft.set_weight(0, 40.0).unwrap();
        draft.enable_custom_sets(0).unwrap();

        let entry = &draft.entries()[0];
        assert_eq!(entry.custom_sets.len(), 3);
        assert_eq!(entry.custom_sets[2].set_number, 3);
        assert_eq!(entry.custom_sets[0].weight, 40.0);
        assert_eq!(entry.custom_sets[0].rest_seconds, 60);

        draft.set_sets(0, 5).unwrap();
        assert_eq!(draft.entries()[0].custom_sets.len(), 5);
        draft.set_sets(0, 2).unwrap();
        assert_eq!(draft.entries()[0].custom_sets.len(), 2);
    }

    #[test]
    fn test_custom_set_reorder_clone_remove() {
        let mut draft = draft_with_bench();
        draft.enable_custom_sets(0).unwrap();
        draft.update_custom_set(0, 0, 12, 20.0, 30).unwrap();
        draft.update_custom_set(0, 2, 6, 60.0, 2000).unwrap();
        assert_eq!(draft.entries()[0].custom_sets[2].rest_seconds, 600);

        draft.move_custom_set(0, 2, 0).unwrap();
        let sets = &draft.entries()[0].custom_sets;
        assert_eq!((sets[0].set_number, sets[0].reps), (1, 6));
        assert_eq!((sets[1].set_number, sets[1].reps), (2, 12));

        draft.clone_custom_set(0, 0).unwrap();
        let entry = &draft.entries()[0];
        assert_eq!(entry.sets, 4);
        assert_eq!(entry.custom_sets[1].reps, 6);
        assert_eq!(entry.custom_sets[1].set_number, 2);
        assert_eq!(entry.custom_sets[3].set_number, 4);

        draft.remove_custom_set(0, 0).unwrap();
        let entry = &draft.entries()[0];
        assert_eq!(entry.sets, 3);
        assert_eq!(entry.custom_sets[0].set_number, 1);
    }

    #[test]
    fn test_clone_respects_set_cap() {
        let mut draft = draft_with_bench();
        draft.set_sets(0, MAX_SETS).unwrap();
        draft.enable_custom_sets(0).unwrap();
        assert!(matches!(draft.clone_custom_set(0, 0), Err(RoutineError::TooManySets)));
    }

    #[test]
    fn test_last_custom_set_cannot_be_removed() {
        let mut draft = draft_with_bench();
        draft.set_sets(0, 1).unwrap();
        draft.enable_custom_sets(0).unwrap();
        assert!(matches!(draft.remove_custom_set(0, 0), Err(RoutineError::LastSet)));
    }

    #[test]
    fn test_cleared_set_count_keeps_one_custom_set() {
        let mut draft = draft_with_bench();
        draft.enable_custom_sets(0).unwrap();
        draft.set_input(0, DraftField::Sets, "").unwrap();

        let entry = &draft.entries()[0];
        assert!(entry.use_custom_sets);
        assert_eq!(entry.sets, 1);
        assert_eq!(entry.custom_sets.len(), 1);
        assert_eq!(entry.custom_sets[0].set_number, 1);

        let request = draft.validate().unwrap();
        assert_eq!(request.exercises[0].default_sets, 1);
        assert_eq!(request.exercises[0].custom_sets.len(), 1);
    }

    #[test]
    fn test_custom_mode_from_zero_sets_starts_with_one() {
        let mut draft = draft_with_bench();
        draft.set_sets(0, 0).unwrap();
        assert_eq!(draft.entries()[0].sets, 0);

        draft.enable_custom_sets(0).unwrap();
        let entry = &draft.entries()[0];
        assert_eq!(entry.sets, 1);
        assert_eq!(entry.custom_sets.len(), 1);
    }

    #[test]
    fn test_custom_ops_require_custom_mode() {
        let mut draft = draft_with_bench();
        assert!(matches!(draft.clone_custom_set(0, 0), Err(RoutineError::NotCustom)));
        draft.enable_custom_sets(0).unwrap();
        draft.disable_custom_sets(0).unwrap();
        let request = draft.validate().unwrap();
        assert!(!request.exercises[0].use_custom_sets);
        assert!(request.exercises[0].custom_sets.is_empty());
    }

    #[test]
    fn test_validation_requires_name_and_exercise() {
        let mut draft = draft_with_bench();
        draft.name = "   ".to_string();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please add a name and at least one exercise");

        let empty = RoutineDraft::new("Push");
        assert!(matches!(empty.validate(), Err(RoutineError::Incomplete)));
    }

    #[test]
    fn test_search_exercises() {
        let exercises = vec![exercise(1, "Bench Press"), exercise(2, "Leg Press"), exercise(3, "Squat")];
        let names: Vec<&str> = search_exercises(&exercises, "PRESS")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bench Press", "Leg Press"]);
        assert_eq!(search_exercises(&exercises, "").len(), 3);
    }

    #[test]
    fn test_exercise_draft() {
        let mut draft = ExerciseDraft::new("", Category::Strength, MuscleGroup::Back, Equipment::Cable);
        assert!(matches!(draft.validate(), Err(RoutineError::MissingExerciseName)));

        draft.name = " Face Pull ".to_string();
        draft.toggle_secondary(SecondaryMuscle::Shoulders);
        draft.toggle_secondary(SecondaryMuscle::Biceps);
        draft.toggle_secondary(SecondaryMuscle::Biceps);
        let request = draft.validate().unwrap();
        assert_eq!(request.name, "Face Pull");
        assert_eq!(request.secondary_muscles, vec![SecondaryMuscle::Shoulders]);
        assert!(request.is_custom);

        assert_eq!(search_secondary_muscles("ce"), vec![SecondaryMuscle::Triceps, SecondaryMuscle::Biceps]);
    }

    #[tokio::test]
    async fn test_empty_name_blocks_submission_without_request() {
        let hits = Hits::default();
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/workouts/routines/",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.hit();
                    StatusCode::CREATED
                }
            }),
        );
        let api = serve(router).await;

        let mut draft = draft_with_bench();
        draft.name = String::new();
        let err = draft.submit(&api).await.unwrap_err();
        assert!(matches!(err, RoutineError::Incomplete));
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_submit_posts_routine() {
        let received: Arc<Mutex<Option<Value>>> = Arc::default();
        let sink = received.clone();
        let router = Router::new().route(
            "/api/workouts/routines/",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(routine_json(12, "Push", &[(1, "Bench Press", 3, 10, "0.00", 60)])),
                    )
                }
            }),
        );
        let api = serve(router).await;

        let mut draft = draft_with_bench().with_description("Chest day");
        draft.enable_custom_sets(0).unwrap();
        let routine = draft.submit(&api).await.unwrap();
        assert_eq!(routine.id, 12);

        let body = received.lock().unwrap().clone().unwrap();
        assert_eq!(body["name"], "Push");
        assert_eq!(body["description"], "Chest day");
        assert_eq!(body["exercises"][0]["exercise"], 1);
        assert_eq!(body["exercises"][0]["use_custom_sets"], true);
        assert_eq!(body["exercises"][0]["custom_sets"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_inline_exercise_is_created_and_added() {
        let router = Router::new().route(
            "/api/workouts/exercises/",
            post(|Json(body): Json<Value>| async move {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                (
                    StatusCode::CREATED,
                    Json(exercise_json(77, &name, "back", &["biceps"])),
                )
            }),
        );
        let api = serve(router).await;

        let mut draft = RoutineDraft::new("Pull");
        let exercise = ExerciseDraft::new("Face Pull", Category::Strength, MuscleGroup::Back, Equipment::Cable)
            .with_secondary(SecondaryMuscle::Biceps);
        let index = draft.create_and_add_exercise(&api, &exercise).await.unwrap();
        assert_eq!(index, 0);
        assert_eq!(draft.entries()[0].exercise.id, 77);
        assert_eq!(draft.entries()[0].exercise.name, "Face Pull");
    }
}
