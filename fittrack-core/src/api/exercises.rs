use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Exercise, ExerciseFilter, NewExercise};

impl ApiClient {
    pub async fn exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ApiError> {
        self.get_query("workouts/exercises/", filter).await
    }

    pub async fn exercise(&self, id: i64) -> Result<Exercise, ApiError> {
        self.get(&format!("workouts/exercises/{}/", id)).await
    }

    pub async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, ApiError> {
        self.post("workouts/exercises/", exercise).await
    }
}
