use super::ApiClient;
use crate::error::ApiError;
use crate::models::{LikeResponse, NewRoutine, Routine, RoutineFilter, RoutineSummary, Session};

impl ApiClient {
    pub async fn routines(&self, filter: &RoutineFilter) -> Result<Vec<RoutineSummary>, ApiError> {
        self.get_query("workouts/routines/", filter).await
    }

    pub async fn routine(&self, id: i64) -> Result<Routine, ApiError> {
        self.get(&format!("workouts/routines/{}/", id)).await
    }

    pub async fn create_routine(&self, routine: &NewRoutine) -> Result<Routine, ApiError> {
        self.post("workouts/routines/", routine).await
    }

    pub async fn update_routine(&self, id: i64, routine: &NewRoutine) -> Result<Routine, ApiError> {
        self.put(&format!("workouts/routines/{}/", id), routine).await
    }

    pub async fn delete_routine(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("workouts/routines/{}/", id)).await
    }

    /// Toggles the caller's like on a routine.
    pub async fn like_routine(&self, id: i64) -> Result<LikeResponse, ApiError> {
        self.post_empty(&format!("workouts/routines/{}/like/", id))
            .await
    }

    /// Starts a new session from a routine.
    pub async fn start_workout(&self, routine_id: i64) -> Result<Session, ApiError> {
        self.post_empty(&format!("workouts/routines/{}/start/", routine_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRoutineExercise;
    use crate::test_support::{routine_json, serve};
    use axum::extract::Path;
    use axum::routing::put;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_update_routine_puts_full_body() {
        let received = Arc::new(Mutex::new(None));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/workouts/routines/{id}/",
            put(move |Path(id): Path<i64>, Json(body): Json<Value>| async move {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                *sink.lock().unwrap() = Some((id, body));
                Json(routine_json(id, &name, &[(1, "Bench Press", 5, 5, "80.00", 180)]))
            }),
        );
        let api = serve(router).await;

        let bench = NewRoutineExercise {
            exercise: 1,
            order: 0,
            default_sets: 5,
            default_reps: 5,
            default_weight: 80.0,
            default_rest_seconds: 180,
            notes: String::new(),
            use_custom_sets: false,
            custom_sets: Vec::new(),
        };
        let update = NewRoutine {
            name: "Strength A".to_string(),
            description: "Heavy day".to_string(),
            is_public: true,
            exercises: vec![bench],
        };

        let routine = api.update_routine(4, &update).await.unwrap();
        assert_eq!(routine.id, 4);
        assert_eq!(routine.name, "Strength A");
        assert_eq!(routine.exercises[0].default_weight, 80.0);

        let (id, body) = received.lock().unwrap().take().unwrap();
        assert_eq!(id, 4);
        assert_eq!(body["is_public"], true);
        assert_eq!(body["description"], "Heavy day");
        assert_eq!(body["exercises"][0]["default_sets"], 5);
    }
}
