use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewSet, Session, SessionFilter, SetLog, WorkoutStats};

/// Editable session fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApiClient {
    pub async fn sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>, ApiError> {
        self.get_query("workouts/sessions/", filter).await
    }

    pub async fn session(&self, id: i64) -> Result<Session, ApiError> {
        self.get(&format!("workouts/sessions/{}/", id)).await
    }

    pub async fn update_session(&self, id: i64, update: &SessionUpdate) -> Result<Session, ApiError> {
        self.patch(&format!("workouts/sessions/{}/", id), update)
            .await
    }

    /// Marks a session completed; the server computes duration and totals.
    pub async fn complete_session(&self, id: i64) -> Result<Session, ApiError> {
        self.post_empty(&format!("workouts/sessions/{}/complete/", id))
            .await
    }

    pub async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("workouts/sessions/{}/", id)).await
    }

    pub async fn session_sets(&self, session_id: i64) -> Result<Vec<SetLog>, ApiError> {
        self.get(&format!("workouts/sessions/{}/sets/", session_id))
            .await
    }

    pub async fn create_set(&self, set: &NewSet) -> Result<SetLog, ApiError> {
        self.post(&format!("workouts/sessions/{}/sets/", set.session), set)
            .await
    }

    pub async fn update_set(&self, id: i64, set: &NewSet) -> Result<SetLog, ApiError> {
        self.put(&format!("workouts/sets/{}/", id), set).await
    }

    pub async fn delete_set(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("workouts/sets/{}/", id)).await
    }

    pub async fn workout_stats(&self) -> Result<WorkoutStats, ApiError> {
        self.get("workouts/stats/").await
    }
}
