//! In-process fake backend for exercising the real HTTP client in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use crate::api::ApiClient;

/// Serves `router` on an ephemeral local port and returns a client for it.
///
/// Routes are expected under `/api`, matching the real backend layout.
pub async fn serve(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{}/api", addr))
}

/// Shared request counter.
#[derive(Debug, Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn user_json(id: i64, email: &str, username: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "username": username,
        "first_name": "",
        "last_name": "",
        "full_name": "",
        "bio": "",
        "profile_picture": null,
        "fitness_goal": "general",
        "height": null,
        "weight": null,
        "age": null,
        "stats": {
            "total_workouts": 0,
            "current_streak": 0,
            "longest_streak": 0,
            "total_volume": "0.00",
            "followers_count": 0,
            "following_count": 0
        }
    })
}

pub fn exercise_json(id: i64, name: &str, muscle_group: &str, secondary: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "category": "strength",
        "muscle_group": muscle_group,
        "equipment": "barbell",
        "secondary_muscles": secondary,
        "instructions": "",
        "is_custom": false
    })
}

/// Routine detail whose exercises are `(exercise id, name, sets, reps, weight, rest)`.
pub fn routine_json(id: i64, name: &str, exercises: &[(i64, &str, u32, u32, &str, u32)]) -> Value {
    let exercises: Vec<Value> = exercises
        .iter()
        .enumerate()
        .map(|(order, (exercise, ex_name, sets, reps, weight, rest))| {
            json!({
                "id": 100 + order as i64,
                "exercise": exercise,
                "exercise_details": exercise_json(*exercise, ex_name, "chest", &[]),
                "order": order,
                "default_sets": sets,
                "default_reps": reps,
                "default_weight": weight,
                "default_rest_seconds": rest,
                "notes": "",
                "use_custom_sets": false,
                "custom_sets": []
            })
        })
        .collect();
    json!({
        "id": id,
        "name": name,
        "description": "",
        "is_public": false,
        "exercises": exercises,
        "exercise_count": exercises.len(),
        "total_uses": 0,
        "average_duration": 0,
        "is_liked": false,
        "likes_count": 0,
        "username": "a"
    })
}

pub fn session_json(id: i64, routine: i64, routine_name: &str, completed: bool) -> Value {
    json!({
        "id": id,
        "routine": routine,
        "routine_name": routine_name,
        "name": routine_name,
        "notes": "",
        "start_time": "2025-03-01T10:00:00Z",
        "end_time": if completed { json!("2025-03-01T10:45:00Z") } else { Value::Null },
        "duration_minutes": if completed { json!(45) } else { Value::Null },
        "total_volume": "0.00",
        "total_sets": 0,
        "exercise_count": 0,
        "is_completed": completed,
        "exercise_sets": []
    })
}
