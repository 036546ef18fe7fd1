use crate::api::{ApiClient, RequestScope};
use crate::models::Session;

use super::state::{ActiveWorkout, TickEvent, WorkoutError};

/// Runs an [`ActiveWorkout`] against the backend.
///
/// Requests are issued through a [`RequestScope`] owned by the controller,
/// so dropping it mid-request aborts the request instead of applying its
/// result to a workout nobody is looking at.
#[derive(Debug)]
pub struct WorkoutSession {
    api: ApiClient,
    scope: RequestScope,
    workout: ActiveWorkout,
}

impl WorkoutSession {
    /// Fetches the routine and opens a new session for it.
    ///
    /// A routine without exercises is rejected before any session is created.
    pub async fn start(api: ApiClient, routine_id: i64) -> Result<Self, WorkoutError> {
        let scope = RequestScope::new();

        let routine = scope.run(api.routine(routine_id)).await.map_err(|e| {
            tracing::warn!(routine_id, error = %e, "failed to load routine");
            e
        })?;
        if routine.exercises.is_empty() {
            return Err(WorkoutError::EmptyRoutine);
        }

        let session = scope.run(api.start_workout(routine_id)).await.map_err(|e| {
            tracing::warn!(routine_id, error = %e, "failed to start session");
            e
        })?;
        tracing::debug!(session_id = session.id, routine_id, "workout started");

        let workout = ActiveWorkout::new(session.id, routine)?;
        Ok(Self {
            api,
            scope,
            workout,
        })
    }

    pub fn workout(&self) -> &ActiveWorkout {
        &self.workout
    }

    pub fn workout_mut(&mut self) -> &mut ActiveWorkout {
        &mut self.workout
    }

    pub fn tick(&mut self) -> TickEvent {
        self.workout.tick()
    }

    /// Saves a set and marks it completed once the server accepted it.
    ///
    /// Returns the rest seconds armed, if any. On failure the set stays
    /// open so it can be retried.
    pub async fn complete_set(&mut self, index: usize) -> Result<Option<u32>, WorkoutError> {
        let payload = self.workout.begin_set_completion(index)?;
        let saved = self
            .scope
            .run(self.api.create_set(&payload))
            .await
            .map_err(|e| {
                tracing::warn!(set_number = payload.set_number, error = %e, "failed to save set");
                e
            })?;
        Ok(self.workout.mark_set_saved(index, &saved))
    }

    /// Completes the session on the server.
    ///
    /// Without confirmation nothing happens and `Ok(None)` is returned. On
    /// failure the workout stays open for another attempt.
    pub async fn finish(&mut self, confirmed: bool) -> Result<Option<Session>, WorkoutError> {
        self.workout.ensure_running()?;
        if !confirmed {
            return Ok(None);
        }

        let session_id = self.workout.session_id();
        let session = self
            .scope
            .run(self.api.complete_session(session_id))
            .await
            .map_err(|e| {
                tracing::warn!(session_id, error = %e, "failed to complete session");
                e
            })?;
        self.workout.mark_finished();
        tracing::debug!(session_id, "workout finished");
        Ok(Some(session))
    }

    /// Aborts requests still in flight.
    pub fn cancel(&self) {
        self.scope.cancel();
    }
}
