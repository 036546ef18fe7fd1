//! FitTrack Core Library
//!
//! Typed API client, auth state, and the workout, routine and progress
//! logic shared by FitTrack applications.

pub mod api;
pub mod auth;
pub mod error;
pub mod guard;
pub mod history;
pub mod input;
pub mod models;
pub mod progress;
pub mod routine_builder;
pub mod workout;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, RequestScope, DEFAULT_API_URL};
pub use auth::{AuthError, AuthState, FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
pub use error::ApiError;
pub use guard::GuardOutcome;
pub use models::{
    AuthTokens, BodyWeightEntry, Category, CustomSet, Equipment, Exercise, MuscleGroup, Routine,
    RoutineExercise, RoutineSummary, SecondaryMuscle, Session, SetLog, User,
};
pub use progress::{ProgressError, TimeRange};
pub use routine_builder::{ExerciseDraft, RoutineDraft, RoutineError};
pub use workout::{ActiveWorkout, Ticker, WorkoutError, WorkoutSession};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
