mod body_weight;
pub mod decimal;
mod exercise;
mod routine;
mod session;
mod user;

pub use body_weight::{BodyWeightEntry, NewBodyWeight};
pub use exercise::{
    Category, Equipment, Exercise, ExerciseFilter, MuscleGroup, NewExercise, SecondaryMuscle,
};
pub use routine::{
    CustomSet, LikeResponse, NewRoutine, NewRoutineExercise, Routine, RoutineExercise,
    RoutineFilter, RoutineSummary,
};
pub use session::{NewSet, Session, SessionFilter, SetLog, SetType, WorkoutStats};
pub use user::{
    AuthResponse, AuthTokens, LoginRequest, ProfileUpdate, ProfileUpdateResponse,
    RegisterRequest, User, UserStats,
};
