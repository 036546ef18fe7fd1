//! Active workout flow: countdown, session clock, per-set logging and rest.

mod clock;
mod session;
mod state;

pub use clock::Ticker;
pub use session::WorkoutSession;
pub use state::{
    format_clock, ActiveWorkout, Phase, RestTimer, SetEntry, TickEvent, WorkoutError,
    COUNTDOWN_SECONDS, FINISH_PROMPT,
};
