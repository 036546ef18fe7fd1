use thiserror::Error;

use crate::error::ApiError;
use crate::models::{NewSet, Routine, RoutineExercise, SetLog, SetType};

/// Seconds counted down before a workout starts.
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Confirmation asked before a workout is finished.
pub const FINISH_PROMPT: &str = "Are you sure you want to finish this workout?";

/// Errors raised by the active workout flow.
#[derive(Error, Debug)]
pub enum WorkoutError {
    #[error("Please enter valid reps (at least 1)")]
    InvalidReps,

    #[error("Workout has not started yet")]
    NotStarted,

    #[error("Workout is already finished")]
    Finished,

    #[error("No set {0} for this exercise")]
    NoSuchSet(usize),

    #[error("Set {0} is already completed")]
    SetCompleted(u32),

    #[error("Routine has no exercises")]
    EmptyRoutine,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seconds left before the session clock starts
    Countdown(u32),
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    pub remaining: u32,
    pub duration: u32,
}

/// One row of the current exercise's set list.
#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    /// Server id, once saved
    pub id: Option<i64>,
    pub set_number: u32,
    pub reps: u32,
    pub weight: f64,
    pub rest_seconds: u32,
    pub completed: bool,
}

/// What a single clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Countdown still running, with the seconds left
    Countdown(u32),
    /// Countdown reached zero
    Started,
    /// Session clock advanced; carries the rest seconds left, if resting
    Running { rest: Option<u32> },
    /// Rest countdown reached zero on this tick
    RestFinished,
    /// Nothing to do, the workout is finished
    Idle,
}

/// State of one workout being performed.
///
/// All timing is driven by [`ActiveWorkout::tick`], called once per second
/// by a single clock. Countdown, elapsed time and rest never have timers of
/// their own.
#[derive(Debug, Clone)]
pub struct ActiveWorkout {
    session_id: i64,
    routine: Routine,
    phase: Phase,
    elapsed: u64,
    exercise_index: usize,
    sets: Vec<SetEntry>,
    rest: Option<RestTimer>,
    completed_sets: u32,
    volume: f64,
}

impl ActiveWorkout {
    pub fn new(session_id: i64, mut routine: Routine) -> Result<Self, WorkoutError> {
        if routine.exercises.is_empty() {
            return Err(WorkoutError::EmptyRoutine);
        }
        routine.exercises.sort_by_key(|e| e.order);

        let sets = initial_sets(&routine.exercises[0]);
        Ok(Self {
            session_id,
            routine,
            phase: Phase::Countdown(COUNTDOWN_SECONDS),
            elapsed: 0,
            exercise_index: 0,
            sets,
            rest: None,
            completed_sets: 0,
            volume: 0.0,
        })
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    pub fn exercise_count(&self) -> usize {
        self.routine.exercises.len()
    }

    pub fn current_exercise(&self) -> &RoutineExercise {
        &self.routine.exercises[self.exercise_index]
    }

    pub fn is_last_exercise(&self) -> bool {
        self.exercise_index + 1 == self.exercise_count()
    }

    pub fn sets(&self) -> &[SetEntry] {
        &self.sets
    }

    pub fn rest(&self) -> Option<RestTimer> {
        self.rest
    }

    /// Sets saved during this workout, across all exercises.
    pub fn completed_sets(&self) -> u32 {
        self.completed_sets
    }

    /// Volume of the sets saved during this workout.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Index of the first set not yet completed.
    pub fn next_open_set(&self) -> Option<usize> {
        self.sets.iter().position(|s| !s.completed)
    }

    /// Advances the clock by one second.
    pub fn tick(&mut self) -> TickEvent {
        match self.phase {
            Phase::Countdown(n) => {
                let n = n.saturating_sub(1);
                if n == 0 {
                    self.phase = Phase::Running;
                    TickEvent::Started
                } else {
                    self.phase = Phase::Countdown(n);
                    TickEvent::Countdown(n)
                }
            }
            Phase::Running => {
                self.elapsed += 1;
                match self.rest.as_mut() {
                    Some(rest) => {
                        rest.remaining = rest.remaining.saturating_sub(1);
                        if rest.remaining == 0 {
                            self.rest = None;
                            TickEvent::RestFinished
                        } else {
                            TickEvent::Running {
                                rest: Some(rest.remaining),
                            }
                        }
                    }
                    None => TickEvent::Running { rest: None },
                }
            }
            Phase::Finished => TickEvent::Idle,
        }
    }

    /// Changes reps and weight of a set that has not been completed yet.
    pub fn update_set(&mut self, index: usize, reps: u32, weight: f64) -> Result<(), WorkoutError> {
        self.ensure_open()?;
        let entry = self
            .sets
            .get_mut(index)
            .ok_or(WorkoutError::NoSuchSet(index + 1))?;
        if entry.completed {
            return Err(WorkoutError::SetCompleted(entry.set_number));
        }
        entry.reps = reps;
        entry.weight = weight.max(0.0);
        Ok(())
    }

    /// Validates a set for saving and builds its request body.
    ///
    /// Nothing is mutated; call [`ActiveWorkout::mark_set_saved`] once the
    /// server has accepted the set.
    pub fn begin_set_completion(&self, index: usize) -> Result<NewSet, WorkoutError> {
        self.ensure_running()?;
        let entry = self
            .sets
            .get(index)
            .ok_or(WorkoutError::NoSuchSet(index + 1))?;
        if entry.completed {
            return Err(WorkoutError::SetCompleted(entry.set_number));
        }
        if entry.reps < 1 {
            return Err(WorkoutError::InvalidReps);
        }

        Ok(NewSet {
            session: self.session_id,
            exercise: self.current_exercise().exercise,
            set_number: entry.set_number,
            set_type: SetType::Normal,
            reps: entry.reps,
            weight: entry.weight,
            rest_seconds: None,
        })
    }

    /// Marks a set completed after the server saved it.
    ///
    /// Arms the rest countdown unless this is the exercise's last set and
    /// returns its duration.
    pub fn mark_set_saved(&mut self, index: usize, saved: &SetLog) -> Option<u32> {
        let last_index = self.sets.len().checked_sub(1)?;
        let entry = self.sets.get_mut(index)?;
        if entry.completed {
            return None;
        }
        entry.completed = true;
        entry.id = Some(saved.id);
        self.completed_sets += 1;
        self.volume += entry.reps as f64 * entry.weight;

        let duration = entry.rest_seconds;
        if index < last_index && duration > 0 {
            self.rest = Some(RestTimer {
                remaining: duration,
                duration,
            });
            Some(duration)
        } else {
            None
        }
    }

    /// Ends the rest countdown early. Returns false if not resting.
    pub fn skip_rest(&mut self) -> bool {
        self.rest.take().is_some()
    }

    /// Appends a set copying the last one's reps and weight.
    pub fn add_set(&mut self) -> Result<&SetEntry, WorkoutError> {
        self.ensure_open()?;
        let exercise = self.current_exercise();
        let (reps, weight, rest_seconds) = match self.sets.last() {
            Some(last) => (last.reps, last.weight, last.rest_seconds),
            None => (
                exercise.default_reps,
                exercise.default_weight,
                exercise.default_rest_seconds,
            ),
        };
        self.sets.push(SetEntry {
            id: None,
            set_number: self.sets.len() as u32 + 1,
            reps,
            weight,
            rest_seconds,
            completed: false,
        });
        Ok(&self.sets[self.sets.len() - 1])
    }

    /// Moves to the next exercise. Returns false when already on the last.
    pub fn next_exercise(&mut self) -> Result<bool, WorkoutError> {
        self.ensure_open()?;
        if self.is_last_exercise() {
            return Ok(false);
        }
        self.go_to(self.exercise_index + 1);
        Ok(true)
    }

    /// Moves to the previous exercise. Returns false when already on the first.
    pub fn previous_exercise(&mut self) -> Result<bool, WorkoutError> {
        self.ensure_open()?;
        if self.exercise_index == 0 {
            return Ok(false);
        }
        self.go_to(self.exercise_index - 1);
        Ok(true)
    }

    pub fn ensure_running(&self) -> Result<(), WorkoutError> {
        match self.phase {
            Phase::Running => Ok(()),
            Phase::Countdown(_) => Err(WorkoutError::NotStarted),
            Phase::Finished => Err(WorkoutError::Finished),
        }
    }

    pub(crate) fn mark_finished(&mut self) {
        self.phase = Phase::Finished;
        self.rest = None;
    }

    fn ensure_open(&self) -> Result<(), WorkoutError> {
        if self.phase == Phase::Finished {
            Err(WorkoutError::Finished)
        } else {
            Ok(())
        }
    }

    fn go_to(&mut self, index: usize) {
        self.exercise_index = index;
        self.sets = initial_sets(&self.routine.exercises[index]);
        self.rest = None;
    }
}

fn initial_sets(exercise: &RoutineExercise) -> Vec<SetEntry> {
    if exercise.has_custom_sets() {
        return exercise
            .custom_sets
            .iter()
            .enumerate()
            .map(|(i, set)| SetEntry {
                id: None,
                set_number: i as u32 + 1,
                reps: set.reps,
                weight: set.weight,
                rest_seconds: set.rest_seconds,
                completed: false,
            })
            .collect();
    }

    (1..=exercise.default_sets)
        .map(|set_number| SetEntry {
            id: None,
            set_number,
            reps: exercise.default_reps,
            weight: exercise.default_weight,
            rest_seconds: exercise.default_rest_seconds,
            completed: false,
        })
        .collect()
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomSet;

    fn routine(exercises: Vec<RoutineExercise>) -> Routine {
        Routine {
            id: 1,
            name: "Push".to_string(),
            description: String::new(),
            is_public: false,
            exercises,
            total_uses: 0,
            average_duration: 0,
            is_liked: false,
            likes_count: 0,
            username: "a".to_string(),
        }
    }

    fn two_exercise_workout() -> ActiveWorkout {
        ActiveWorkout::new(
            9,
            routine(vec![
                RoutineExercise::new(1, 0).with_defaults(3, 10, 0.0, 60),
                RoutineExercise::new(2, 1).with_defaults(2, 12, 15.0, 90),
            ]),
        )
        .unwrap()
    }

    fn running(mut workout: ActiveWorkout) -> ActiveWorkout {
        for _ in 0..COUNTDOWN_SECONDS {
            workout.tick();
        }
        assert_eq!(workout.phase(), Phase::Running);
        workout
    }

    fn saved(id: i64) -> SetLog {
        serde_json::from_value(serde_json::json!({
            "id": id, "exercise": 1, "set_number": 1, "reps": 8, "weight": "20.00"
        }))
        .unwrap()
    }

    #[test]
    fn test_countdown_then_running() {
        let mut workout = two_exercise_workout();
        assert_eq!(workout.phase(), Phase::Countdown(3));
        assert_eq!(workout.tick(), TickEvent::Countdown(2));
        assert_eq!(workout.tick(), TickEvent::Countdown(1));
        assert_eq!(workout.tick(), TickEvent::Started);
        assert_eq!(workout.elapsed_seconds(), 0);

        assert_eq!(workout.tick(), TickEvent::Running { rest: None });
        assert_eq!(workout.tick(), TickEvent::Running { rest: None });
        assert_eq!(workout.elapsed_seconds(), 2);
    }

    #[test]
    fn test_sets_initialized_from_defaults() {
        let workout = running(two_exercise_workout());
        let sets = workout.sets();
        assert_eq!(sets.len(), 3);
        for (i, set) in sets.iter().enumerate() {
            assert_eq!(set.set_number, i as u32 + 1);
            assert_eq!(set.reps, 10);
            assert_eq!(set.weight, 0.0);
            assert!(!set.completed);
        }
    }

    #[test]
    fn test_exercises_follow_order_field() {
        let workout = ActiveWorkout::new(
            1,
            routine(vec![
                RoutineExercise::new(2, 1).with_defaults(2, 5, 0.0, 60),
                RoutineExercise::new(1, 0).with_defaults(4, 8, 0.0, 60),
            ]),
        )
        .unwrap();
        assert_eq!(workout.current_exercise().exercise, 1);
        assert_eq!(workout.sets().len(), 4);
    }

    #[test]
    fn test_empty_routine_rejected() {
        assert!(matches!(
            ActiveWorkout::new(1, routine(vec![])),
            Err(WorkoutError::EmptyRoutine)
        ));
    }

    #[test]
    fn test_complete_rejected_during_countdown() {
        let workout = two_exercise_workout();
        assert!(matches!(
            workout.begin_set_completion(0),
            Err(WorkoutError::NotStarted)
        ));
    }

    #[test]
    fn test_zero_reps_rejected_without_mutation() {
        let mut workout = running(two_exercise_workout());
        workout.update_set(0, 0, 20.0).unwrap();
        let before = workout.sets().to_vec();

        let err = workout.begin_set_completion(0).unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidReps));
        assert_eq!(err.to_string(), "Please enter valid reps (at least 1)");
        assert_eq!(workout.sets(), &before[..]);
        assert!(workout.rest().is_none());
    }

    #[test]
    fn test_zero_weight_is_allowed() {
        let workout = running(two_exercise_workout());
        let payload = workout.begin_set_completion(0).unwrap();
        assert_eq!(payload.weight, 0.0);
        assert_eq!(payload.reps, 10);
        assert_eq!(payload.session, 9);
        assert_eq!(payload.exercise, 1);
    }

    #[test]
    fn test_completing_set_arms_rest_that_counts_to_zero() {
        let mut workout = running(two_exercise_workout());
        workout.update_set(0, 8, 20.0).unwrap();
        workout.begin_set_completion(0).unwrap();

        assert_eq!(workout.mark_set_saved(0, &saved(1)), Some(60));
        assert!(workout.sets()[0].completed);
        assert_eq!(workout.sets()[0].id, Some(1));
        assert_eq!(
            workout.rest(),
            Some(RestTimer {
                remaining: 60,
                duration: 60
            })
        );

        for expected in (1..60).rev() {
            assert_eq!(
                workout.tick(),
                TickEvent::Running {
                    rest: Some(expected)
                }
            );
        }
        assert_eq!(workout.tick(), TickEvent::RestFinished);
        assert!(workout.rest().is_none());
        assert_eq!(workout.tick(), TickEvent::Running { rest: None });
    }

    #[test]
    fn test_last_set_starts_no_rest() {
        let mut workout = running(two_exercise_workout());
        for index in 0..3 {
            workout.begin_set_completion(index).unwrap();
            let rest = workout.mark_set_saved(index, &saved(index as i64 + 1));
            if index < 2 {
                assert_eq!(rest, Some(60));
                assert!(workout.skip_rest());
            } else {
                assert_eq!(rest, None);
            }
        }
        assert!(workout.rest().is_none());
        assert_eq!(workout.completed_sets(), 3);
        assert_eq!(workout.next_open_set(), None);
    }

    #[test]
    fn test_completed_set_cannot_be_completed_or_edited_again() {
        let mut workout = running(two_exercise_workout());
        workout.mark_set_saved(0, &saved(1));
        assert!(matches!(
            workout.begin_set_completion(0),
            Err(WorkoutError::SetCompleted(1))
        ));
        assert!(matches!(
            workout.update_set(0, 5, 5.0),
            Err(WorkoutError::SetCompleted(1))
        ));
        assert_eq!(workout.next_open_set(), Some(1));
    }

    #[test]
    fn test_skip_rest() {
        let mut workout = running(two_exercise_workout());
        assert!(!workout.skip_rest());
        workout.mark_set_saved(0, &saved(1));
        assert!(workout.skip_rest());
        assert!(workout.rest().is_none());
        assert_eq!(workout.tick(), TickEvent::Running { rest: None });
    }

    #[test]
    fn test_navigation_resets_sets_and_rest() {
        let mut workout = running(two_exercise_workout());
        workout.update_set(0, 8, 20.0).unwrap();
        workout.mark_set_saved(0, &saved(1));
        assert!(workout.rest().is_some());

        assert!(workout.next_exercise().unwrap());
        assert_eq!(workout.exercise_index(), 1);
        assert!(workout.rest().is_none());
        assert_eq!(workout.sets().len(), 2);
        assert!(workout.sets().iter().all(|s| s.reps == 12 && s.weight == 15.0 && !s.completed));

        assert!(!workout.next_exercise().unwrap());
        assert_eq!(workout.exercise_index(), 1);

        assert!(workout.previous_exercise().unwrap());
        assert_eq!(workout.sets().len(), 3);
        assert!(workout.sets().iter().all(|s| s.reps == 10 && !s.completed));
        assert!(!workout.previous_exercise().unwrap());
    }

    #[test]
    fn test_add_set_clones_last() {
        let mut workout = running(two_exercise_workout());
        workout.update_set(2, 6, 42.5).unwrap();
        let added = workout.add_set().unwrap().clone();
        assert_eq!(added.set_number, 4);
        assert_eq!(added.reps, 6);
        assert_eq!(added.weight, 42.5);
        assert!(!added.completed);
    }

    #[test]
    fn test_custom_sets_drive_entries_and_rest() {
        let exercise = RoutineExercise::new(1, 0).with_custom_sets(vec![
            CustomSet::new(1, 12, 40.0, 45),
            CustomSet::new(2, 8, 50.0, 120),
            CustomSet::new(3, 6, 55.0, 0),
        ]);
        let mut workout = running(ActiveWorkout::new(1, routine(vec![exercise])).unwrap());
        let reps: Vec<u32> = workout.sets().iter().map(|s| s.reps).collect();
        assert_eq!(reps, vec![12, 8, 6]);

        assert_eq!(workout.mark_set_saved(0, &saved(1)), Some(45));
        workout.skip_rest();
        assert_eq!(workout.mark_set_saved(1, &saved(2)), Some(120));
    }

    #[test]
    fn test_finished_rejects_everything() {
        let mut workout = running(two_exercise_workout());
        workout.mark_finished();

        assert_eq!(workout.tick(), TickEvent::Idle);
        assert!(matches!(workout.begin_set_completion(0), Err(WorkoutError::Finished)));
        assert!(matches!(workout.add_set(), Err(WorkoutError::Finished)));
        assert!(matches!(workout.next_exercise(), Err(WorkoutError::Finished)));
        assert!(matches!(workout.update_set(0, 1, 1.0), Err(WorkoutError::Finished)));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(3725), "62:05");
    }
}
