use clap::{Args, Subcommand};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use fittrack_core::input::{coerce_f64, coerce_u32};
use fittrack_core::workout::{
    format_clock, ActiveWorkout, Phase, TickEvent, COUNTDOWN_SECONDS, FINISH_PROMPT,
};
use fittrack_core::{Ticker, WorkoutSession};

use super::require_login;
use crate::config::Config;

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Start a workout from a routine and log it set by set
    Start {
        /// Routine ID
        routine_id: i64,
    },
}

impl WorkoutCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WorkoutSubcommand::Start { routine_id } => {
                let auth = require_login(config).await?;
                let mut session = WorkoutSession::start(auth.api().clone(), *routine_id).await?;
                let result = run_workout(&mut session).await;
                session.cancel();
                result
            }
        }
    }
}

/// A line typed during a workout.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    /// Save the next open set, optionally overriding reps and weight
    Complete {
        reps: Option<String>,
        weight: Option<String>,
    },
    /// Change reps and weight of a set (1-based)
    Edit {
        set: usize,
        reps: String,
        weight: Option<String>,
    },
    Skip,
    Add,
    Next,
    Previous,
    Status,
    Finish,
    Quit,
    Help,
}

const HELP: &str = "\
Commands:
  c, complete [REPS] [WEIGHT]   save the next open set
  e, edit SET REPS [WEIGHT]     change a set before saving it
  s, skip                       skip the rest countdown
  a, add                        add another set
  n, next / p, prev             move between exercises
  st, status                    show the current exercise
  f, finish                     finish the workout
  q, quit                       leave without finishing
  h, help                       show this help";

fn parse_action(line: &str) -> Result<Action, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<String> = words.map(str::to_string).collect();

    let action = match command.as_str() {
        "c" | "complete" | "done" => Action::Complete {
            reps: args.first().cloned(),
            weight: args.get(1).cloned(),
        },
        "e" | "edit" => {
            let set = args
                .first()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or("Usage: edit SET REPS [WEIGHT]")?;
            let reps = args.get(1).cloned().ok_or("Usage: edit SET REPS [WEIGHT]")?;
            Action::Edit {
                set,
                reps,
                weight: args.get(2).cloned(),
            }
        }
        "s" | "skip" => Action::Skip,
        "a" | "add" => Action::Add,
        "n" | "next" => Action::Next,
        "p" | "prev" | "previous" => Action::Previous,
        "st" | "status" | "" => Action::Status,
        "f" | "finish" => Action::Finish,
        "q" | "quit" | "exit" => Action::Quit,
        "h" | "help" | "?" => Action::Help,
        other => return Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
    };
    Ok(action)
}

async fn run_workout(session: &mut WorkoutSession) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = Ticker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut awaiting_finish = false;

    println!(
        "Starting {} in {}...",
        session.workout().routine().name,
        COUNTDOWN_SECONDS
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => match session.tick() {
                TickEvent::Countdown(n) => println!("{}...", n),
                TickEvent::Started => {
                    println!("Go!\n");
                    print_exercise(session.workout());
                    println!("\nType 'help' for commands.");
                }
                TickEvent::Running { rest: Some(left) } if left <= 3 || left % 15 == 0 => {
                    println!("Rest {}", format_clock(left as u64));
                }
                TickEvent::RestFinished => println!("Rest over, next set!"),
                TickEvent::Running { .. } | TickEvent::Idle => {}
            },

            _ = tokio::signal::ctrl_c() => {
                println!("\nWorkout left unfinished.");
                return Ok(());
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Workout left unfinished.");
                    return Ok(());
                };

                if awaiting_finish {
                    awaiting_finish = false;
                    let confirmed = line.trim().eq_ignore_ascii_case("y");
                    match session.finish(confirmed).await {
                        Ok(Some(finished)) => {
                            print_summary(session.workout());
                            if let Some(minutes) = finished.duration_minutes {
                                println!("Recorded duration: {} min", minutes);
                            }
                            return Ok(());
                        }
                        Ok(None) => println!("Keep going!"),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                    continue;
                }

                let action = match parse_action(&line) {
                    Ok(action) => action,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };

                match action {
                    Action::Finish => {
                        if let Err(e) = session.workout().ensure_running() {
                            eprintln!("Error: {}", e);
                            continue;
                        }
                        print!("{} [y/N] ", FINISH_PROMPT);
                        io::stdout().flush()?;
                        awaiting_finish = true;
                    }
                    Action::Quit => {
                        println!("Workout left unfinished.");
                        return Ok(());
                    }
                    action => {
                        if let Err(e) = apply(session, action).await {
                            eprintln!("Error: {}", e);
                        }
                    }
                }
            }
        }
    }
}

async fn apply(
    session: &mut WorkoutSession,
    action: Action,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        Action::Complete { reps, weight } => {
            let index = session
                .workout()
                .next_open_set()
                .ok_or("All sets are done. Use 'add' for another or 'next' to move on.")?;

            if reps.is_some() || weight.is_some() {
                let current = &session.workout().sets()[index];
                let reps = reps.as_deref().map_or(current.reps, coerce_u32);
                let weight = weight.as_deref().map_or(current.weight, coerce_f64);
                session.workout_mut().update_set(index, reps, weight)?;
            }

            let rest = session.complete_set(index).await?;
            let set = &session.workout().sets()[index];
            println!(
                "Set {} saved: {} x {} kg",
                set.set_number, set.reps, set.weight
            );
            match rest {
                Some(seconds) => println!("Rest {}", format_clock(seconds as u64)),
                None if session.workout().next_open_set().is_none() => {
                    if session.workout().is_last_exercise() {
                        println!("Last exercise done. Type 'finish' to end the workout.");
                    } else {
                        println!("Exercise done. Type 'next' to move on.");
                    }
                }
                None => {}
            }
        }

        Action::Edit { set, reps, weight } => {
            let index = set - 1;
            let current_weight = session
                .workout()
                .sets()
                .get(index)
                .map(|s| s.weight)
                .unwrap_or_default();
            let weight = weight.as_deref().map_or(current_weight, coerce_f64);
            session
                .workout_mut()
                .update_set(index, coerce_u32(&reps), weight)?;
            print_sets(session.workout());
        }

        Action::Skip => {
            if session.workout_mut().skip_rest() {
                println!("Rest skipped.");
            } else {
                println!("Not resting.");
            }
        }

        Action::Add => {
            let added = session.workout_mut().add_set()?;
            println!(
                "Added set {}: {} x {} kg",
                added.set_number, added.reps, added.weight
            );
        }

        Action::Next => {
            if session.workout_mut().next_exercise()? {
                print_exercise(session.workout());
            } else {
                println!("This is the last exercise.");
            }
        }

        Action::Previous => {
            if session.workout_mut().previous_exercise()? {
                print_exercise(session.workout());
            } else {
                println!("This is the first exercise.");
            }
        }

        Action::Status => {
            print_exercise(session.workout());
            println!();
            print_progress(session.workout());
        }

        Action::Help => println!("{}", HELP),

        Action::Finish | Action::Quit => {}
    }
    Ok(())
}

fn print_exercise(workout: &ActiveWorkout) {
    let exercise = workout.current_exercise();
    println!(
        "Exercise {}/{}: {}",
        workout.exercise_index() + 1,
        workout.exercise_count(),
        exercise.name()
    );
    if !exercise.notes.is_empty() {
        println!("  {}", exercise.notes);
    }
    print_sets(workout);
}

fn print_sets(workout: &ActiveWorkout) {
    println!("  {:<4} {:>5} {:>9} {:>6}", "SET", "REPS", "WEIGHT", "REST");
    for set in workout.sets() {
        println!(
            "  {:<4} {:>5} {:>6} kg {:>5}s{}",
            set.set_number,
            set.reps,
            set.weight,
            set.rest_seconds,
            if set.completed { "  done" } else { "" }
        );
    }
}

fn print_progress(workout: &ActiveWorkout) {
    match workout.phase() {
        Phase::Countdown(n) => println!("Starting in {}", n),
        Phase::Running | Phase::Finished => {
            println!("Elapsed: {}", format_clock(workout.elapsed_seconds()));
        }
    }
    if let Some(rest) = workout.rest() {
        println!(
            "Resting: {} of {}",
            format_clock(rest.remaining as u64),
            format_clock(rest.duration as u64)
        );
    }
    println!(
        "Sets: {}  Volume: {:.0} kg",
        workout.completed_sets(),
        workout.volume()
    );
}

fn print_summary(workout: &ActiveWorkout) {
    println!("\nWorkout complete!");
    println!("Time:   {}", format_clock(workout.elapsed_seconds()));
    println!("Sets:   {}", workout.completed_sets());
    println!("Volume: {:.0} kg", workout.volume());
}
