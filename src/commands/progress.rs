use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::json;

use fittrack_core::models::{ExerciseFilter, NewBodyWeight, SessionFilter};
use fittrack_core::progress::{
    body_weight_series, exercise_progress, filter_sessions, log_body_weight, muscle_volume,
    summarize,
};
use fittrack_core::TimeRange;

use super::{require_login, today, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ProgressCommand {
    #[command(subcommand)]
    pub command: ProgressSubcommand,
}

#[derive(Subcommand)]
pub enum ProgressSubcommand {
    /// Headline numbers for a time range
    Summary {
        /// Time range (week, month, all)
        #[arg(long, short, default_value = "month")]
        range: TimeRange,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Training volume per muscle group and day
    Muscles {
        /// Time range (week, month, all)
        #[arg(long, short, default_value = "month")]
        range: TimeRange,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Weight and volume progression of one exercise
    Exercise {
        /// Exercise ID
        id: i64,

        /// Time range (week, month, all)
        #[arg(long, short, default_value = "month")]
        range: TimeRange,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Body-weight history
    Weight {
        /// Time range (week, month, all)
        #[arg(long, short, default_value = "month")]
        range: TimeRange,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Record today's body weight
    LogWeight {
        /// Weight in kg
        weight: f64,

        /// Date of the measurement (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
}

impl ProgressCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = require_login(config).await?;
        let api = auth.api();
        let today = today();

        match &self.command {
            ProgressSubcommand::Summary { range, format } => {
                let sessions = api.sessions(&SessionFilter::completed()).await?;
                let weights = api.body_weights().await?;
                let summary = summarize(&sessions, &weights, *range, today);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    }
                    OutputFormat::Text => {
                        println!("Progress ({})", range_label(*range));
                        println!("{}\n", "=".repeat(20));
                        println!("Workouts:     {}", summary.workouts);
                        println!("Volume:       {:.0} kg", summary.total_volume);
                        println!("Sets:         {}", summary.total_sets);
                        println!("Avg duration: {:.0} min", summary.average_duration);
                        match summary.current_weight {
                            Some(weight) => println!("Body weight:  {:.1} kg", weight),
                            None => println!("Body weight:  -"),
                        }
                        if let Some(change) = summary.weight_change {
                            println!("Change:       {:+.1} kg", change);
                        }
                    }
                }
                Ok(())
            }

            ProgressSubcommand::Muscles { range, format } => {
                let sessions = api.sessions(&SessionFilter::completed()).await?;
                let exercises = api.exercises(&ExerciseFilter::default()).await?;
                let window = filter_sessions(&sessions, *range, today);
                let points = muscle_volume(&window, &exercises);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&points)?);
                    }
                    OutputFormat::Text => {
                        if points.is_empty() {
                            println!("No training volume in the {}", range_label(*range));
                            return Ok(());
                        }
                        for point in &points {
                            let trained: Vec<String> = point
                                .volumes
                                .iter()
                                .filter(|(_, volume)| **volume > 0.0)
                                .map(|(muscle, volume)| format!("{} {:.0}", muscle, volume))
                                .collect();
                            println!("{}  {}", point.date, trained.join(", "));
                        }
                    }
                }
                Ok(())
            }

            ProgressSubcommand::Exercise { id, range, format } => {
                let exercise = api.exercise(*id).await?;
                let sessions = api.sessions(&SessionFilter::completed()).await?;
                let window = filter_sessions(&sessions, *range, today);
                let points = exercise_progress(&window, exercise.id);

                match format {
                    OutputFormat::Json => {
                        let output = json!({
                            "exercise": exercise,
                            "progress": points,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        if points.is_empty() {
                            println!(
                                "No sets of {} in the {}",
                                exercise.name,
                                range_label(*range)
                            );
                            return Ok(());
                        }
                        println!("{}", exercise.name);
                        println!(
                            "{:<10}  {:>10}  {:>10}  {:>10}",
                            "DATE", "MAX (kg)", "AVG (kg)", "VOLUME"
                        );
                        println!("{}", "-".repeat(48));
                        for point in &points {
                            println!(
                                "{:<10}  {:>10.1}  {:>10.1}  {:>10.0}",
                                point.date, point.max_weight, point.avg_weight, point.volume
                            );
                        }
                    }
                }
                Ok(())
            }

            ProgressSubcommand::Weight { range, format } => {
                let entries = api.body_weights().await?;
                let series = body_weight_series(&entries, *range, today);

                match format {
                    OutputFormat::Json => {
                        let points: Vec<_> = series
                            .iter()
                            .map(|(date, weight)| json!({"date": date, "weight": weight}))
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&points)?);
                    }
                    OutputFormat::Text => {
                        if series.is_empty() {
                            println!("No body weight logged in the {}", range_label(*range));
                            return Ok(());
                        }
                        for (date, weight) in &series {
                            println!("{}  {:.1} kg", date, weight);
                        }
                    }
                }
                Ok(())
            }

            ProgressSubcommand::LogWeight {
                weight,
                date,
                notes,
            } => {
                let mut entry = NewBodyWeight::new(*weight, date.unwrap_or(today));
                if let Some(notes) = notes {
                    entry = entry.with_notes(notes);
                }

                let saved = log_body_weight(api, &entry).await?;
                println!("Logged: {}", saved);
                Ok(())
            }
        }
    }
}

fn range_label(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Week => "last 7 days",
        TimeRange::Month => "last 30 days",
        TimeRange::All => "all time",
    }
}
