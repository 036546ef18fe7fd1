use clap::{Args, Subcommand};

use fittrack_core::history::group_by_day;
use fittrack_core::models::SessionFilter;

use super::{require_login, today, truncate, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List past workouts grouped by day
    List {
        /// Include workouts that were never finished
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one workout with its sets
    Show {
        /// Session ID
        id: i64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl HistoryCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = require_login(config).await?;
        let api = auth.api();

        match &self.command {
            HistorySubcommand::List { all, format } => {
                let filter = if *all {
                    SessionFilter::default()
                } else {
                    SessionFilter::completed()
                };
                let sessions = api.sessions(&filter).await?;

                if sessions.is_empty() {
                    println!("No workouts found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&sessions)?);
                    }
                    OutputFormat::Text => {
                        for day in group_by_day(&sessions, today()) {
                            println!("{}", day.label);
                            for session in day.sessions {
                                let duration = session
                                    .duration_minutes
                                    .map(|m| format!("{} min", m))
                                    .unwrap_or_else(|| "-".to_string());
                                println!(
                                    "  {:<6}  {:<30}  {:>7}  {:>3} sets  {:>7.0} kg{}",
                                    session.id,
                                    truncate(session.title(), 30),
                                    duration,
                                    session.total_sets,
                                    session.total_volume,
                                    if session.is_completed { "" } else { "  (unfinished)" }
                                );
                            }
                            println!();
                        }
                        println!("Total: {} workout(s)", sessions.len());
                    }
                }
                Ok(())
            }

            HistorySubcommand::Show { id, format } => {
                let session = api.session(*id).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&session)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", session);
                    }
                }
                Ok(())
            }
        }
    }
}
