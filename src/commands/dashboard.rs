use clap::Args;
use serde_json::json;

use fittrack_core::models::Session;

use super::{require_login, truncate, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct DashboardCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DashboardCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = require_login(config).await?;
        let user = auth.user().cloned().ok_or("Not logged in")?;
        let stats = auth.api().workout_stats().await?;

        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "user": user,
                    "workout_stats": stats,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("Welcome back, {}!", user.username);
                if !user.fitness_goal.is_empty() {
                    println!("Goal: {}", user.fitness_goal);
                }
                println!();

                if let Some(profile_stats) = &user.stats {
                    println!("Total workouts:  {}", profile_stats.total_workouts);
                    println!("Current streak:  {} day(s)", profile_stats.current_streak);
                    println!("Longest streak:  {} day(s)", profile_stats.longest_streak);
                    println!("Lifetime volume: {:.0} kg", profile_stats.total_volume);
                    println!();
                }

                println!("Sessions:     {}", stats.total_sessions);
                println!("Volume:       {:.0} kg", stats.total_volume);
                println!("Avg duration: {:.0} min", stats.average_duration);

                if !stats.recent_sessions.is_empty() {
                    println!("\nRecent workouts");
                    println!("{}", "-".repeat(60));
                    for session in &stats.recent_sessions {
                        println!("{}", recent_line(session));
                    }
                }
            }
        }
        Ok(())
    }
}

fn recent_line(session: &Session) -> String {
    format!(
        "{:<6}  {:<30}  {}  {:>8.0} kg",
        session.id,
        truncate(session.title(), 30),
        session.start_time.format("%Y-%m-%d"),
        session.total_volume
    )
}
