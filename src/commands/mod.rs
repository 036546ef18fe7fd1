mod auth;
mod config_cmd;
mod dashboard;
mod exercise;
mod history;
mod progress;
mod routine;
mod workout;

pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use exercise::ExerciseCommand;
pub use history::HistoryCommand;
pub use progress::ProgressCommand;
pub use routine::RoutineCommand;
pub use workout::WorkoutCommand;

use clap::ValueEnum;
use std::io::{self, Write};

use fittrack_core::auth::{AuthState, FileTokenStore};
use fittrack_core::guard::{self, GuardOutcome};
use fittrack_core::ApiClient;

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Auth state for the configured backend, restored from the stored tokens.
pub(crate) async fn restore_auth(config: &Config) -> AuthState<FileTokenStore> {
    let api = ApiClient::new(config.api_url.value.clone());
    let store = FileTokenStore::new(config.data_dir.value.clone());
    let mut auth = AuthState::new(api, store);
    auth.restore().await;
    auth
}

/// Restores auth and requires a logged-in user.
pub(crate) async fn require_login(
    config: &Config,
) -> Result<AuthState<FileTokenStore>, Box<dyn std::error::Error>> {
    let auth = restore_auth(config).await;
    match guard::check(&auth) {
        GuardOutcome::Allow => Ok(auth),
        GuardOutcome::Loading | GuardOutcome::RedirectToLogin => {
            tracing::debug!(data_dir = %config.data_dir.value.display(), "no usable session");
            Err("Not logged in. Run 'fit auth login' first.".into())
        }
    }
}

/// Today's date in UTC, matching how the backend dates sessions.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Shortens `text` to `width` characters for table columns.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Reads one trimmed line after printing `label`.
pub(crate) fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Asks a yes/no question; anything but "y" is a no.
pub(crate) fn confirm(question: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bench Press", 30), "Bench Press");
        assert_eq!(truncate("Incline Dumbbell Bench Press", 10), "Incline...");
        assert_eq!(truncate("Übungsübersicht", 6), "Übu...");
    }
}
