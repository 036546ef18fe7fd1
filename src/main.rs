use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{
    AuthCommand, ConfigCommand, DashboardCommand, ExerciseCommand, HistoryCommand,
    ProgressCommand, RoutineCommand, WorkoutCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "fit")]
#[command(version)]
#[command(about = "A workout tracking CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register and manage your profile
    Auth(AuthCommand),

    /// Show your stats and recent workouts
    Dashboard(DashboardCommand),

    /// Browse and create exercises
    Exercise(ExerciseCommand),

    /// Manage workout routines
    Routine(RoutineCommand),

    /// Perform a workout
    Workout(WorkoutCommand),

    /// Review past workouts
    History(HistoryCommand),

    /// Charts and body weight
    Progress(ProgressCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack=warn,fittrack_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Auth(cmd)) => cmd.run(&config).await?,
        Some(Commands::Dashboard(cmd)) => cmd.run(&config).await?,
        Some(Commands::Exercise(cmd)) => cmd.run(&config).await?,
        Some(Commands::Routine(cmd)) => cmd.run(&config).await?,
        Some(Commands::Workout(cmd)) => cmd.run(&config).await?,
        Some(Commands::History(cmd)) => cmd.run(&config).await?,
        Some(Commands::Progress(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
