use clap::{Args, Subcommand};

use fittrack_core::models::{Category, Equipment, ExerciseFilter, MuscleGroup, SecondaryMuscle};
use fittrack_core::ExerciseDraft;

use super::{require_login, truncate, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// List exercises
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<Category>,

        /// Filter by primary muscle group
        #[arg(long)]
        muscle: Option<MuscleGroup>,

        /// Filter by equipment
        #[arg(long)]
        equipment: Option<Equipment>,

        /// Search by name
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an exercise's details
    Show {
        /// Exercise ID
        id: i64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a custom exercise
    Create {
        /// Name of the exercise
        name: String,

        /// Category
        #[arg(long, default_value = "strength")]
        category: Category,

        /// Primary muscle group
        #[arg(long)]
        muscle: MuscleGroup,

        /// Equipment
        #[arg(long, default_value = "other")]
        equipment: Equipment,

        /// Secondary muscle (can be repeated)
        #[arg(long = "secondary", value_name = "MUSCLE")]
        secondary: Vec<SecondaryMuscle>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },
}

impl ExerciseCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = require_login(config).await?;
        let api = auth.api();

        match &self.command {
            ExerciseSubcommand::List {
                category,
                muscle,
                equipment,
                search,
                format,
            } => {
                let filter = ExerciseFilter {
                    category: *category,
                    muscle_group: *muscle,
                    equipment: *equipment,
                    search: search.clone(),
                };
                let exercises = api.exercises(&filter).await?;

                if exercises.is_empty() {
                    println!("No exercises found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&exercises)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<6}  {:<30}  {:<12}  {:<10}  EQUIPMENT",
                            "ID", "NAME", "MUSCLE", "CATEGORY"
                        );
                        println!("{}", "-".repeat(80));
                        for exercise in &exercises {
                            println!(
                                "{:<6}  {:<30}  {:<12}  {:<10}  {}",
                                exercise.id,
                                truncate(&exercise.name, 30),
                                exercise.muscle_group,
                                exercise.category,
                                exercise.equipment
                            );
                        }
                        println!("\nTotal: {} exercise(s)", exercises.len());
                    }
                }
                Ok(())
            }

            ExerciseSubcommand::Show { id, format } => {
                let exercise = api.exercise(*id).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&exercise)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", exercise);
                    }
                }
                Ok(())
            }

            ExerciseSubcommand::Create {
                name,
                category,
                muscle,
                equipment,
                secondary,
                description,
            } => {
                let mut draft = ExerciseDraft::new(name, *category, *muscle, *equipment);
                for muscle in secondary {
                    draft = draft.with_secondary(*muscle);
                }
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }

                let created = draft.create(api).await?;
                println!("Created exercise:");
                println!("{}", created);
                Ok(())
            }
        }
    }
}
