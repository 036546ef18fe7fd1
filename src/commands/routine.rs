use clap::{Args, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use fittrack_core::models::{
    Category, Equipment, Exercise, ExerciseFilter, MuscleGroup, RoutineFilter, SecondaryMuscle,
};
use fittrack_core::input::{coerce_f64, coerce_u32};
use fittrack_core::routine_builder::{search_exercises, DraftField};
use fittrack_core::models::Routine;
use fittrack_core::{ApiClient, ExerciseDraft, RoutineDraft, RoutineError};

use super::{confirm, require_login, truncate, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct RoutineCommand {
    #[command(subcommand)]
    pub command: RoutineSubcommand,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ListFilter {
    /// Routines you created
    #[default]
    Mine,
    /// Routines shared by anyone
    Public,
    /// Everything visible to you
    All,
}

#[derive(Subcommand)]
pub enum RoutineSubcommand {
    /// List routines
    List {
        /// Which routines to list
        #[arg(long, value_enum, default_value = "mine")]
        filter: ListFilter,

        /// Search by name
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a routine's details
    Show {
        /// Routine ID
        id: i64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new routine
    Create {
        /// Name of the routine (overrides the name in --file)
        name: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Share the routine publicly
        #[arg(long)]
        public: bool,

        /// Exercise as ID or name, optionally with SETSxREPS[@WEIGHT] (can be repeated)
        #[arg(long = "exercise", short = 'e', value_name = "EXERCISE")]
        exercises: Vec<String>,

        /// Rest between sets in seconds, for exercises given with --exercise
        #[arg(long)]
        rest: Option<String>,

        /// Read the routine from a YAML file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Like or unlike a routine
    Like {
        /// Routine ID
        id: i64,
    },

    /// Delete a routine
    Delete {
        /// Routine ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RoutineCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = require_login(config).await?;
        let api = auth.api();

        match &self.command {
            RoutineSubcommand::List {
                filter,
                search,
                format,
            } => {
                let query = RoutineFilter {
                    my_routines: matches!(filter, ListFilter::Mine).then_some(true),
                    public: matches!(filter, ListFilter::Public).then_some(true),
                    search: search.clone(),
                };
                let routines = api.routines(&query).await?;

                if routines.is_empty() {
                    println!("No routines found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&routines)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<6}  {:<30}  {:>9}  {:>5}  {:>5}  OWNER",
                            "ID", "NAME", "EXERCISES", "USES", "LIKES"
                        );
                        println!("{}", "-".repeat(80));
                        for routine in &routines {
                            println!(
                                "{:<6}  {:<30}  {:>9}  {:>5}  {:>5}  {}",
                                routine.id,
                                truncate(&routine.name, 30),
                                routine.exercise_count,
                                routine.total_uses,
                                routine.likes_count,
                                routine.username
                            );
                        }
                        println!("\nTotal: {} routine(s)", routines.len());
                    }
                }
                Ok(())
            }

            RoutineSubcommand::Show { id, format } => {
                let routine = api.routine(*id).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&routine)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", routine);
                    }
                }
                Ok(())
            }

            RoutineSubcommand::Create {
                name,
                description,
                public,
                exercises,
                rest,
                file,
            } => {
                let mut routine_file = match file {
                    Some(path) => {
                        let contents = std::fs::read_to_string(path).map_err(|e| {
                            format!("Failed to read routine file '{}': {}", path.display(), e)
                        })?;
                        serde_yaml::from_str(&contents).map_err(|e| {
                            format!("Failed to parse routine file '{}': {}", path.display(), e)
                        })?
                    }
                    None => RoutineFile::default(),
                };

                if let Some(name) = name {
                    routine_file.name = name.clone();
                }
                if let Some(description) = description {
                    routine_file.description = description.clone();
                }
                if *public {
                    routine_file.public = true;
                }
                let specs = exercises
                    .iter()
                    .map(|spec| ExerciseSpec::parse(spec))
                    .collect::<Result<Vec<_>, _>>()?;

                let created = create_routine(api, routine_file, &specs, rest.as_deref()).await?;
                println!("Created routine:");
                println!("{}", created);
                Ok(())
            }

            RoutineSubcommand::Like { id } => {
                let response = api.like_routine(*id).await?;
                if response.liked() {
                    println!("Liked routine {}", id);
                } else {
                    println!("Unliked routine {}", id);
                }
                Ok(())
            }

            RoutineSubcommand::Delete { id, force } => {
                let routine = api.routine(*id).await?;

                if !force {
                    let question = format!("Delete routine '{}' ({})?", routine.name, routine.id);
                    if !confirm(&question)? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                api.delete_routine(routine.id).await?;
                println!("Deleted routine: {}", routine.name);
                Ok(())
            }
        }
    }
}

/// An exercise given by server id or by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ExerciseRef {
    Id(i64),
    Name(String),
}

impl ExerciseRef {
    fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(id) => ExerciseRef::Id(id),
            Err(_) => ExerciseRef::Name(input.trim().to_string()),
        }
    }
}

/// A `--exercise` argument: `ID_OR_NAME[:SETSxREPS[@WEIGHT]]`.
#[derive(Debug, Clone, PartialEq)]
struct ExerciseSpec {
    exercise: ExerciseRef,
    sets: Option<String>,
    reps: Option<String>,
    weight: Option<String>,
}

impl ExerciseSpec {
    fn parse(input: &str) -> Result<Self, String> {
        let (target, scheme) = match input.rsplit_once(':') {
            Some((target, scheme)) => (target, Some(scheme)),
            None => (input, None),
        };
        if target.trim().is_empty() {
            return Err(format!("Invalid exercise '{}': missing ID or name", input));
        }

        let mut spec = ExerciseSpec {
            exercise: ExerciseRef::parse(target),
            sets: None,
            reps: None,
            weight: None,
        };

        if let Some(scheme) = scheme {
            let (volume, weight) = match scheme.split_once('@') {
                Some((volume, weight)) => (volume, Some(weight)),
                None => (scheme, None),
            };
            let (sets, reps) = volume
                .to_lowercase()
                .split_once('x')
                .map(|(s, r)| (s.trim().to_string(), r.trim().to_string()))
                .ok_or_else(|| {
                    format!(
                        "Invalid exercise '{}': expected SETSxREPS[@WEIGHT] after ':'",
                        input
                    )
                })?;
            spec.sets = Some(sets);
            spec.reps = Some(reps);
            spec.weight = weight.map(|w| w.trim().to_string());
        }

        Ok(spec)
    }
}

/// Exercise list fetched on first lookup by name.
#[derive(Default)]
struct Catalog {
    exercises: Option<Vec<Exercise>>,
}

impl Catalog {
    async fn resolve(
        &mut self,
        api: &ApiClient,
        target: &ExerciseRef,
    ) -> Result<Exercise, Box<dyn std::error::Error>> {
        match target {
            ExerciseRef::Id(id) => Ok(api.exercise(*id).await?),
            ExerciseRef::Name(name) => {
                if self.exercises.is_none() {
                    self.exercises = Some(api.exercises(&ExerciseFilter::default()).await?);
                }
                let exercises = self.exercises.as_deref().unwrap_or_default();
                Ok(find_by_name(exercises, name)?.clone())
            }
        }
    }
}

/// Exact (case-insensitive) name match, else the single partial match.
fn find_by_name<'a>(exercises: &'a [Exercise], name: &str) -> Result<&'a Exercise, String> {
    if let Some(exact) = exercises
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    {
        return Ok(exact);
    }

    let matches = search_exercises(exercises, name);
    match matches.as_slice() {
        [] => Err(format!("Exercise not found: {}", name)),
        [only] => Ok(only),
        several => {
            let names: Vec<&str> = several.iter().take(5).map(|e| e.name.as_str()).collect();
            Err(format!(
                "Exercise '{}' is ambiguous: {}{}",
                name,
                names.join(", "),
                if several.len() > 5 { ", ..." } else { "" }
            ))
        }
    }
}

/// Builds and submits a routine from a file plus `--exercise` specs.
///
/// Nothing is sent to the server while the routine lacks a name or exercises.
async fn create_routine(
    api: &ApiClient,
    routine_file: RoutineFile,
    specs: &[ExerciseSpec],
    rest: Option<&str>,
) -> Result<Routine, Box<dyn std::error::Error>> {
    routine_file.check(specs.len())?;
    let mut draft = routine_file.into_draft(api).await?;

    let mut catalog = Catalog::default();
    for spec in specs {
        let exercise = catalog.resolve(api, &spec.exercise).await?;
        let index = draft.add_exercise(exercise);
        if let Some(sets) = &spec.sets {
            draft.set_input(index, DraftField::Sets, sets)?;
        }
        if let Some(reps) = &spec.reps {
            draft.set_input(index, DraftField::Reps, reps)?;
        }
        if let Some(weight) = &spec.weight {
            draft.set_input(index, DraftField::Weight, weight)?;
        }
        if let Some(rest) = rest {
            draft.set_input(index, DraftField::Rest, rest)?;
        }
    }

    Ok(draft.submit(api).await?)
}

/// Routine definition read by `routine create --file`.
#[derive(Debug, Default, Deserialize)]
struct RoutineFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    public: bool,
    #[serde(default)]
    exercises: Vec<RoutineFileEntry>,
}

#[derive(Debug, Deserialize)]
struct RoutineFileEntry {
    /// Existing exercise, by ID or name
    #[serde(default)]
    exercise: Option<ExerciseRef>,
    /// Custom exercise created before the routine
    #[serde(default)]
    new_exercise: Option<NewExerciseFile>,
    #[serde(default)]
    sets: Option<serde_yaml::Value>,
    #[serde(default)]
    reps: Option<serde_yaml::Value>,
    #[serde(default)]
    weight: Option<serde_yaml::Value>,
    #[serde(default)]
    rest: Option<serde_yaml::Value>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    custom_sets: Vec<CustomSetFile>,
}

#[derive(Debug, Deserialize)]
struct NewExerciseFile {
    name: String,
    category: Category,
    muscle_group: MuscleGroup,
    equipment: Equipment,
    #[serde(default)]
    secondary_muscles: Vec<SecondaryMuscle>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct CustomSetFile {
    #[serde(default)]
    reps: Option<serde_yaml::Value>,
    #[serde(default)]
    weight: Option<serde_yaml::Value>,
    #[serde(default)]
    rest: Option<serde_yaml::Value>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    notes: String,
}

impl RoutineFile {
    /// Local checks run before any exercise is looked up or created.
    fn check(&self, extra_exercises: usize) -> Result<(), Box<dyn std::error::Error>> {
        if self.name.trim().is_empty() || self.exercises.len() + extra_exercises == 0 {
            return Err(RoutineError::Incomplete.into());
        }
        for (position, entry) in self.exercises.iter().enumerate() {
            if entry.exercise.is_some() == entry.new_exercise.is_some() {
                return Err(format!(
                    "Routine file entry {}: give exactly one of 'exercise' or 'new_exercise'",
                    position + 1
                )
                .into());
            }
        }
        Ok(())
    }

    async fn into_draft(self, api: &ApiClient) -> Result<RoutineDraft, Box<dyn std::error::Error>> {
        let mut draft = RoutineDraft::new(self.name)
            .with_description(self.description)
            .with_public(self.public);
        let mut catalog = Catalog::default();

        for (position, entry) in self.exercises.into_iter().enumerate() {
            let index = match (&entry.exercise, &entry.new_exercise) {
                (Some(target), None) => {
                    let exercise = catalog.resolve(api, target).await?;
                    draft.add_exercise(exercise)
                }
                (None, Some(new)) => {
                    let mut exercise = ExerciseDraft::new(
                        &new.name,
                        new.category,
                        new.muscle_group,
                        new.equipment,
                    )
                    .with_description(&new.description);
                    for muscle in &new.secondary_muscles {
                        exercise = exercise.with_secondary(*muscle);
                    }
                    draft.create_and_add_exercise(api, &exercise).await?
                }
                _ => {
                    return Err(format!(
                        "Routine file entry {}: give exactly one of 'exercise' or 'new_exercise'",
                        position + 1
                    )
                    .into())
                }
            };

            if let Some(sets) = &entry.sets {
                draft.set_input(index, DraftField::Sets, &value_text(sets))?;
            }
            if let Some(reps) = &entry.reps {
                draft.set_input(index, DraftField::Reps, &value_text(reps))?;
            }
            if let Some(weight) = &entry.weight {
                draft.set_input(index, DraftField::Weight, &value_text(weight))?;
            }
            if let Some(rest) = &entry.rest {
                draft.set_input(index, DraftField::Rest, &value_text(rest))?;
            }
            if !entry.notes.is_empty() {
                draft.set_notes(index, entry.notes.as_str())?;
            }

            if !entry.custom_sets.is_empty() {
                draft.set_sets(index, entry.custom_sets.len() as u32)?;
                draft.enable_custom_sets(index)?;
                let defaults = draft.entries()[index].clone();
                for (set_index, set) in entry.custom_sets.iter().enumerate() {
                    let reps = set.reps.as_ref().map_or(defaults.reps, |v| coerce_u32(&value_text(v)));
                    let weight = set
                        .weight
                        .as_ref()
                        .map_or(defaults.weight, |v| coerce_f64(&value_text(v)));
                    let rest = set
                        .rest
                        .as_ref()
                        .map_or(defaults.rest_seconds, |v| coerce_u32(&value_text(v)));
                    draft.update_custom_set(index, set_index, reps, weight, rest)?;
                    draft.label_custom_set(index, set_index, set.name.as_str(), set.notes.as_str())?;
                }
            }
        }

        Ok(draft)
    }
}

/// Raw text of a scalar from the routine file, so numbers and strings go
/// through the same coercion as typed input.
fn value_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
