use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of backend choice values with their wire names.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let options: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "Invalid {} '{}'. Valid options: {}",
                            $label,
                            s,
                            options.join(", ")
                        )
                    })
            }
        }
    };
}

choice_enum!(Category, "category" {
    Strength => "strength",
    Cardio => "cardio",
    Flexibility => "flexibility",
    Sports => "sports",
});

choice_enum!(
    /// Primary muscle group an exercise trains.
    MuscleGroup, "muscle group" {
    Chest => "chest",
    Back => "back",
    Shoulders => "shoulders",
    Arms => "arms",
    Legs => "legs",
    Core => "core",
    FullBody => "full_body",
    Cardio => "cardio",
});

choice_enum!(SecondaryMuscle, "secondary muscle" {
    Shoulders => "shoulders",
    Triceps => "triceps",
    Biceps => "biceps",
    Back => "back",
    Forearms => "forearms",
    Calves => "calves",
    Neck => "neck",
    Chest => "chest",
});

choice_enum!(Equipment, "equipment" {
    Barbell => "barbell",
    Dumbbell => "dumbbell",
    Machine => "machine",
    Cable => "cable",
    Bodyweight => "bodyweight",
    Band => "band",
    Kettlebell => "kettlebell",
    Other => "other",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    #[serde(default)]
    pub secondary_muscles: Vec<SecondaryMuscle>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl Exercise {
    /// Muscle names credited with this exercise's volume: primary first.
    pub fn muscles(&self) -> Vec<&'static str> {
        let mut muscles = vec![self.muscle_group.as_str()];
        muscles.extend(self.secondary_muscles.iter().map(|m| m.as_str()));
        muscles
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Muscle group: {}", self.muscle_group)?;
        if !self.secondary_muscles.is_empty() {
            let names: Vec<&str> = self.secondary_muscles.iter().map(|m| m.as_str()).collect();
            writeln!(f, "Secondary: {}", names.join(", "))?;
        }
        writeln!(f, "Equipment: {}", self.equipment)?;
        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }
        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:\n{}", self.instructions)?;
        }
        Ok(())
    }
}

/// Body of `POST workouts/exercises/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub secondary_muscles: Vec<SecondaryMuscle>,
    pub equipment: Equipment,
    pub is_custom: bool,
}

/// Query parameters of `GET workouts/exercises/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExerciseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<MuscleGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_from_str() {
        assert_eq!(MuscleGroup::from_str("Full Body").unwrap(), MuscleGroup::FullBody);
        assert_eq!(MuscleGroup::from_str("full_body").unwrap(), MuscleGroup::FullBody);
        assert_eq!(Equipment::from_str("CABLE").unwrap(), Equipment::Cable);
        assert_eq!(SecondaryMuscle::from_str("triceps").unwrap(), SecondaryMuscle::Triceps);
    }

    #[test]
    fn test_choice_from_str_invalid() {
        let err = Category::from_str("yoga").unwrap_err();
        assert!(err.contains("Invalid category 'yoga'"));
        assert!(err.contains("strength"));
    }

    #[test]
    fn test_choice_wire_names() {
        assert_eq!(
            serde_json::to_string(&MuscleGroup::FullBody).unwrap(),
            "\"full_body\""
        );
        let parsed: Equipment = serde_json::from_str("\"kettlebell\"").unwrap();
        assert_eq!(parsed, Equipment::Kettlebell);
    }

    #[test]
    fn test_exercise_muscles_primary_first() {
        let exercise: Exercise = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Bench Press",
                "category": "strength",
                "muscle_group": "chest",
                "equipment": "barbell",
                "secondary_muscles": ["triceps", "shoulders"]
            }"#,
        )
        .unwrap();
        assert_eq!(exercise.muscles(), vec!["chest", "triceps", "shoulders"]);
        let output = format!("{}", exercise);
        assert!(output.contains("Secondary: triceps, shoulders"));
    }

    #[test]
    fn test_filter_serializes_only_present_fields() {
        let filter = ExerciseFilter {
            muscle_group: Some(MuscleGroup::Legs),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"muscle_group": "legs"})
        );
    }
}
