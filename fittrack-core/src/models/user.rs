use serde::{Deserialize, Serialize};
use std::fmt;

use super::decimal;

/// Aggregate stats attached to a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_workouts: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(deserialize_with = "decimal::number")]
    pub total_volume: f64,
    pub followers_count: u32,
    pub following_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub fitness_goal: String,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub height: Option<f64>, // cm
    #[serde(default, deserialize_with = "decimal::optional")]
    pub weight: Option<f64>, // kg
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub stats: Option<UserStats>,
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} <{}>", self.username, self.email)?;
        if !self.full_name.trim().is_empty() {
            writeln!(f, "Name: {}", self.full_name)?;
        }
        if !self.fitness_goal.is_empty() {
            writeln!(f, "Fitness goal: {}", self.fitness_goal)?;
        }
        if let Some(height) = self.height {
            writeln!(f, "Height: {} cm", height)?;
        }
        if let Some(weight) = self.weight {
            writeln!(f, "Weight: {} kg", weight)?;
        }
        if let Some(age) = self.age {
            writeln!(f, "Age: {}", age)?;
        }
        if !self.bio.is_empty() {
            writeln!(f, "\n{}", self.bio)?;
        }
        Ok(())
    }
}

/// Access/refresh token pair issued on login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
            ..Default::default()
        }
    }

    pub fn with_fitness_goal(mut self, goal: impl Into<String>) -> Self {
        self.fitness_goal = Some(goal.into());
        self
    }
}

/// Body returned by the login and register endpoints.
///
/// Both parts are optional so that a malformed response can be reported
/// instead of failing to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: Option<User>,
    pub tokens: Option<AuthTokens>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields into `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(v) = &self.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            user.last_name = v.clone();
        }
        if self.first_name.is_some() || self.last_name.is_some() {
            user.full_name = format!("{} {}", user.first_name, user.last_name)
                .trim()
                .to_string();
        }
        if let Some(v) = &self.bio {
            user.bio = v.clone();
        }
        if let Some(v) = &self.fitness_goal {
            user.fitness_goal = v.clone();
        }
        if self.height.is_some() {
            user.height = self.height;
        }
        if self.weight.is_some() {
            user.weight = self.weight;
        }
        if self.age.is_some() {
            user.age = self.age;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}
