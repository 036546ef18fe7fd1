use clap::{Args, Subcommand};

use fittrack_core::models::{ProfileUpdate, RegisterRequest};

use super::{prompt, require_login, restore_auth, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand)]
pub enum AuthSubcommand {
    /// Log in with email and password
    Login {
        /// Account email (prompted if omitted)
        email: Option<String>,

        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Username
        #[arg(long)]
        username: String,

        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        password_confirm: Option<String>,

        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,

        /// Fitness goal
        #[arg(long)]
        fitness_goal: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show whether you are logged in
    Status,

    /// Show or update your profile
    Profile {
        /// New first name
        #[arg(long)]
        first_name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New bio
        #[arg(long)]
        bio: Option<String>,

        /// New fitness goal
        #[arg(long)]
        fitness_goal: Option<String>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl AuthCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AuthSubcommand::Login { email, password } => {
                let email = match email {
                    Some(email) => email.clone(),
                    None => prompt("Email: ")?,
                };
                let password = match password {
                    Some(password) => password.clone(),
                    None => prompt("Password: ")?,
                };

                let mut auth = restore_auth(config).await;
                let user = auth.login(&email, &password).await?;
                println!("Logged in as {}", user.display_name());
                Ok(())
            }

            AuthSubcommand::Register {
                email,
                username,
                password,
                password_confirm,
                first_name,
                last_name,
                fitness_goal,
            } => {
                let password = match password {
                    Some(password) => password.clone(),
                    None => prompt("Password: ")?,
                };
                let confirm = match password_confirm {
                    Some(confirm) => confirm.clone(),
                    None => password.clone(),
                };

                let mut request = RegisterRequest::new(email, username, password, confirm);
                request.first_name = first_name.clone();
                request.last_name = last_name.clone();
                if let Some(goal) = fitness_goal {
                    request = request.with_fitness_goal(goal);
                }

                let mut auth = restore_auth(config).await;
                let user = auth.register(&request).await?;
                println!("Account created. Logged in as {}", user.display_name());
                Ok(())
            }

            AuthSubcommand::Logout => {
                let mut auth = restore_auth(config).await;
                let was_logged_in = auth.is_authenticated();
                auth.logout()?;
                if was_logged_in {
                    println!("Logged out");
                } else {
                    println!("Not logged in");
                }
                Ok(())
            }

            AuthSubcommand::Status => {
                let auth = restore_auth(config).await;
                match auth.user() {
                    Some(user) => {
                        println!("Logged in as {} <{}>", user.display_name(), user.email);
                        println!("Server: {}", auth.api().base_url());
                    }
                    None => println!("Not logged in"),
                }
                Ok(())
            }

            AuthSubcommand::Profile {
                first_name,
                last_name,
                bio,
                fitness_goal,
                height,
                weight,
                age,
                format,
            } => {
                let patch = ProfileUpdate {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    bio: bio.clone(),
                    fitness_goal: fitness_goal.clone(),
                    height: *height,
                    weight: *weight,
                    age: *age,
                };

                let mut auth = require_login(config).await?;
                let user = if patch.is_empty() {
                    auth.user().cloned().ok_or("Not logged in")?
                } else {
                    let user = auth.save_profile(&patch).await?;
                    if let OutputFormat::Text = format {
                        println!("Profile updated\n");
                    }
                    user
                };

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                    OutputFormat::Text => println!("{}", user),
                }
                Ok(())
            }
        }
    }
}
