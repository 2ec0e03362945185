use clap::{Subcommand, ValueEnum};
use serde_json::json;

use crate::actions::users;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::database::store::UserStore;
use crate::error::ActionError;
use crate::types::Role;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Student,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Role::Student,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create an account")]
    Create {
        #[arg(long, help = "Email address")]
        email: String,

        #[arg(long, help = "Password (at least 8 characters)")]
        password: String,

        #[arg(long, value_enum, default_value = "student", help = "Account role")]
        role: RoleArg,
    },

    #[command(about = "List all accounts")]
    List,
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store().await?;

    match cmd {
        UserCommands::Create { email, password, role } => {
            let input = json!({ "email": email, "password": password });
            let input = input.as_object().cloned().unwrap_or_default();

            match users::provision(&store, &input, role.into()).await {
                Ok(success) => {
                    let user = success.data;
                    output_success(
                        &output_format,
                        &format!("Created {} account {} ({})", user.role.as_str(), user.email, user.id),
                        Some(serde_json::to_value(&user)?),
                    )
                }
                Err(ActionError::Validation(errors)) => {
                    output_error(&output_format, "Validation failed", Some(serde_json::to_value(&errors)?))?;
                    std::process::exit(2);
                }
                Err(err) => Err(err.into()),
            }
        }
        UserCommands::List => {
            let users = store.list_users().await?;

            if users.is_empty() {
                return output_empty_collection(&output_format, "users", "No accounts yet");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "users": users }))?);
                }
                OutputFormat::Text => {
                    println!("{:<38} {:<8} {:<18} {}", "ID", "ROLE", "CREATED", "EMAIL");
                    println!("{}", "-".repeat(90));

                    for user in &users {
                        let created = user.created_at.format("%Y-%m-%d %H:%M").to_string();
                        println!("{:<38} {:<8} {:<18} {}", user.id, user.role.as_str(), created, user.email);
                    }
                }
            }

            Ok(())
        }
    }
}
