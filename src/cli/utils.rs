use anyhow::Context;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::manager::DatabaseManager;
use crate::database::postgres::PgStore;

/// Connect to the configured Postgres database
pub async fn connect_store() -> anyhow::Result<PgStore> {
    let pool = DatabaseManager::connect(&config().database)
        .await
        .context("Failed to connect to the database (is DATABASE_URL set?)")?;
    Ok(PgStore::new(pool))
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, errors: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(errors) = errors {
                response["errors"] = errors;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            if let Some(Value::Object(fields)) = errors {
                for (field, messages) in fields {
                    eprintln!("  {}: {}", field, messages);
                }
            }
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}
