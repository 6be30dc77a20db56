use clap::Subcommand;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::PgPhotoStore;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the users and photos tables if they are missing")]
    Init,

    #[command(about = "Check that the database answers")]
    Ping,
}

pub async fn handle(cmd: DbCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = PgPhotoStore::connect(&config.database).await?;

    match cmd {
        DbCommands::Init => {
            store.ensure_schema().await?;
            output_success(&output_format, "Schema is up to date", None)
        }
        DbCommands::Ping => {
            use crate::database::PhotoStore;
            store.health_check().await?;
            output_success(&output_format, "Database is reachable", None)
        }
    }
}
