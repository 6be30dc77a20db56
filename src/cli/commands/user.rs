use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::Owner;
use crate::database::{PgPhotoStore, PhotoStore};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Register an owner (or update their username)")]
    Add {
        #[arg(help = "User id as issued by the identity provider")]
        id: i64,
        #[arg(help = "Username")]
        username: String,
    },

    #[command(about = "Remove an owner together with all of their photos")]
    Remove {
        #[arg(help = "User id")]
        id: i64,
    },
}

pub async fn handle(cmd: UserCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = PgPhotoStore::connect(&config.database).await?;

    match cmd {
        UserCommands::Add { id, username } => {
            let owner = Owner { id, username };
            store.upsert_user(&owner).await?;
            output_success(
                &output_format,
                &format!("User {} ({}) registered", owner.username, owner.id),
                Some(json!({ "user": owner })),
            )
        }
        UserCommands::Remove { id } => {
            let photos = store.delete_user(id).await?;
            output_success(
                &output_format,
                &format!("User {} removed along with {} photo(s)", id, photos),
                Some(json!({ "removed_photos": photos })),
            )
        }
    }
}
