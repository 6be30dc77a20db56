pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::{config, AppConfig};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Photo Gallery CLI - run the API and manage its users and tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API")]
    Serve {
        #[arg(long, help = "Keep photos in memory instead of Postgres")]
        memory: bool,
    },

    #[command(about = "Database schema management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },

    #[command(about = "Photo owners known to the gallery")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Bearer token issuance")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let app_config: AppConfig = config().clone();

    match cli.command {
        Commands::Serve { memory } => commands::serve::handle(app_config, memory).await,
        Commands::Db { cmd } => commands::db::handle(cmd, &app_config, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, &app_config, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &app_config, output_format),
    }
}
