pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "campaign")]
#[command(about = "Campaign CLI - operator tooling for the campaign API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Issue a signed API token")]
    Token {
        #[arg(help = "Subject recorded in the token")]
        subject: String,
        #[arg(long, help = "Lifetime in hours (defaults to security.jwt_expiry_hours)")]
        hours: Option<u64>,
    },

    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "Run a dynamic fetch directly against the database")]
    Fetch {
        #[command(subcommand)]
        cmd: commands::fetch::FetchCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { subject, hours } => commands::token::handle(&subject, hours, output_format),
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Fetch { cmd } => commands::fetch::handle(cmd, output_format).await,
    }
}
