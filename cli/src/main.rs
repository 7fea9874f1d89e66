mod commands;
mod smoke;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "validator-cli",
    version,
    about = "Command-line client for the personal data validator API"
)]
struct Cli {
    /// Base URL of the validator API
    #[arg(
        long,
        global = true,
        env = "VALIDATOR_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service information
    Info,

    /// Check service health
    Health,

    /// Submit one record for validation
    Validate {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        age: Option<i64>,
    },

    /// Run the end-to-end scenario checks against a running API
    Smoke {
        /// Health probes before giving up on the API
        #[arg(long, default_value_t = 5)]
        attempts: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api_url = cli.api_url.trim_end_matches('/');

    match cli.command {
        Commands::Info => commands::info(api_url).await?,
        Commands::Health => commands::health(api_url).await?,
        Commands::Validate {
            first_name,
            last_name,
            email,
            phone,
            age,
        } => {
            let payload = commands::build_payload(
                first_name.as_deref(),
                last_name.as_deref(),
                email.as_deref(),
                phone.as_deref(),
                age,
            );
            commands::validate(api_url, &payload).await?;
        }
        Commands::Smoke { attempts } => smoke::run(api_url, attempts).await?,
    }

    Ok(())
}
