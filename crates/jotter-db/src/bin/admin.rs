//! jotter-admin: database maintenance commands for jotter.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jotter_db::{demo_notes, seed_notes, verify_round_trip, ConfigResolver, Database};

#[derive(Parser)]
#[command(name = "jotter-admin")]
#[command(author, version, about = "Database maintenance for jotter")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert the demo notes
    Seed,

    /// Create, read back and delete a throwaway note
    Verify,

    /// Connect once, applying pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jotter_db=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigResolver::from_env()
        .get()
        .context("failed to load configuration")?;
    let db = Database::new(config);

    match cli.command {
        Commands::Seed => {
            let report = seed_notes(db.notes.as_ref(), demo_notes()).await;
            println!(
                "Seeded {} note(s), skipped {}",
                report.created.len(),
                report.skipped.len()
            );
        }
        Commands::Verify => {
            verify_round_trip(db.notes.as_ref())
                .await
                .context("database verification failed")?;
            println!("Database connectivity verified");
        }
        Commands::Migrate => {
            db.connect().await.context("failed to connect")?;
            println!(
                "Connected using the {} strategy",
                db.gateway.strategy()?.as_str()
            );
        }
    }
    Ok(())
}
