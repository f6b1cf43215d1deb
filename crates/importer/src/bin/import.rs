use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use importer::{ImportResult, ImportService, csv, service::prepare_rows};
use std::path::PathBuf;
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "leaderboard-import")]
#[command(about = "Season leaderboard CSV importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "DEFAULT_SEASON", default_value = "2025-W52")]
    default_season: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace a season's leaderboard with the rows of a CSV file
    Csv {
        file: PathBuf,

        #[arg(short, long, default_value = "")]
        season: String,

        #[arg(long)]
        validate_only: bool,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "leaderboard_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Csv {
            file,
            season,
            validate_only,
            json,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            if validate_only {
                handle_validate(&text)?;
            } else {
                let database_url = cli
                    .database_url
                    .context("DATABASE_URL is required unless --validate-only is set")?;
                let result =
                    handle_import(&database_url, &cli.default_season, &season, &text).await?;
                print_result(&result, json)?;
            }
        }
    }

    Ok(())
}

fn handle_validate(text: &str) -> anyhow::Result<()> {
    let rows = csv::parse(text)?;
    let ranked = prepare_rows(rows, Utc::now())?;

    tracing::info!("CSV is valid: {} row(s)", ranked.len());
    for row in &ranked {
        tracing::info!(
            "#{:<4} {:<24} {:<24} prize={} bet={}",
            row.rank,
            row.username,
            row.display_name,
            row.prize,
            row.bet
        );
    }

    Ok(())
}

async fn handle_import(
    database_url: &str,
    default_season: &str,
    season: &str,
    text: &str,
) -> anyhow::Result<ImportResult> {
    let db = Database::new(database_url)
        .await
        .context("Failed to connect to database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let service = ImportService::new(&db, default_season);
    let result = service.import_csv(season, text, Utc::now()).await?;

    Ok(result)
}

fn print_result(result: &ImportResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        tracing::info!(
            "Imported {} row(s) into season '{}' at {}",
            result.imported,
            result.season,
            result.updated_at_utc
        );
    }

    Ok(())
}
