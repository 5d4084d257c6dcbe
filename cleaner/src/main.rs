// File: cleaner/src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use cleaner::constants::defaults;
use cleaner::web::{start_web_server, AppState};
use cleaner::{CleanupScheduler, ConfigManager, Database, MaintenanceOrchestrator, Trigger};

#[derive(Parser)]
#[command(name = "cleaner", version, about = "WordPress / WooCommerce database cleaner")]
struct Cli {
    /// Directory containing main.toml
    #[arg(long, default_value = defaults::CONFIG_DIR)]
    config: String,

    /// Overrides database.url from main.toml
    #[arg(long, env = "CLEANER_DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Register the recurring cleanup and serve the trigger API (default)
    Serve,
    /// Run the full cleanup once and print the report as JSON
    Run,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("cleaner=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    info!("Starting WordPress / WooCommerce database cleaner");

    let config_manager = ConfigManager::new(&cli.config, cli.database_url).await?;
    let config = config_manager.get_current_config();

    let database = Arc::new(Database::connect(&config.database).await?);
    let dialect = database.dialect();
    info!("Database initialized ({})", dialect);

    let orchestrator = Arc::new(MaintenanceOrchestrator::new(config.clone(), database));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Run => run_once(&orchestrator).await,
        Command::Serve => {
            let scheduler = Arc::new(
                CleanupScheduler::new(orchestrator.clone(), config.schedule.clone()).await?,
            );
            scheduler.schedule().await?;

            let state = AppState::new(config, orchestrator, scheduler.clone(), dialect);
            start_web_server(state, shutdown_signal()).await?;

            // Deactivation: nothing should fire after the process stops serving
            scheduler.shutdown().await?;
            info!("Cleanup schedule removed, exiting");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_once(orchestrator: &Arc<MaintenanceOrchestrator>) -> Result<ExitCode> {
    match orchestrator.run_to_completion(Trigger::Manual).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                warn!("Cleanup finished with errors");
                Ok(ExitCode::from(2))
            }
        }
        Err(e) => {
            error!("Cleanup refused to run: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
