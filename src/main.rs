use clap::Parser;
use dotenv::dotenv;
use pgmigrator::commands::cmd_migrate;
use pgmigrator::config::{self, ConfigBuilder, ConfigInput, Environment, MigrationFlagArgs};
use pgmigrator::constants::CONFIG_FILENAME;
use pgmigrator::db::PgProbe;
use pgmigrator::pipeline::ProcessRunner;
use pgmigrator::{MigrateError, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Migrate a PostgreSQL database into another one with pg_dump | psql.
///
/// The source is read from SOURCE_DATABASE_URI. The target is read from
/// TARGET_DATABASE_URI, or derived from FLY_APP_NAME and OPERATOR_PASSWORD.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME)]
    config_file: String,

    /// Enable verbose output (debug level for pgmigrator itself)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug output (debug level, including the database driver)
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    flags: MigrationFlagArgs,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    let result = tokio::select! {
        result = run_main(cli) => result,
        _ = wait_for_shutdown_signal() => {
            info!("Received shutdown signal, stopping...");
            Err(MigrateError::Interrupted)
        }
    };

    if let Err(e) = result {
        error!(kind = e.kind(), "{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.quiet {
        "error"
    } else if cli.verbose {
        "info,pgmigrator=debug"
    } else {
        "info" // progress lines are the main output
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_main(cli: Cli) -> Result<()> {
    let file_config = config::load_config(&cli.config_file)
        .map_err(|e| MigrateError::configuration(format!("{:#}", e)))?;

    let cli_config = ConfigInput {
        options: Some(cli.flags.into()),
        ..ConfigInput::default()
    };

    let config = ConfigBuilder::new()
        .with_file(file_config)
        .with_env(Environment::from_process())
        .with_cli_args(cli_config)
        .resolve()?;

    cmd_migrate(&config, &PgProbe, &ProcessRunner).await
}
