use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use api_ingress::{ApiIngress, ApiIngressConfig};
use users_directory::{UsersDirectory, UsersDirectoryConfig};

mod shutdown;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_INGRESS: &str = "api_ingress";
const USERS_DIRECTORY: &str = "users_directory";

/// Users Server - HTTP directory of user records
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - HTTP directory of user records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        Path::new(&config.server.home_dir),
    );
    tracing::info!("Users Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Typed module sections, with the server-wide timeout taking precedence.
fn module_configs(config: &AppConfig) -> Result<(ApiIngressConfig, UsersDirectoryConfig)> {
    let mut ingress: ApiIngressConfig = config.module_config(API_INGRESS)?;
    if config.server.timeout_sec > 0 {
        ingress.request_timeout_sec = config.server.timeout_sec;
    }
    let users: UsersDirectoryConfig = config.module_config(USERS_DIRECTORY)?;
    Ok((ingress, users))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let (ingress_cfg, users_cfg) = module_configs(&config)?;

    let users = UsersDirectory::new(users_cfg);
    let ingress = ApiIngress::new(ingress_cfg)
        .with_openapi(&UsersDirectory::openapi())
        .context("failed to render OpenAPI document")?;
    let router = ingress.build_router(users.register_rest(axum::Router::new()));

    let listener = ApiIngress::bind(&config.server.host, config.server.port).await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = shutdown::wait_for_shutdown().await {
            tracing::error!("failed to listen for shutdown signals: {e:#}");
        }
        signal_cancel.cancel();
    });

    ApiIngress::serve(listener, router, cancel).await?;
    tracing::info!("Users Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Module sections must deserialize too, not only the global ones
    module_configs(&config)?;
    format!("{}:{}", config.server.host, config.server.port)
        .parse::<std::net::SocketAddr>()
        .with_context(|| {
            format!(
                "invalid bind address '{}:{}'",
                config.server.host, config.server.port
            )
        })?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
