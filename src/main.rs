//! Coffre main entry point
//!
//! This is the command-line interface for the coffre document-vault mirror.

use clap::Parser;
use coffre::config::load_config_with_hash;
use coffre::mirror::run_mirror;
use coffre::CoffreError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Coffre: a deadline-aware document-vault mirror
///
/// Coffre signs in on the vendor's document vault, walks the remote folder
/// tree and mirrors every folder's documents into a local destination
/// hierarchy within a fixed wall-clock budget.
#[derive(Parser, Debug)]
#[command(name = "coffre")]
#[command(version = "1.0.0")]
#[command(about = "A deadline-aware document-vault mirror", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be mirrored without connecting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    handle_mirror(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("coffre=info,warn"),
            1 => EnvFilter::new("coffre=debug,info"),
            2 => EnvFilter::new("coffre=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration and exits
fn handle_dry_run(config: &coffre::Config, config_hash: &str) {
    println!("=== Coffre Dry Run ===\n");

    println!("Account:");
    println!("  Email: {}", config.account.email);
    println!("  Password: ********");

    println!("\nVault:");
    println!("  Secure base URL: {}", config.vault.secure_base_url);
    println!("  Provider login URL: {}", config.vault.provider_login_url);

    println!("\nOutput:");
    println!("  Destination: {}", config.output.destination_path);

    println!("\nRun:");
    println!("  Overall budget: {}s", config.run.overall_budget_secs);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
}

/// Handles the main mirror operation
async fn handle_mirror(config: coffre::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Mirroring vault of {} into {} within {}s",
        config.account.email,
        config.output.destination_path,
        config.run.overall_budget_secs
    );

    match run_mirror(config).await {
        Ok(report) => {
            tracing::info!(
                "Done: {} folder(s), {} document(s) listed",
                report.folders_visited,
                report.documents_listed
            );

            if report.is_clean() {
                Ok(())
            } else {
                for failure in &report.failures {
                    eprintln!(
                        "folder {:?} at {}: {}",
                        failure.folder,
                        failure.path.display(),
                        failure.error
                    );
                }
                Err(format!("{} folder(s) failed", report.failures.len()).into())
            }
        }
        Err(e) => {
            eprintln!("{}", user_message(&e));
            Err(e.into())
        }
    }
}

/// Maps an error kind to the message shown to the user
fn user_message(error: &CoffreError) -> String {
    match error {
        CoffreError::InvalidCredentials => {
            "Login failed: check your email and password.".to_string()
        }
        CoffreError::UserActionRequired => {
            "Login blocked: your account needs a one-time setup on the vendor site \
             (security question). Complete it there, then retry."
                .to_string()
        }
        CoffreError::ServiceUnavailable { reason } => {
            format!("The vault service appears to be down ({}). Try again later.", reason)
        }
        other => format!("Mirror failed: {}", other),
    }
}
