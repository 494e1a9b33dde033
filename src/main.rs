use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cvescan::checker::CirclLookup;
use cvescan::config::Config;
use cvescan::output;
use cvescan::scan::run_scan;
use cvescan::scanner::default_inventory;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const VULNERABLE: u8 = 2;
}

#[derive(Parser)]
#[command(name = "cvescan")]
#[command(
    author,
    version,
    about = "Scan installed programs and check them against the CVE database"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Per-request timeout for CVE lookups, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Override the CVE API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Exit with a non-zero code if any vulnerability is found
    #[arg(long)]
    fail_on_vuln: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvescan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    if let Some(Commands::Config { init, path }) = cli.command {
        handle_config(init, path)?;
        return Ok(exit_codes::SUCCESS);
    }

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout_secs));
    let api_base = cli.api_url.as_deref().unwrap_or(&config.api_base_url);
    let fail_on_vuln = cli.fail_on_vuln || config.fail_on_vuln;

    let inventory = default_inventory();
    let lookup = CirclLookup::new(api_base, timeout)?;

    let report = run_scan(inventory.as_ref(), &lookup, &config.ignore, true).await?;

    if !report.items.is_empty() {
        output::print_summary(&report);
    }

    if fail_on_vuln && report.has_vulnerabilities() {
        return Ok(exit_codes::VULNERABLE);
    }

    Ok(exit_codes::SUCCESS)
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'cvescan config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
