mod commands;
mod utils;

use clap::{Parser, Subcommand};
use utils::HookArgs;

#[derive(Parser)]
#[command(name = "wsdns")]
#[command(about = "Answer ACME dns-01 challenges through the Websupport REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the challenge TXT record (certbot --manual-auth-hook)
    Auth {
        #[command(flatten)]
        hook: HookArgs,
        /// Seconds to wait for DNS propagation after creating the record
        #[arg(long, env = "WEBSUPPORT_PROPAGATION_SECONDS", default_value = "60")]
        propagation_seconds: u64,
    },
    /// Remove the challenge TXT record (certbot --manual-cleanup-hook)
    Cleanup {
        #[command(flatten)]
        hook: HookArgs,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout is captured by certbot; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Auth {
            hook,
            propagation_seconds,
        } => {
            commands::auth::handle(&hook, propagation_seconds).await?;
        }
        Commands::Cleanup { hook } => {
            commands::cleanup::handle(&hook).await?;
        }
        Commands::Version => {
            println!("wsdns {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
