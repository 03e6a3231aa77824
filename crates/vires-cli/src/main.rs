//! VirES token bootstrap CLI
//!
//! Reads `VIRES_TOKEN` from the environment (falling back to the nearest
//! `.env` file) and stores it in the VirES client configuration as the
//! default credential for https://vires.services/ows.

use clap::Parser;
use tracing::debug;

use vires_core::{bootstrap, ClientConfigRegistrar, Environment};

/// Register VIRES_TOKEN as the default VirES client credential
#[derive(Parser, Debug)]
#[command(name = "vires-set-token")]
#[command(version)]
#[command(about = "Register VIRES_TOKEN as the default VirES client credential")]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _args = Args::parse();

    // Quiet unless RUST_LOG asks otherwise; a successful run prints nothing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut env = Environment::from_process();
    let cwd = std::env::current_dir()?;
    if let Some(path) = env.merge_nearest_dotenv(&cwd)? {
        debug!("Merged env file {:?}", path);
    }

    let registrar = ClientConfigRegistrar::new()?;
    bootstrap(&env, &registrar).await?;

    Ok(())
}
