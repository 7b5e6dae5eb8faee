mod actor_framework;
mod app_system;
mod cart_actor;
mod cli;
mod clients;
mod domain;
mod product_actor;
mod store;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use crate::app_system::{setup_tracing, ShopConfig, ShopSystem};
use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = ShopConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    // Setup tracing once for the entire application
    setup_tracing(&config.log);
    info!(data_dir = %config.data_dir.display(), "Starting shop store");

    let system = ShopSystem::start(&config);
    let result = cli::execute(&system, args.command).await;
    system.shutdown().await.context("shutting down actors")?;

    match result {
        Ok(output) => {
            info!(status = output.status, "Command completed");
            if let Some(body) = output.body {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Ok(())
        }
        Err(e) => {
            error!(status = e.status_code(), error = %e, "Command failed");
            eprintln!("{}", cli::error_body(&e));
            std::process::exit(1);
        }
    }
}
