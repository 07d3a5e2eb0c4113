mod app;
mod modules;
mod seed;
mod types;
mod utils;

use crate::{
    app::App,
    seed::SeedOptions,
    types::{Config, ToContext},
};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing_subscriber::prelude::*;

/// Restaurant ordering backend.
#[derive(Parser, Debug)]
#[command(name = "restaurant-backend", about = "Restaurant ordering backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Seed a restaurant with tables, categories and menu items.
    Seed {
        /// Restaurant name; an existing restaurant of the owner is reused.
        #[arg(long, default_value = "Demo Restaurant")]
        restaurant: String,
        /// Email of an existing owner account.
        #[arg(long, env = "SEED_OWNER_EMAIL")]
        owner_email: String,
        /// Number of tables the restaurant should end up with.
        #[arg(long, default_value_t = 10)]
        tables: u32,
        /// JSON array of {name, description, price, category, preparation_time}.
        #[arg(long)]
        items_file: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match config.to_context().await {
        Ok(ctx) => Arc::new(ctx),
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => App::new(ctx).serve().await.map_err(|err| err.to_string()),
        Command::Seed {
            restaurant,
            owner_email,
            tables,
            items_file,
        } => seed::run(
            &ctx,
            SeedOptions {
                restaurant,
                owner_email,
                tables,
                items_file,
            },
        )
        .await
        .map_err(|err| err.to_string()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
