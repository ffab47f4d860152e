// ABOUTME: Server binary: loads configuration, opens the database, and serves the recipe API
// ABOUTME: Configuration problems abort startup before the listener binds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! # Rezepte Server Binary
//!
//! Starts the recipe REST API and UI shell on the configured address.

use anyhow::Result;
use clap::Parser;
use rezepte_server::{
    config::ServerConfig,
    database::{Database, RecipeStore},
    links::RouteTable,
    logging,
    server::{self, ServerResources},
    services::RecipeService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rezepte-server")]
#[command(about = "Rezepte - recipe catalog REST API with a single-page UI shell")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the UI shell directory
    #[arg(long)]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(assets_dir) = args.assets_dir {
        config.assets_dir = assets_dir;
    }

    logging::init_for(config.environment)?;
    info!("{}", config.summary());

    let links = RouteTable::standard();
    links.validate()?;

    let database = Database::new(&config.database).await?;
    let store: Arc<dyn RecipeStore> = Arc::new(database.recipes(config.timeouts.write));
    let resources = Arc::new(ServerResources::new(
        RecipeService::new(store, links),
        config,
    ));

    if let Err(e) = server::serve(resources).await {
        error!(error = %e, "Server stopped with an error");
        return Err(e.into());
    }

    info!("Rezepte server shut down cleanly");
    Ok(())
}
