pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod grouping;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::leagues::{data_dir_from_env, LeagueStore};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init(league: &str) -> Result<()> {
    let config = AppConfig::new();
    let store = LeagueStore::new(data_dir_from_env(config.league.data_dir));
    let slug = store.create_league(league)?;
    log::info!("Initialized league '{slug}'");
    Ok(())
}
