pub mod cli;
pub mod core;

use crate::core::Currency;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Watch,
    Board { ticks: u32, json: bool },
    Convert { from: Currency, to: Currency, amount: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Watch => cli::view::ConverterView::start(&config)?.run().await,
        AppCommand::Board { ticks, json } => cli::board::run(&config, ticks, json).await,
        AppCommand::Convert { from, to, amount } => cli::convert::run(&config, from, to, &amount),
    }
}
