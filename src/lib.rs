pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConvertRequest;
use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// List supported currencies, optionally filtered
    List { search: Option<String> },
    /// Convert an amount between two currencies
    Convert(ConvertRequest),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // Shared by the list and rate lookups so a USD conversion reuses the listing response
    let rate_cache = Arc::new(Cache::new());
    let open_er = &config.providers.open_er;
    let provider = providers::OpenErProvider::new(&open_er.base_url, rate_cache)
        .with_retry_policy(open_er.retries, open_er.retry_delay_ms);

    match command {
        AppCommand::List { search } => cli::list::run(&provider, search.as_deref()).await,
        AppCommand::Convert(request) => {
            cli::convert::run(&provider, &provider, &request, &config.defaults).await
        }
    }
}
