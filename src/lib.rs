pub mod cli;
pub mod core;
pub mod providers;

use crate::core::Session;
use crate::core::config::AppConfig;
use crate::providers::exchangerate_api::ExchangeRateApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates,
    Session,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = ExchangeRateApiProvider::from_config(&config.provider)?;
    let mut session = Session::new(Box::new(provider));

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&mut session, &amount, &from, &to).await?;
            Ok(())
        }
        AppCommand::Rates => cli::rates::run(&mut session).await,
        AppCommand::Session => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            cli::session::run(&mut session, &config.defaults, input, &mut out).await
        }
    }
}
