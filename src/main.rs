use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use tro_dashboard::actions::demo;
use tro_dashboard::api::ExplorerClient;
use tro_dashboard::cli::{Cli, Command};
use tro_dashboard::config::Config;
use tro_dashboard::dashboard::{Dashboard, SeededRandom};
use tro_dashboard::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_file.as_deref())?;

    let config_path = cli.config_path();
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    config.apply_env_overrides();
    config.validate()?;
    info!("Configuration loaded for token {}", config.explorer.token_id);

    match cli.command {
        Command::Dashboard { svg, seed } => {
            let client = Arc::new(ExplorerClient::from_config(&config.explorer)?);
            let dashboard = match seed {
                Some(seed) => Dashboard::with_random(client, config, Box::new(SeededRandom::new(seed))),
                None => Dashboard::new(client, config),
            };

            let view = dashboard.load().await;
            print!("{}", view.render_text());

            if let Some(path) = svg {
                let svg_doc = view
                    .sections
                    .as_ref()
                    .map(|s| s.chart.to_svg())
                    .unwrap_or_default();
                std::fs::write(&path, svg_doc)
                    .with_context(|| format!("Failed to write chart to {:?}", path))?;
                info!("Chart written to {:?}", path);
            }
        }
        Command::Demo { screen } => {
            for step in demo::run(screen) {
                println!("{}", step.render());
            }
        }
    }

    Ok(())
}
