use crate::actions::DemoScreen;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch token data and print the dashboard
    Dashboard {
        /// Also write the price chart as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Seed for the simulated price history
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Walk through one of the demo action screens
    Demo {
        #[arg(value_enum)]
        screen: DemoScreen,
    },
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
