//! `gigboard config`: inspect and initialize the config file

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (file + environment) as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = AppConfig::load()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = AppConfig::config_path();

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(&config_path, AppConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("Created config at: {}", config_path.display());
    Ok(())
}
