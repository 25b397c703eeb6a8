mod commands;
mod config;
mod tracing_setup;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::AppConfig;
use crate::tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "gigboard",
    author,
    version,
    about = "Venue, artist and show listings over HTTP",
    long_about = "List venues grouped by area, search venues and artists by name, and \
                  schedule shows between them. Backed by PostgreSQL."
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (creates the schema first)
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Manage gigboard configuration (path, show, init)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, AppConfig::load()?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, AppConfig::load()?).await?,
        Commands::Config(args) => commands::run_config(args)?,
        Commands::Completions(args) => run_completions(args),
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn debug_is_global() {
        let cli = Cli::try_parse_from(["gigboard", "config", "path", "--debug"]).unwrap();
        assert!(cli.debug);
    }
}
