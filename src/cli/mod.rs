//! CLI module for GameHub
//!
//! Provides a command-line interface to the same process manager the
//! dashboard talks to.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

pub use output::{Output, OutputFormat};

/// GameHub - game server dashboard
#[derive(Parser, Debug)]
#[command(name = "gamehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn output(&self) -> Output {
        Output {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            quiet: self.quiet,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the known game servers
    Games,

    /// Query and control a game server
    Server {
        #[command(subcommand)]
        command: commands::server::ServerCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive shell
    Shell,
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Shell => shell::run().await,
        command => execute(command, cli.output.output()).await,
    }
}

/// Dispatch a non-shell command to its handler
async fn execute(command: Commands, out: Output) -> anyhow::Result<()> {
    match command {
        Commands::Games => commands::games::run(out),
        Commands::Server { command } => commands::server::run(command, out).await,
        Commands::Config { command } => commands::config::run(command, out),
        Commands::Shell => anyhow::bail!("Already in shell mode"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::server::ServerCommands;

    #[test]
    fn test_parse_server_start() {
        let cli = Cli::try_parse_from(["gamehub", "server", "start", "--game", "rust", "--json"])
            .unwrap();
        assert!(cli.output.json);
        match cli.command {
            Commands::Server {
                command: ServerCommands::Start { game, force },
            } => {
                assert_eq!(game.as_deref(), Some("rust"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gamehub", "server", "stop", "-q", "--force"]).unwrap();
        let out = cli.output.output();
        assert!(out.quiet);
        assert_eq!(out.format, OutputFormat::Text);
        assert!(matches!(
            cli.command,
            Commands::Server {
                command: ServerCommands::Stop { game: None, force: true }
            }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["gamehub", "launch"]).is_err());
    }
}
