//! CLI module - Command-line interface for AniDiff
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

/// AniDiff - Compare two AniList users' anime lists
#[derive(Parser)]
#[command(name = "anidiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the command reads `config.toml`. `init` writes it and the bare
    /// help screen ignores it, so neither should trip over a broken file.
    #[must_use]
    pub const fn needs_config(&self) -> bool {
        matches!(self.command, Some(Commands::Compare { .. } | Commands::Web))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the anime lists of two users
    #[command(alias = "c")]
    Compare {
        /// First AniList username
        user_a: String,
        /// Second AniList username
        user_b: String,
        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Start the HTTP server
    #[command(alias = "serve")]
    Web,

    /// Create default config file
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_help_skip_config() {
        let init = Cli::try_parse_from(["anidiff", "init"]).unwrap();
        assert!(!init.needs_config());

        let bare = Cli::try_parse_from(["anidiff"]).unwrap();
        assert!(!bare.needs_config());
    }

    #[test]
    fn test_compare_and_web_need_config() {
        let compare = Cli::try_parse_from(["anidiff", "compare", "alice", "bob", "-f", "json"])
            .unwrap();
        assert!(compare.needs_config());
        assert!(matches!(
            compare.command,
            Some(Commands::Compare {
                format: OutputFormat::Json,
                ..
            })
        ));

        let web = Cli::try_parse_from(["anidiff", "serve"]).unwrap();
        assert!(web.needs_config());
    }
}
