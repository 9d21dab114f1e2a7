//! themereg CLI Module
//! Command-line interface for registration state and update checks

pub mod formatter;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::options::OptionValue;

#[derive(Parser, Debug)]
#[command(name = "themereg")]
#[command(author = "themereg Team")]
#[command(version)]
#[command(about = "Theme registration shim: update checks and option storage", long_about = None)]
pub struct Cli {
    /// Project directory holding themereg.config.json
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Output format (json for scripting)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config into the project directory
    Init {
        /// Theme slug
        #[arg(short, long, default_value = "flatsome")]
        slug: String,

        /// Update metadata endpoint (scheme and host)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Run the theme activation step (default flags, drop legacy options)
    Activate,

    /// Check the metadata endpoint for a newer release
    CheckUpdate {
        /// Installed theme version
        version: String,
    },

    /// Show registration status
    Status,

    /// Option blob management
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },

    /// Registration error messages
    Errors {
        #[command(subcommand)]
        action: ErrorsAction,
    },

    /// Hide the registration notice
    DismissNotice,

    /// Register a purchase code
    Register {
        /// Purchase code
        code: String,
    },

    /// Remove the registration
    Unregister,

    /// Ask the registration service for the latest version
    LatestVersion,

    /// Ask the registration service for a download URL
    DownloadUrl {
        /// Version to download
        version: String,
    },

    /// Delete all stored registration options (uninstall)
    Purge,
}

#[derive(Subcommand, Debug)]
pub enum OptionsAction {
    /// List all keys in the option blob
    List,

    /// Get a single key
    Get {
        key: String,
    },

    /// Set a single key
    Set {
        key: String,
        value: String,

        /// How to interpret VALUE (lists are comma separated)
        #[arg(short = 't', long = "type", default_value = "string")]
        kind: ValueKind,
    },

    /// Delete a single key
    Delete {
        key: String,
    },

    /// Delete the whole option blob
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ErrorsAction {
    /// Replace the stored errors (empty messages are dropped)
    Set {
        messages: Vec<String>,
    },

    /// List stored errors
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    List,
}

impl ValueKind {
    pub fn parse(&self, raw: &str) -> Result<OptionValue, String> {
        match self {
            Self::String => Ok(OptionValue::String(raw.to_string())),
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(OptionValue::Bool(true)),
                "false" | "0" | "no" | "off" | "" => Ok(OptionValue::Bool(false)),
                _ => Err(format!("Not a boolean: {}", raw)),
            },
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(OptionValue::Int)
                .map_err(|e| format!("Not an integer: {} ({})", raw, e)),
            Self::List => Ok(OptionValue::List(
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            )),
        }
    }
}

impl Cli {
    /// `--project`, else the per-user data directory, else the current directory
    pub fn get_project_dir(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("themereg"))
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::parse_from(["themereg", "-p", "/tmp/x", "-vv", "check-update", "3.18.7"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.get_project_dir(), PathBuf::from("/tmp/x"));
        assert!(matches!(cli.command, Commands::CheckUpdate { ref version } if version == "3.18.7"));

        let cli = Cli::parse_from([
            "themereg", "options", "set", "show_notice", "true", "--type", "bool", "-f", "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Options {
                action: OptionsAction::Set { kind: ValueKind::Bool, .. }
            }
        ));
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(ValueKind::Bool.parse("Yes"), Ok(OptionValue::Bool(true)));
        assert_eq!(ValueKind::Bool.parse("0"), Ok(OptionValue::Bool(false)));
        assert!(ValueKind::Bool.parse("maybe").is_err());

        assert_eq!(ValueKind::Int.parse(" 42 "), Ok(OptionValue::Int(42)));
        assert!(ValueKind::Int.parse("4.2").is_err());

        assert_eq!(
            ValueKind::List.parse("e1, ,e2"),
            Ok(OptionValue::List(vec!["e1".into(), "e2".into()]))
        );
        assert_eq!(
            ValueKind::String.parse("0"),
            Ok(OptionValue::String("0".into()))
        );
    }
}
