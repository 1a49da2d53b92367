//! Command line definition.

use clap::{Parser, Subcommand};
use nmtray_common::LoggingConfig;
use std::path::PathBuf;

/// Inspect, check and format nm-tray translation catalogs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overrides the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply the logging flags on top of configured logging.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level.clone_from(level);
        }
        if self.json_logs {
            logging.json_format = true;
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the summary the release tool prints when compiling the catalog
    Stats {
        /// Catalog file
        file: PathBuf,
        /// Leave out translations marked unfinished
        #[arg(long)]
        no_unfinished: bool,
        /// Leave out translations identical to their source
        #[arg(long)]
        remove_identical: bool,
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate one message
    Lookup {
        /// Catalog file; defaults to the configured catalog for the UI locale
        file: Option<PathBuf>,
        /// Context name, e.g. Tray
        #[arg(long)]
        context: String,
        /// Source text
        #[arg(long)]
        source: String,
        /// Disambiguation comment
        #[arg(long)]
        comment: Option<String>,
        /// Count for numerus messages
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        /// Values for %1, %2, ... in order
        #[arg(long = "arg")]
        args: Vec<String>,
    },

    /// Report duplicate keys, placeholder mismatches and untranslated messages
    Check {
        /// Catalog file
        file: PathBuf,
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
        /// Hide informational findings
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the messages of a catalog
    Dump {
        /// Catalog file
        file: PathBuf,
        /// Only this context
        #[arg(long)]
        context: Option<String>,
        /// Print the document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a catalog in the extraction tool's layout
    Fmt {
        /// Catalog file
        file: PathBuf,
        /// Write here instead of stdout
        #[arg(short, long, conflicts_with = "check")]
        output: Option<PathBuf>,
        /// Only report whether the file is already formatted
        #[arg(long)]
        check: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_logging_overrides() {
        let cli = Cli::try_parse_from([
            "nmtray-l10n",
            "stats",
            "nm-tray_da.ts",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        let mut logging = LoggingConfig::default();
        cli.apply_logging_overrides(&mut logging);

        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
    }

    #[test]
    fn test_lookup_arguments() {
        let cli = Cli::try_parse_from([
            "nmtray-l10n",
            "lookup",
            "--context",
            "NmModel",
            "--source",
            "unknown",
            "--comment",
            "Speed",
            "--arg",
            "a",
            "--arg",
            "b",
        ])
        .unwrap();

        match cli.command {
            Command::Lookup {
                file,
                context,
                comment,
                args,
                count,
                ..
            } => {
                assert!(file.is_none());
                assert_eq!(context, "NmModel");
                assert_eq!(comment.as_deref(), Some("Speed"));
                assert_eq!(args, vec!["a", "b"]);
                assert_eq!(count, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
