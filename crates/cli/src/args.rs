//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not merge configuration sources (see `config` module).
//! - Does not run queries (see `query_loop` module).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pandora-get")]
#[command(
    about = "Run a Pandora query on a schedule and print the results as JSON lines",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  pandora-get -s https://pandora.example.com -t $PANDORA_TOKEN -f query.spl\n  echo 'repo=\"access\" | stats count() by host' | pandora-get --once --all\n  pandora-get -f query.spl --interval 60 --mode smart --metrics-bind 127.0.0.1:9090\n"
)]
pub struct Cli {
    /// Pandora server URL (e.g., https://pandora.example.com)
    #[arg(short, long, env = "PANDORA_SERVER")]
    pub server: Option<String>,

    /// Token sent verbatim as the Authorization header
    #[arg(short, long, env = "PANDORA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File holding the query text; read from stdin when omitted or "-"
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Query window and schedule period in seconds
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Maximum number of results the service collects per query
    #[arg(long, value_name = "N")]
    pub limit: Option<u64>,

    /// Seconds to wait for a job to finish before giving up on it
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Milliseconds between job status polls
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Query mode (fast, smart, detailed)
    #[arg(long)]
    pub mode: Option<String>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long)]
    pub skip_verify: bool,

    /// Run a single query and exit with a status describing its outcome
    #[arg(long)]
    pub once: bool,

    /// Print every record instead of only the first
    #[arg(long)]
    pub all: bool,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, env = "PANDORA_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "pandora-get",
            "-s",
            "https://p.example.com",
            "-t",
            "tok",
            "-f",
            "q.spl",
            "--once",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("https://p.example.com"));
        assert_eq!(cli.token.as_deref(), Some("tok"));
        assert_eq!(cli.file, Some(PathBuf::from("q.spl")));
        assert!(cli.once);
        assert!(!cli.all);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_log_format_json() {
        let cli = Cli::try_parse_from(["pandora-get", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(Cli::try_parse_from(["pandora-get", "--log-format", "xml"]).is_err());
    }
}
