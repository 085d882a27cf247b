use crate::api::config::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TOKEN_FILE: &str = "token-file";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_JSON: &str = "json";

#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
    pub token_file: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub json: bool,
}

impl Options {
    /// Parse connection arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the API URL is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let url = match matches.get_one::<String>(ARG_API_URL) {
            Some(value) if !value.trim().is_empty() => value.clone(),
            _ => anyhow::bail!("missing required argument: --{ARG_API_URL}"),
        };

        Ok(Self {
            url,
            token_file: matches
                .get_one::<String>(ARG_TOKEN_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            timeout_seconds: matches
                .get_one::<u64>(ARG_TIMEOUT)
                .copied()
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            json: matches.get_flag(ARG_JSON),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the Siswa Manager API")
                .env("SISWA_API_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_FILE)
                .long(ARG_TOKEN_FILE)
                .help("File holding the API token (default: <config dir>/siswa/token)")
                .env("SISWA_TOKEN_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("SISWA_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_JSON)
                .long(ARG_JSON)
                .help("Print JSON instead of tables")
                .env("SISWA_JSON")
                .action(ArgAction::SetTrue)
                .global(true),
        )
}
