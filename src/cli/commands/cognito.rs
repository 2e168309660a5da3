use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

pub const ARG_COGNITO_REGION: &str = "cognito-region";
pub const ARG_COGNITO_CLIENT_ID: &str = "cognito-client-id";
pub const ARG_COGNITO_ENDPOINT: &str = "cognito-endpoint";
pub const ARG_PROVIDER_TIMEOUT_SECONDS: &str = "provider-timeout-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_COGNITO_REGION)
                .long(ARG_COGNITO_REGION)
                .help("AWS region of the Cognito user pool")
                .env("COGNITO_REGION")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COGNITO_CLIENT_ID)
                .long(ARG_COGNITO_CLIENT_ID)
                .help("Cognito app client id")
                .env("COGNITO_CLIENT_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COGNITO_ENDPOINT)
                .long(ARG_COGNITO_ENDPOINT)
                .help("Override the Cognito endpoint (e.g. a local emulator)")
                .env("COGNITO_ENDPOINT"),
        )
        .arg(
            Arg::new(ARG_PROVIDER_TIMEOUT_SECONDS)
                .long(ARG_PROVIDER_TIMEOUT_SECONDS)
                .help("Timeout for a single identity provider call, in seconds")
                .env("AUTHGATE_PROVIDER_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug, Clone)]
pub struct Options {
    pub region: String,
    pub client_id: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing or blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let region = matches
            .get_one::<String>(ARG_COGNITO_REGION)
            .cloned()
            .context("missing required argument: --cognito-region")?;
        let client_id = matches
            .get_one::<String>(ARG_COGNITO_CLIENT_ID)
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .context("missing required argument: --cognito-client-id")?;

        Ok(Self {
            region,
            client_id,
            endpoint: matches.get_one::<String>(ARG_COGNITO_ENDPOINT).cloned(),
            timeout_seconds: matches
                .get_one::<u64>(ARG_PROVIDER_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(10),
        })
    }
}
