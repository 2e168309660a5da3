//! Map parsed CLI arguments to the action to run.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_PORT, cognito, session};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);

    let cognito_opts = cognito::Options::parse(matches)?;
    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        cognito_region: cognito_opts.region,
        cognito_client_id: cognito_opts.client_id,
        cognito_endpoint: cognito_opts.endpoint,
        provider_timeout_seconds: cognito_opts.timeout_seconds,
        jwt_secret: session_opts.jwt_secret,
        session_ttl_seconds: session_opts.ttl_seconds,
    }))
}
