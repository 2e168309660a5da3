use crate::{
    api,
    cli::globals::GlobalArgs,
    gateway::{AuthGateway, SessionIssuer},
    provider::CognitoClient,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub cognito_region: String,
    pub cognito_client_id: String,
    pub cognito_endpoint: Option<String>,
    pub provider_timeout_seconds: u64,
    pub jwt_secret: SecretString,
    pub session_ttl_seconds: i64,
}

/// Build the gateway from startup configuration.
///
/// # Errors
/// Returns an error if the provider client or session issuer cannot be built.
pub fn build_gateway(
    globals: &GlobalArgs,
    provider_timeout: Duration,
    session_ttl_seconds: i64,
) -> Result<AuthGateway> {
    let provider = CognitoClient::new(
        &globals.cognito_region,
        globals.cognito_endpoint.as_deref(),
        provider_timeout,
    )
    .context("Failed to build Cognito client")?;

    let sessions = SessionIssuer::new(&globals.jwt_secret, session_ttl_seconds)
        .context("Failed to build session issuer")?;

    info!(
        "Identity provider endpoint: {}, session TTL: {}s",
        provider.endpoint(),
        sessions.ttl_seconds()
    );

    Ok(AuthGateway::new(
        Arc::new(provider),
        globals.cognito_client_id.clone(),
        sessions,
    ))
}

/// Execute the server action.
/// # Errors
/// Returns an error if the gateway cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let mut globals = GlobalArgs::new(args.cognito_region, args.cognito_client_id, args.jwt_secret);
    globals.set_cognito_endpoint(args.cognito_endpoint);

    debug!("Global args: {:?}", globals);

    let gateway = build_gateway(
        &globals,
        Duration::from_secs(args.provider_timeout_seconds),
        args.session_ttl_seconds,
    )?;

    api::new(args.port, Arc::new(gateway)).await
}
