// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use relational_license_client::config::{ClientConfig, LOGIN_DOMAIN_ENV};
use relational_license_client::{
    logging, AccessToken, LicenseAccessor, LicenseFetcher, ReqwestTransport, Session,
    StaticTokenSource,
};

/// Fetch a license JWT from the licensing service and print it to stdout.
#[derive(Parser)]
#[command(name = "relational-license", version)]
struct Cli {
    /// License ID to fetch.
    license_id: String,

    /// Bearer access token of the logged-in user.
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Licensing service domain (overrides LOGIN_DOMAIN).
    #[arg(long, env = "LOGIN_DOMAIN")]
    domain: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<relational_license_client::LicenseError>() {
                Some(license_err) => error!(
                    error_code = license_err.error_code(),
                    retryable = license_err.is_retryable(),
                    "{err:#}"
                ),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let domain = cli.domain;
    let config = ClientConfig::from_lookup(|name| match (name, &domain) {
        (LOGIN_DOMAIN_ENV, Some(domain)) => Some(domain.clone()),
        _ => std::env::var(name).ok(),
    })?;

    logging::init(config.log_format).context("failed to initialise tracing subscriber")?;

    let session = Session::new(config.env());
    session
        .login(Arc::new(StaticTokenSource::new(AccessToken::new(cli.access_token))))
        .await;

    let transport = ReqwestTransport::with_timeout(config.request_timeout)
        .context("failed to create HTTP transport")?;
    let accessor = LicenseAccessor::new(session, LicenseFetcher::new(transport));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling license request");
            on_interrupt.cancel();
        }
    });

    info!(
        domain = %config.login_domain,
        license_id = %cli.license_id,
        "Fetching license JWT"
    );
    let license = accessor.get_license(&cancel, &cli.license_id).await?;
    println!("{license}");
    Ok(())
}
