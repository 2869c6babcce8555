//! Harbor auth command-line client
//!
//! Drives the three remote operations of a harbor registry auth service:
//!
//! ```text
//! harbor-auth [--config PATH] login
//! harbor-auth [--config PATH] check  [--token TOKEN]
//! harbor-auth [--config PATH] logout [--token TOKEN]
//! ```
//!
//! The result is printed as JSON on stdout. Logs go to stderr as JSON.

mod config;

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use auth::{Auth, LoginResponse, StatusResponse};
use common::Secret;
use harbor_auth::HarborAuthClient;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Login,
    Logout,
    Check,
}

#[derive(Debug)]
struct Args {
    config: Option<String>,
    command: Command,
    token: Option<Secret<String>>,
}

/// What gets printed on stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Login(LoginResponse),
    Status(StatusResponse),
}

impl Outcome {
    fn success(&self) -> bool {
        match self {
            Outcome::Login(login) => login.success,
            Outcome::Status(status) => status.success,
        }
    }
}

/// Simple flag parsing: `--config PATH`, `--token TOKEN`, one command word.
fn parse_args(args: &[String]) -> Result<Args> {
    let mut config = None;
    let mut token = None;
    let mut command = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(iter.next().context("--config needs a path")?.clone());
            }
            "--token" => {
                let value = iter.next().context("--token needs a value")?;
                token = Some(Secret::new(value.clone()));
            }
            "login" | "logout" | "check" if command.is_some() => {
                bail!("only one command may be given, got another: {arg}");
            }
            "login" => command = Some(Command::Login),
            "logout" => command = Some(Command::Logout),
            "check" => command = Some(Command::Check),
            other => bail!("unrecognized argument: {other}"),
        }
    }

    let command = command.context("missing command: expected one of login, logout, check")?;
    Ok(Args {
        config,
        command,
        token,
    })
}

/// Run one command against `backend`.
async fn execute(
    backend: &dyn Auth,
    command: Command,
    username: &str,
    password: Option<&Secret<String>>,
    token: Option<&Secret<String>>,
) -> Result<Outcome> {
    debug!(backend = backend.id(), ?command, username, "executing");
    match command {
        Command::Login => {
            let password = password
                .context("no password configured: set HARBOR_PASSWORD or credentials.password_file")?;
            let login = backend.login(username, password.expose()).await?;
            Ok(Outcome::Login(login))
        }
        Command::Logout | Command::Check => {
            let token = token.context("no token given: pass --token or set HARBOR_TOKEN")?;
            let success = if command == Command::Logout {
                backend.logout(username, token.expose()).await?
            } else {
                backend.is_authenticated(username, token.expose()).await?
            };
            Ok(Outcome::Status(StatusResponse { success }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs on stderr keep stdout for the JSON result
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config_path = Config::resolve_path(args.config.as_deref());
    let config = Config::load(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load config from environment".to_string(),
    })?;

    info!(
        url = %config.harbor.url,
        username = %config.credentials.username,
        timeout_secs = ?config.harbor.timeout_secs,
        "configuration loaded"
    );

    let mut builder = HarborAuthClient::builder(config.harbor.url.clone());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let token = args.token.as_ref().or(config.credentials.token.as_ref());
    let outcome = execute(
        &client,
        args.command,
        &config.credentials.username,
        config.credentials.password.as_ref(),
        token,
    )
    .await?;

    println!("{}", serde_json::to_string(&outcome)?);

    Ok(if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
