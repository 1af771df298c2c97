//! Portal entry-point: wires session middleware, REST endpoints, and OpenAPI
//! docs.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::SameSite;
use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use razewatch::inbound::http::health::HealthState;
use razewatch::server::{ServerConfig, create_server, key_fingerprint, load_session_key};

/// `razewatch` command arguments. Environment variables fill any flag left
/// unset, so container deployments need no argument plumbing.
#[derive(Debug, Parser)]
#[command(
    name = "razewatch",
    about = "Administrative portal for the municipal demolition-supervision programme",
    version
)]
struct CliArgs {
    /// Socket address to bind.
    #[arg(long, value_name = "addr", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
    /// Path to the session signing key file. Falls back to
    /// `SESSION_KEY_FILE`, then the mounted-secret default.
    #[arg(long = "session-key-file", value_name = "path")]
    session_key_file: Option<PathBuf>,
    /// Drop the `Secure` attribute from the session cookie (local HTTP
    /// development only).
    #[arg(long = "insecure-cookies")]
    insecure_cookies: bool,
    /// Base URL of the upstream programme backend. Falls back to
    /// `UPSTREAM_BASE_URL`; in-process fixtures serve when neither is set.
    #[arg(long = "upstream-base-url", value_name = "url")]
    upstream_base_url: Option<Url>,
}

fn upstream_base(args_url: Option<Url>) -> std::io::Result<Option<Url>> {
    if let Some(url) = args_url {
        return Ok(Some(url));
    }
    match env::var("UPSTREAM_BASE_URL") {
        Ok(raw) => Url::parse(&raw)
            .map(Some)
            .map_err(|err| std::io::Error::other(format!("invalid UPSTREAM_BASE_URL: {err}"))),
        Err(_) => Ok(None),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();

    let key_path = args
        .session_key_file
        .or_else(|| env::var("SESSION_KEY_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("/var/run/secrets/session_key"));
    let allow_ephemeral = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
    let key = load_session_key(&key_path, allow_ephemeral)?;
    info!(fingerprint = %key_fingerprint(&key), "session signing key active");

    let cookie_secure = !args.insecure_cookies
        && env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

    let upstream = upstream_base(args.upstream_base_url)?;
    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, args.bind);
    if let Some(base) = upstream {
        info!(base = %base, "using upstream programme backend");
        config = config.with_upstream(base);
    } else {
        warn!("no upstream base URL configured; serving in-process fixture data");
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting portal server");
    let server = create_server(health_state, config)?;
    server.await
}
