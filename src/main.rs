//! Entry point for the billing engine binary.
//!
//! Running this binary starts an HTTP server exposing the cost
//! engine. The pricing file may be specified via the
//! `BILLING_PRICING_FILE` environment variable; if unset the built-in
//! rate card is used. `BILLING_BIND_ADDR` overrides the default bind
//! address.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pricing_file = std::env::var("BILLING_PRICING_FILE").ok().map(PathBuf::from);
    let addr =
        std::env::var("BILLING_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    if let Err(err) = billing_engine::api::serve(&addr, pricing_file).await {
        tracing::error!("server error: {err:#}");
        std::process::exit(1);
    }
}
