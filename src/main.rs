#![deny(
    clippy::expect_used,
    clippy::future_not_send,
    clippy::pedantic,
    clippy::as_conversions,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::manual_non_exhaustive,
    clippy::multiple_crate_versions
)]

use std::io;

use clap::Parser;
use taskboard::{DashboardArgs, server};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    // A .env file is optional; real deployments pass the secrets directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = DashboardArgs::parse();

    let app = server(&args).await.map_err(|e| {
        error!(error = %e, "cannot start the dashboard");
        io::Error::other(e)
    })?;

    let listener = TcpListener::bind(args.bind_address()).await?;

    info!(address = %listener.local_addr()?, "dashboard listening");

    axum::serve(listener, app).await
}
