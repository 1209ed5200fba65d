#![deny(
    clippy::as_conversions,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::string_slice,
    clippy::todo,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::manual_non_exhaustive,
    clippy::missing_errors_doc,
    clippy::module_inception,
    clippy::module_name_repetitions,
    clippy::needless_return,
    clippy::single_match_else,
    clippy::multiple_crate_versions
)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing,
        clippy::panic
    )
)]

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::store::{RestStore, SqliteStore, Store};

pub use args::{DashboardArgs, StoreBackend};
pub use error::{ConfigurationError, Error, StoreError, ValidationError};
pub use state::DashboardState;

mod args;
pub mod dashboard;
mod error;
pub mod filters;
pub mod models;
mod routes;
mod state;
pub mod store;
mod templates;

/// Connects to the configured store. Fails before anything is served when
/// the hosted table's secrets are missing.
pub async fn connect_store(args: &DashboardArgs) -> Result<Store, Error> {
    let store = match args.store {
        StoreBackend::Rest => {
            let (url, key) = args.rest_credentials()?;
            let store = RestStore::new(url, key)?;
            info!(endpoint = %store.endpoint(), "using hosted task store");
            Store::from(store)
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&args.database).await?;
            info!(database = %args.database, "using local task store");
            Store::from(store)
        }
    };

    Ok(store)
}

pub async fn server(args: &DashboardArgs) -> Result<Router, Error> {
    let store = connect_store(args).await?;

    Ok(router(DashboardState::new(store)))
}

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .merge(routes::dashboard::router())
        .merge(routes::assignment::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
