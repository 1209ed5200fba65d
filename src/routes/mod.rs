use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::{
    dashboard::{DashboardView, Filter},
    store::Store,
    templates::{Banner, DashboardPage, FormValues},
};

pub mod assignment;
pub mod dashboard;

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Where mutations send the browser afterwards.
pub(crate) fn dashboard_location(filter: Filter, notice: Option<&str>) -> String {
    match notice {
        Some(notice) => format!("/?filter={filter}&notice={notice}"),
        None => format!("/?filter={filter}"),
    }
}

/// Fetches every row and renders the whole page. A failed fetch is shown as
/// a banner over an empty list.
pub(crate) async fn render_dashboard(
    store: &Store,
    filter: Filter,
    mut banners: Vec<Banner>,
    form: Option<FormValues>,
    form_error: Option<String>,
) -> Result<Html<String>, StatusCode> {
    let today = today();

    let assignments = store.list_all().await.unwrap_or_else(|e| {
        warn!(error = %e, "could not load assignments");
        banners.push(Banner::error(format!("Could not load assignments: {e}")));
        Vec::new()
    });

    let view = DashboardView::build(assignments, filter, today);

    DashboardPage::new(
        view,
        banners,
        form.unwrap_or_else(|| FormValues::blank(today)),
        form_error,
    )
    .render()
    .map(Html)
    .map_err(|e| {
        warn!(error = %e, "could not render dashboard");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// The dashboard again, answered with `status` instead of a redirect.
pub(crate) async fn rerender(
    store: &Store,
    status: StatusCode,
    filter: Filter,
    banners: Vec<Banner>,
    form: Option<FormValues>,
    form_error: Option<String>,
) -> Response {
    match render_dashboard(store, filter, banners, form, form_error).await {
        Ok(page) => (status, page).into_response(),
        Err(status) => status.into_response(),
    }
}
