use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::Deserialize;

use crate::{
    dashboard::Filter, routes::render_dashboard, state::DashboardState, store::Store,
    templates::Banner,
};

pub fn router() -> Router<DashboardState> {
    Router::new().route("/", get(dashboard))
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Notice {
    Added,
    Deleted,
}

impl Notice {
    const fn message(self) -> &'static str {
        match self {
            Self::Added => "Assignment added",
            Self::Deleted => "Assignment deleted",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    #[serde(default, deserialize_with = "Filter::deserialize_lenient")]
    filter: Filter,
    #[serde(default)]
    notice: Option<Notice>,
}

async fn dashboard(
    State(store): State<Store>,
    Query(DashboardQuery { filter, notice }): Query<DashboardQuery>,
) -> Result<Html<String>, StatusCode> {
    let banners = notice
        .map(|n| Banner::success(n.message()))
        .into_iter()
        .collect();

    render_dashboard(&store, filter, banners, None, None).await
}
