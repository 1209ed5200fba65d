use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    dashboard::Filter,
    error::ValidationError,
    models::{NewAssignment, Priority},
    routes::{dashboard_location, rerender},
    state::DashboardState,
    store::Store,
    templates::{Banner, FormValues},
};

pub fn router() -> Router<DashboardState> {
    Router::new()
        .route("/assignments", post(add_assignment))
        .route("/assignments/{id}/submitted", post(set_submitted))
        .route("/assignments/{id}/delete", post(delete_assignment))
}

#[derive(Debug, Default, Deserialize)]
pub struct AddAssignmentForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default, deserialize_with = "Filter::deserialize_lenient")]
    pub filter: Filter,
}

impl AddAssignmentForm {
    /// Required-field checks only; an empty priority means medium.
    pub fn validate(&self) -> Result<NewAssignment, ValidationError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }

        let deadline = self.deadline.trim();
        if deadline.is_empty() {
            return Err(ValidationError::MissingField("deadline"));
        }
        let deadline = NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDeadline(deadline.to_owned()))?;

        let priority = match self.priority.trim() {
            "" => Priority::default(),
            other => other.parse()?,
        };

        Ok(NewAssignment::new(subject, title, deadline)
            .with_priority(priority)
            .with_url(self.url.trim())
            .with_memo(self.memo.trim()))
    }

    fn values(&self) -> FormValues {
        FormValues {
            subject: self.subject.clone(),
            title: self.title.clone(),
            deadline: self.deadline.clone(),
            priority: self.priority.parse().unwrap_or_default(),
            url: self.url.clone(),
            memo: self.memo.clone(),
        }
    }
}

async fn add_assignment(State(store): State<Store>, Form(form): Form<AddAssignmentForm>) -> Response {
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            debug!(error = %e, "rejected add form");
            return rerender(
                &store,
                StatusCode::UNPROCESSABLE_ENTITY,
                form.filter,
                Vec::new(),
                Some(form.values()),
                Some(e.to_string()),
            )
            .await;
        }
    };

    match store.create(&new).await {
        Ok(created) => {
            info!(id = created.id, subject = %created.subject, "assignment added");
            Redirect::to(&dashboard_location(form.filter, Some("added"))).into_response()
        }
        Err(e) => {
            warn!(error = %e, "could not add assignment");
            rerender(
                &store,
                StatusCode::BAD_GATEWAY,
                form.filter,
                vec![Banner::error(format!("Could not add the assignment: {e}"))],
                Some(form.values()),
                None,
            )
            .await
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmittedForm {
    pub submitted: bool,
    #[serde(default, deserialize_with = "Filter::deserialize_lenient")]
    pub filter: Filter,
}

async fn set_submitted(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Form(SubmittedForm { submitted, filter }): Form<SubmittedForm>,
) -> Response {
    match store.set_submitted(id, submitted).await {
        Ok(()) => {
            info!(id, submitted, "submission status changed");
            Redirect::to(&dashboard_location(filter, None)).into_response()
        }
        Err(e) => {
            warn!(id, error = %e, "could not change submission status");
            rerender(
                &store,
                StatusCode::BAD_GATEWAY,
                filter,
                vec![Banner::error(format!("Could not update assignment {id}: {e}"))],
                None,
                None,
            )
            .await
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default, deserialize_with = "Filter::deserialize_lenient")]
    pub filter: Filter,
}

async fn delete_assignment(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Form(DeleteForm { filter }): Form<DeleteForm>,
) -> Response {
    match store.delete(id).await {
        Ok(()) => {
            info!(id, "assignment deleted");
            Redirect::to(&dashboard_location(filter, Some("deleted"))).into_response()
        }
        Err(e) => {
            warn!(id, error = %e, "could not delete assignment");
            rerender(
                &store,
                StatusCode::BAD_GATEWAY,
                filter,
                vec![Banner::error(format!("Could not delete assignment {id}: {e}"))],
                None,
                None,
            )
            .await
        }
    }
}
