use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, models::Priority};

/// An assignment as the rest of the crate sees it: optional columns are
/// already normalised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub id: i64,

    pub subject: String,
    pub title: String,
    pub deadline: NaiveDate,
    pub is_submitted: bool,

    pub priority: Priority,
    pub url: Option<String>,
    pub memo: Option<String>,
}

/// A row exactly as either store hands it back.
#[derive(Debug, Deserialize, sqlx::FromRow)]
pub struct AssignmentRow {
    pub id: i64,

    pub subject: String,
    pub title: String,
    pub deadline: String,
    pub is_submitted: bool,

    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = StoreError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let deadline = NaiveDate::parse_from_str(row.deadline.trim(), "%Y-%m-%d").map_err(|e| {
            StoreError::Decode(format!(
                "assignment {} has deadline `{}`: {e}",
                row.id, row.deadline
            ))
        })?;

        Ok(Self {
            id: row.id,
            subject: row.subject,
            title: row.title,
            deadline,
            is_submitted: row.is_submitted,
            priority: row
                .priority
                .as_deref()
                .map(Priority::from_stored)
                .unwrap_or_default(),
            url: non_blank(row.url),
            memo: non_blank(row.memo),
        })
    }
}

/// The insert payload. `is_submitted` is always false for new rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAssignment {
    pub subject: String,
    pub title: String,
    pub deadline: NaiveDate,
    pub is_submitted: bool,
    pub priority: Priority,
    pub url: Option<String>,
    pub memo: Option<String>,
}

impl NewAssignment {
    #[must_use]
    pub fn new(subject: impl Into<String>, title: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
            deadline,
            is_submitted: false,
            priority: Priority::default(),
            url: None,
            memo: None,
        }
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_blank(Some(url.into()));
        self
    }

    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = non_blank(Some(memo.into()));
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
