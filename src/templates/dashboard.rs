use askama::Template;
use chrono::NaiveDate;

use crate::{
    dashboard::{DashboardView, Filter},
    filters,
    models::Priority,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Success,
}

impl BannerKind {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Error => "banner-error",
            Self::Success => "banner-success",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }
}

/// What the add form shows: blank after a successful submit, the rejected
/// input otherwise.
#[derive(Clone, Debug, Default)]
pub struct FormValues {
    pub subject: String,
    pub title: String,
    pub deadline: String,
    pub priority: Priority,
    pub url: String,
    pub memo: String,
}

impl FormValues {
    #[must_use]
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            deadline: today.to_string(),
            ..Self::default()
        }
    }
}

pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct PriorityOption {
    pub value: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardPage {
    pub view: DashboardView,
    pub banners: Vec<Banner>,
    pub form: FormValues,
    pub form_error: Option<String>,
    pub filter_options: Vec<FilterOption>,
    pub priorities: Vec<PriorityOption>,
}

impl DashboardPage {
    #[must_use]
    pub fn new(
        view: DashboardView,
        banners: Vec<Banner>,
        form: FormValues,
        form_error: Option<String>,
    ) -> Self {
        let filter_options = Filter::ALL
            .into_iter()
            .map(|filter| FilterOption {
                value: filter.as_str(),
                label: filter.label(),
                selected: filter == view.filter,
            })
            .collect();

        let priorities = Priority::ALL
            .into_iter()
            .map(|priority| PriorityOption {
                value: priority.as_str(),
                label: priority.label(),
                glyph: priority.glyph(),
                selected: priority == form.priority,
            })
            .collect();

        Self {
            view,
            banners,
            form,
            form_error,
            filter_options,
            priorities,
        }
    }
}
