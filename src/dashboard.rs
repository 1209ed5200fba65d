//! Derived view state for the dashboard page.
//!
//! Everything here is a pure function of the fetched rows and today's date;
//! nothing is cached between requests.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    filters::is_safe_link,
    models::{Assignment, Priority},
};

/// Deadline within this many days (inclusive) is highlighted.
pub const NEAR_DEADLINE_DAYS: i64 = 3;

#[must_use]
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Done,
    Overdue(i64),
    DueToday,
    DueIn(i64),
}

impl Status {
    #[must_use]
    pub const fn classify(is_submitted: bool, days_remaining: i64) -> Self {
        if is_submitted {
            Self::Done
        } else if days_remaining < 0 {
            Self::Overdue(days_remaining.abs())
        } else if days_remaining == 0 {
            Self::DueToday
        } else {
            Self::DueIn(days_remaining)
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Done => "Done".to_owned(),
            Self::Overdue(1) => "1 day overdue".to_owned(),
            Self::Overdue(days) => format!("{days} days overdue"),
            Self::DueToday => "Due today!".to_owned(),
            Self::DueIn(1) => "1 day left".to_owned(),
            Self::DueIn(days) => format!("{days} days left"),
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Done => "status-done",
            Self::Overdue(_) => "status-overdue",
            Self::DueToday => "status-today",
            Self::DueIn(_) => "status-upcoming",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => f.write_str("done"),
            Self::Overdue(days) => write!(f, "overdue({days})"),
            Self::DueToday => f.write_str("due-today"),
            Self::DueIn(days) => write!(f, "due-in({days})"),
        }
    }
}

/// How loudly the deadline text is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Near,
    Overdue,
}

impl Emphasis {
    #[must_use]
    pub const fn classify(is_submitted: bool, days_remaining: i64) -> Self {
        if is_submitted {
            Self::Plain
        } else if days_remaining < 0 {
            Self::Overdue
        } else if days_remaining <= NEAR_DEADLINE_DAYS {
            Self::Near
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Plain => "deadline",
            Self::Near => "deadline deadline-near",
            Self::Overdue => "deadline deadline-overdue",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Unsubmitted,
    Submitted,
}

impl Filter {
    pub const ALL: [Self; 3] = [Self::All, Self::Unsubmitted, Self::Submitted];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// For query strings and forms: a missing or unknown value shows everything.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().and_then(Self::parse).unwrap_or_default())
    }

    #[must_use]
    pub const fn admits(self, assignment: &Assignment) -> bool {
        match self {
            Self::All => true,
            Self::Unsubmitted => !assignment.is_submitted,
            Self::Submitted => assignment.is_submitted,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unsubmitted => "unsubmitted",
            Self::Submitted => "submitted",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unsubmitted => "Not submitted",
            Self::Submitted => "Submitted",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextDeadline {
    DaysLeft(i64),
    Overdue,
}

impl NextDeadline {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::DaysLeft(1) => "1 day left".to_owned(),
            Self::DaysLeft(days) => format!("{days} days left"),
            Self::Overdue => "Overdue".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub incomplete: usize,
    pub high_priority: usize,
    pub next_deadline: Option<NextDeadline>,
}

impl Summary {
    #[must_use]
    pub fn compute(assignments: &[Assignment], today: NaiveDate) -> Self {
        let incomplete: Vec<&Assignment> =
            assignments.iter().filter(|a| !a.is_submitted).collect();

        let high_priority = incomplete
            .iter()
            .filter(|a| a.priority == Priority::High)
            .count();

        let next_deadline = incomplete.iter().map(|a| a.deadline).min().map(|deadline| {
            match days_remaining(deadline, today) {
                days if days < 0 => NextDeadline::Overdue,
                days => NextDeadline::DaysLeft(days),
            }
        });

        Self {
            incomplete: incomplete.len(),
            high_priority,
            next_deadline,
        }
    }

    #[must_use]
    pub fn next_deadline_label(&self) -> String {
        self.next_deadline
            .as_ref()
            .map_or_else(|| "All clear".to_owned(), NextDeadline::label)
    }
}

#[derive(Clone, Debug)]
pub struct TaskCard {
    pub assignment: Assignment,
    pub status: Status,
    pub emphasis: Emphasis,
}

impl TaskCard {
    #[must_use]
    pub fn new(assignment: Assignment, today: NaiveDate) -> Self {
        let days_remaining = days_remaining(assignment.deadline, today);

        Self {
            status: Status::classify(assignment.is_submitted, days_remaining),
            emphasis: Emphasis::classify(assignment.is_submitted, days_remaining),
            assignment,
        }
    }

    /// The URL, when it is safe to put in an `href`.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.assignment
            .url
            .as_deref()
            .filter(|url| is_safe_link(url))
    }

    #[must_use]
    pub const fn has_details(&self) -> bool {
        self.assignment.url.is_some() || self.assignment.memo.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct DashboardView {
    pub summary: Summary,
    pub cards: Vec<TaskCard>,
    pub filter: Filter,
    pub total: usize,
}

impl DashboardView {
    /// Metrics cover every row; only the card list honours `filter`.
    #[must_use]
    pub fn build(assignments: Vec<Assignment>, filter: Filter, today: NaiveDate) -> Self {
        let summary = Summary::compute(&assignments, today);
        let total = assignments.len();

        let cards = assignments
            .into_iter()
            .filter(|a| filter.admits(a))
            .map(|a| TaskCard::new(a, today))
            .collect();

        Self {
            summary,
            cards,
            filter,
            total,
        }
    }
}
