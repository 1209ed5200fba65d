mod dashboard;

pub use dashboard::{Banner, DashboardPage, FormValues};
