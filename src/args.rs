use clap::{Parser, ValueEnum};
use reqwest::Url;

use crate::error::ConfigurationError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Hosted PostgREST table (Supabase)
    #[default]
    Rest,
    /// Local SQLite database
    Sqlite,
}

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Assignment deadline dashboard")]
pub struct DashboardArgs {
    /// Address to listen on
    #[clap(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port
    #[clap(long, env = "DASHBOARD_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Where assignments are kept
    #[clap(long, env = "DASHBOARD_STORE", value_enum, default_value_t = StoreBackend::Rest)]
    pub store: StoreBackend,

    /// Project URL of the hosted table
    #[clap(long, env = "SUPABASE_URL", hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// API key of the hosted table
    #[clap(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// SQLite connection string, used with `--store sqlite`
    #[clap(long, env = "DASHBOARD_DATABASE", default_value = "sqlite:assignments.db")]
    pub database: String,
}

impl DashboardArgs {
    /// Both secrets of the hosted table, or the first one that is missing.
    pub fn rest_credentials(&self) -> Result<(Url, String), ConfigurationError> {
        let url = self
            .supabase_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigurationError::MissingSecret("SUPABASE_URL"))?;

        let key = self
            .supabase_key
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigurationError::MissingSecret("SUPABASE_KEY"))?;

        let url = Url::parse(url).map_err(|e| ConfigurationError::InvalidUrl {
            name: "SUPABASE_URL",
            reason: e.to_string(),
        })?;

        Ok((url, key.to_owned()))
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
