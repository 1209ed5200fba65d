use std::fmt;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{ConfigurationError, Error, StoreError},
    models::{Assignment, AssignmentRow, NewAssignment},
    store::TABLE,
};

/// Client for a PostgREST endpoint exposing the `assignments` table, as
/// served by Supabase under `/rest/v1`.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    endpoint: Url,
    key: String,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

impl RestStore {
    pub fn new(base_url: Url, key: String) -> Result<Self, Error> {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let endpoint =
            base_url
                .join(&format!("rest/v1/{TABLE}"))
                .map_err(|e| ConfigurationError::InvalidUrl {
                    name: "SUPABASE_URL",
                    reason: e.to_string(),
                })?;

        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(StoreError::from)?;

        Ok(Self {
            client,
            endpoint,
            key,
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(PostgrestError {
                message,
                hint: Some(hint),
            }) if !hint.is_empty() => format!("{message} ({hint})"),
            Ok(PostgrestError { message, .. }) => message,
            Err(_) => body,
        };

        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, StoreError> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await?;

        let rows: Vec<AssignmentRow> = Self::check(response).await?.json().await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_owned()))?
            .try_into()
    }

    pub async fn list_all(&self) -> Result<Vec<Assignment>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "deadline.asc,id.asc")])
            .send()
            .await?;

        let rows: Vec<AssignmentRow> = Self::check(response).await?.json().await?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    pub async fn set_submitted(&self, id: i64, value: bool) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&json!({ "is_submitted": value }))
            .send()
            .await?;

        let updated: Vec<Value> = Self::check(response).await?.json().await?;

        if updated.is_empty() {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_under_rest_v1() {
        let store = RestStore::new(
            Url::parse("https://abc.supabase.co").unwrap(),
            "key".to_owned(),
        )
        .unwrap();

        assert_eq!(
            store.endpoint().as_str(),
            "https://abc.supabase.co/rest/v1/assignments"
        );
    }

    #[test]
    fn endpoint_keeps_a_path_prefix() {
        let store = RestStore::new(
            Url::parse("http://localhost:54321/proxy").unwrap(),
            "key".to_owned(),
        )
        .unwrap();

        assert_eq!(
            store.endpoint().as_str(),
            "http://localhost:54321/proxy/rest/v1/assignments"
        );
    }

    #[test]
    fn debug_output_hides_the_key() {
        let store = RestStore::new(
            Url::parse("https://abc.supabase.co").unwrap(),
            "very-secret".to_owned(),
        )
        .unwrap();

        assert!(!format!("{store:?}").contains("very-secret"));
    }
}
