//! HTTP remote source: `GET <base>/users`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use roster_engine::{Error, Record, Result};

use super::RemoteSource;
use crate::error::ClientError;

/// Path of the collection, relative to the base URL.
const USERS_PATH: &str = "users";

/// Fetches records as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Create a source for `<base_url>/users`.
    ///
    /// The base is resolved like a browser would: `http://host/api/v1/` yields
    /// `http://host/api/v1/users`, while `http://host/api/v1` yields
    /// `http://host/api/users`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> crate::Result<Self> {
        let url = Url::parse(base_url)
            .and_then(|base| base.join(USERS_PATH))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// The resolved collection URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn unavailable(e: reqwest::Error) -> Error {
    Error::SourceUnavailable(e.to_string())
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<Record>> {
        tracing::debug!(url = %self.url, "Fetching records from remote");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(unavailable)?;

        let records = response.json::<Vec<Record>>().await.map_err(|e| {
            if e.is_decode() {
                Error::MalformedRecord(e.to_string())
            } else {
                unavailable(e)
            }
        })?;

        tracing::debug!(count = records.len(), "Fetched records from remote");
        Ok(records)
    }
}
