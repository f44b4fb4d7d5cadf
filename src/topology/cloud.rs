// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot topology fetch from the cloud account API.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::{Error, ProtocolError};

use super::Topology;

/// Configuration for the cloud API client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartwindow_lib::topology::CloudConfig;
///
/// let config = CloudConfig::new()
///     .with_url("http://127.0.0.1:8080/buildings")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.url(), "http://127.0.0.1:8080/buildings");
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    url: String,
    timeout: Duration,
}

impl CloudConfig {
    /// Buildings endpoint of the production API.
    pub const DEFAULT_URL: &'static str =
        "https://www.mysmartwindow.com:33332/hope/v3/users/buildings";

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a configuration for the production API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: Self::DEFAULT_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the buildings endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the buildings endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Http` if the HTTP client cannot be built.
    pub fn into_client(self) -> Result<CloudClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            url: self.url,
            client,
        })
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the cloud buildings endpoint.
#[derive(Debug, Clone)]
pub struct CloudClient {
    url: String,
    client: Client,
}

impl CloudClient {
    /// Fetches the account topology using `token`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::AuthenticationFailed` if the token is
    /// rejected, `ProtocolError::UnexpectedStatus` for other non-success
    /// statuses, `ProtocolError::Http` on transport failure, or a
    /// `TopologyError` if the body is not a usable topology.
    pub async fn fetch_topology(&self, token: &str) -> Result<Topology, Error> {
        tracing::debug!(url = %self.url, "Fetching topology");

        let response = self
            .client
            .get(&self.url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!(url = %self.url, "Cloud rejected the account token");
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus(status.as_u16()).into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        let topology = Topology::from_json(&body)?;

        tracing::info!(buildings = topology.buildings().len(), "Fetched topology");
        Ok(topology)
    }
}
