// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`DeviceApi`] for the Rubetek cloud.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, ParseError, ProtocolError};
use crate::protocol::{DeviceApi, LampChannels, LampPatch};

// ============================================================================
// CloudConfig - Connection parameters for one lamp
// ============================================================================

/// Configuration for reaching one lamp through the cloud.
///
/// # Examples
///
/// ```
/// use rubetek_light::protocol::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::new("12345", "lamp-abc")
///     .with_credentials("user@example.com", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.houses_url(), "https://ccc.rubetek.com/v2/houses");
/// assert_eq!(
///     config.parameters_url(),
///     "https://ccc.rubetek.com/projects/12345/devices/lamp-abc/parameters/"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    base_url: String,
    house_id: String,
    device_id: String,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl CloudConfig {
    /// Default cloud endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://ccc.rubetek.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given house and device.
    #[must_use]
    pub fn new(house_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            house_id: house_id.into(),
            device_id: device_id.into(),
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom cloud endpoint.
    ///
    /// A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the account credentials used for basic authentication.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the cloud endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the house identifier.
    #[must_use]
    pub fn house_id(&self) -> &str {
        &self.house_id
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the username, if credentials are set.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL listing every house of the account with its devices.
    #[must_use]
    pub fn houses_url(&self) -> String {
        format!("{}/v2/houses", self.base_url)
    }

    /// URL accepting parameter updates for the configured device.
    #[must_use]
    pub fn parameters_url(&self) -> String {
        format!(
            "{}/projects/{}/devices/{}/parameters/",
            self.base_url,
            urlencoding::encode(&self.house_id),
            urlencoding::encode(&self.device_id)
        )
    }

    /// Creates a `CloudClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not an HTTP(S) URL or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<CloudClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            houses_url: self.houses_url(),
            parameters_url: self.parameters_url(),
            client,
            house_id: self.house_id,
            device_id: self.device_id,
            credentials: self.credentials,
        })
    }
}

// ============================================================================
// CloudClient - HTTP transport
// ============================================================================

/// HTTP client for one lamp in the Rubetek cloud.
///
/// State is read from the account's house listing and written through the
/// device parameters endpoint, both with HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct CloudClient {
    client: Client,
    houses_url: String,
    parameters_url: String,
    house_id: String,
    device_id: String,
    credentials: Option<Credentials>,
}

/// Account credentials.
#[derive(Clone)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl CloudClient {
    /// Returns the house identifier.
    #[must_use]
    pub fn house_id(&self) -> &str {
        &self.house_id
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    fn lamp_channels(&self, body: &str) -> Result<LampChannels, Error> {
        let listing: HousesResponse = serde_json::from_str(body).map_err(ParseError::Json)?;

        let house = listing
            .houses
            .into_iter()
            .find(|house| id_matches(&house.id, &self.house_id))
            .ok_or_else(|| ProtocolError::HouseNotFound(self.house_id.clone()))?;

        let device = house
            .devices
            .into_iter()
            .find(|device| id_matches(&device.id, &self.device_id))
            .ok_or_else(|| ProtocolError::DeviceNotFound(self.device_id.clone()))?;

        Ok(device.current_state)
    }
}

impl DeviceApi for CloudClient {
    async fn fetch_state(&self) -> Result<LampChannels, Error> {
        tracing::debug!(url = %self.houses_url, "Fetching lamp state");

        let response = self
            .authorize(self.client.get(&self.houses_url))
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let response = check_status(response)?;

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(bytes = body.len(), "Received house listing");

        self.lamp_channels(&body)
    }

    async fn push_state(&self, patch: LampPatch) -> Result<(), Error> {
        tracing::debug!(url = %self.parameters_url, ?patch, "Pushing lamp parameters");

        let response = self
            .authorize(self.client.post(&self.parameters_url))
            .json(&patch)
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        check_status(response)?;

        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ProtocolError::AuthenticationFailed);
    }

    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response)
}

// House ids come back as numbers, device ids as strings; accept either.
fn id_matches(id: &Value, expected: &str) -> bool {
    match id {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct HousesResponse {
    #[serde(default)]
    houses: Vec<House>,
}

#[derive(Debug, Deserialize)]
struct House {
    id: Value,
    #[serde(default)]
    devices: Vec<CloudDevice>,
}

#[derive(Debug, Deserialize)]
struct CloudDevice {
    id: Value,
    #[serde(rename = "currentState", default)]
    current_state: LampChannels,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudClient {
        CloudConfig::new("42", "lamp-1").into_client().unwrap()
    }

    #[test]
    fn config_default_values() {
        let config = CloudConfig::new("42", "lamp-1");
        assert_eq!(config.base_url(), "https://ccc.rubetek.com");
        assert_eq!(config.house_id(), "42");
        assert_eq!(config.device_id(), "lamp-1");
        assert!(config.username().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_with_base_url_trims_slash() {
        let config = CloudConfig::new("42", "lamp-1").with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.houses_url(), "http://127.0.0.1:8080/v2/houses");
    }

    #[test]
    fn parameters_url_encodes_ids() {
        let config = CloudConfig::new("4 2", "lamp/1");
        assert_eq!(
            config.parameters_url(),
            "https://ccc.rubetek.com/projects/4%202/devices/lamp%2F1/parameters/"
        );
    }

    #[test]
    fn credentials_are_not_printed() {
        let config = CloudConfig::new("42", "lamp-1").with_credentials("admin", "hunter2");
        let printed = format!("{config:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CloudConfig::new("42", "lamp-1")
            .with_base_url("ccc.rubetek.com")
            .into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn id_matching() {
        assert!(id_matches(&serde_json::json!(42), "42"));
        assert!(id_matches(&serde_json::json!("lamp-1"), "lamp-1"));
        assert!(!id_matches(&serde_json::json!(43), "42"));
        assert!(!id_matches(&serde_json::json!(null), "42"));
    }

    #[test]
    fn lamp_channels_from_listing() {
        let body = serde_json::json!({
            "houses": [
                {"id": 7, "devices": [{"id": "lamp-1", "currentState": {"lamp:R[0]": 9}}]},
                {"id": 42, "devices": [
                    {"id": "other", "currentState": {}},
                    {"id": "lamp-1", "currentState": {"lamp:R[0]": 255, "lamp:on[0]": true}}
                ]}
            ]
        })
        .to_string();

        let channels = client().lamp_channels(&body).unwrap();
        assert_eq!(channels.red, Some(255));
        assert!(channels.is_on());
    }

    #[test]
    fn missing_house_and_device() {
        let body = serde_json::json!({"houses": [{"id": 1, "devices": []}]}).to_string();
        assert!(matches!(
            client().lamp_channels(&body),
            Err(Error::Protocol(ProtocolError::HouseNotFound(_)))
        ));

        let body = serde_json::json!({"houses": [{"id": 42, "devices": []}]}).to_string();
        assert!(matches!(
            client().lamp_channels(&body),
            Err(Error::Protocol(ProtocolError::DeviceNotFound(_)))
        ));
    }

    #[test]
    fn malformed_listing() {
        assert!(matches!(
            client().lamp_channels("not json"),
            Err(Error::Parse(ParseError::Json(_)))
        ));
    }
}
