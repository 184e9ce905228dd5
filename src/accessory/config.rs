// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, ParseError, ValueError};

/// Lamp hardware flavour, selecting the color model and timing defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightVariant {
    /// Three color channels, colors encoded through HSV.
    #[default]
    Rgb,
    /// Three color channels plus white, colors encoded through HSL.
    Rgbw,
}

impl LightVariant {
    /// Default freshness window of the cached state.
    #[must_use]
    pub const fn cache_ttl(self) -> Duration {
        match self {
            Self::Rgb => Duration::from_secs(5 * 60),
            Self::Rgbw => Duration::from_secs(15),
        }
    }

    /// Default quiet period before a color write is sent.
    #[must_use]
    pub const fn write_delay(self) -> Duration {
        match self {
            Self::Rgb => Duration::from_millis(300),
            Self::Rgbw => Duration::from_millis(400),
        }
    }

    /// Returns the variant name used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rgbw => "rgbw",
        }
    }
}

impl fmt::Display for LightVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightVariant {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "rgbw" => Ok(Self::Rgbw),
            other => Err(ValueError::UnknownVariant(other.to_string())),
        }
    }
}

/// Configuration of one lamp accessory, as found in the host's accessory
/// list.
///
/// # Examples
///
/// ```
/// use rubetek_light::accessory::{AccessoryConfig, LightVariant};
///
/// let config = AccessoryConfig::from_json(r#"{
///     "name": "Desk lamp",
///     "houseID": 12345,
///     "deviceID": "lamp-abc",
///     "username": "user@example.com",
///     "password": "secret",
///     "variant": "rgbw"
/// }"#).unwrap();
///
/// assert_eq!(config.house_id, "12345");
/// assert_eq!(config.variant, LightVariant::Rgbw);
/// assert_eq!(config.cache_ttl(), std::time::Duration::from_secs(15));
/// ```
#[derive(Clone, Deserialize)]
pub struct AccessoryConfig {
    /// Display name of the accessory.
    pub name: String,
    /// Identifier of the house the lamp belongs to.
    #[serde(rename = "houseID", deserialize_with = "string_or_number")]
    pub house_id: String,
    /// Identifier of the lamp in the cloud.
    #[serde(rename = "deviceID", deserialize_with = "string_or_number")]
    pub device_id: String,
    /// Cloud account username.
    #[serde(default)]
    pub username: String,
    /// Cloud account password.
    #[serde(default)]
    pub password: String,
    /// Lamp hardware flavour.
    #[serde(default)]
    pub variant: LightVariant,
    /// Custom cloud endpoint.
    #[serde(rename = "baseUrl", default)]
    pub base_url: Option<String>,
    /// Cache freshness override, in milliseconds.
    #[serde(rename = "cacheTtlMs", default)]
    pub cache_ttl_ms: Option<u64>,
    /// Color write quiet period override, in milliseconds.
    #[serde(rename = "writeDelayMs", default)]
    pub write_delay_ms: Option<u64>,
}

impl AccessoryConfig {
    /// Creates a configuration for an RGB lamp without credentials.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        house_id: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            house_id: house_id.into(),
            device_id: device_id.into(),
            username: String::new(),
            password: String::new(),
            variant: LightVariant::default(),
            base_url: None,
            cache_ttl_ms: None,
            write_delay_ms: None,
        }
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a required field is empty.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).map_err(ParseError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the account credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the lamp variant.
    #[must_use]
    pub fn with_variant(mut self, variant: LightVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets a custom cloud endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the cache freshness window.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_ms = Some(duration_millis(ttl));
        self
    }

    /// Overrides the color write quiet period.
    #[must_use]
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay_ms = Some(duration_millis(delay));
        self
    }

    /// Returns the effective cache freshness window.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_ms
            .map_or_else(|| self.variant.cache_ttl(), Duration::from_millis)
    }

    /// Returns the effective color write quiet period.
    #[must_use]
    pub fn write_delay(&self) -> Duration {
        self.write_delay_ms
            .map_or_else(|| self.variant.write_delay(), Duration::from_millis)
    }

    /// Checks that the identifiers are present.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first empty field.
    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("name", &self.name),
            ("houseID", &self.house_id),
            ("deviceID", &self.device_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Builds the transport configuration for this accessory.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn cloud_config(&self) -> crate::protocol::CloudConfig {
        let mut config = crate::protocol::CloudConfig::new(&self.house_id, &self.device_id);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if !self.username.is_empty() {
            config = config.with_credentials(&self.username, &self.password);
        }
        config
    }
}

impl fmt::Debug for AccessoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessoryConfig")
            .field("name", &self.name)
            .field("house_id", &self.house_id)
            .field("device_id", &self.device_id)
            .field("username", &self.username)
            .field("password", &"***")
            .field("variant", &self.variant)
            .field("base_url", &self.base_url)
            .field("cache_ttl_ms", &self.cache_ttl_ms)
            .field("write_delay_ms", &self.write_delay_ms)
            .finish()
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// Host UIs store numeric ids as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
    }
}
