// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed view of the cloud's string-keyed lamp channels.
//!
//! The cloud exposes lamp parameters as a flat map keyed like `"lamp:R[0]"`.
//! Those keys appear only in the serde attributes below; the rest of the
//! crate works with [`LampChannels`] and [`LampPatch`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::{Brightness, RgbColor, RgbwColor};

/// Snapshot of the lamp channels as reported by the cloud.
///
/// Every channel is optional. Missing or malformed values decode as `None`
/// and read as zero (or off) through the accessor methods.
///
/// # Examples
///
/// ```
/// use rubetek_light::protocol::LampChannels;
/// use rubetek_light::types::RgbColor;
///
/// let channels: LampChannels = serde_json::from_str(
///     r#"{"lamp:R[0]": 255, "lamp:on[0]": true, "lamp:brightness[0]": 80}"#,
/// ).unwrap();
///
/// assert!(channels.is_on());
/// assert_eq!(channels.brightness().value(), 80);
/// assert_eq!(channels.rgb(), RgbColor::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LampChannels {
    /// Power flag.
    #[serde(rename = "lamp:on[0]", default, deserialize_with = "lenient_flag")]
    pub on: Option<bool>,

    /// Brightness level (0-100).
    #[serde(
        rename = "lamp:brightness[0]",
        default,
        deserialize_with = "lenient_channel"
    )]
    pub brightness: Option<u8>,

    /// Red channel.
    #[serde(rename = "lamp:R[0]", default, deserialize_with = "lenient_channel")]
    pub red: Option<u8>,

    /// Green channel.
    #[serde(rename = "lamp:G[0]", default, deserialize_with = "lenient_channel")]
    pub green: Option<u8>,

    /// Blue channel.
    #[serde(rename = "lamp:B[0]", default, deserialize_with = "lenient_channel")]
    pub blue: Option<u8>,

    /// White channel, only present on RGBW lamps.
    #[serde(rename = "lamp:W[0]", default, deserialize_with = "lenient_channel")]
    pub white: Option<u8>,
}

impl LampChannels {
    /// Returns whether the lamp is on; missing means off.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on.unwrap_or(false)
    }

    /// Returns the brightness, clamped to 0-100; missing means 0.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        Brightness::clamped(self.brightness.unwrap_or(0))
    }

    /// Returns the RGB channels; missing channels are 0.
    #[must_use]
    pub fn rgb(&self) -> RgbColor {
        RgbColor::new(
            self.red.unwrap_or(0),
            self.green.unwrap_or(0),
            self.blue.unwrap_or(0),
        )
    }

    /// Returns the RGBW channels; missing channels are 0.
    #[must_use]
    pub fn rgbw(&self) -> RgbwColor {
        RgbwColor::new(
            self.red.unwrap_or(0),
            self.green.unwrap_or(0),
            self.blue.unwrap_or(0),
            self.white.unwrap_or(0),
        )
    }
}

/// Partial update of the lamp channels.
///
/// Only the fields that are set are serialized, so a patch never overwrites
/// channels it does not mention.
///
/// # Examples
///
/// ```
/// use rubetek_light::protocol::LampPatch;
///
/// let patch = LampPatch::power(true);
/// assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"lamp:on[0]":true}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LampPatch {
    /// Power flag.
    #[serde(rename = "lamp:on[0]", skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,

    /// Brightness level (0-100).
    #[serde(rename = "lamp:brightness[0]", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,

    /// Red channel.
    #[serde(rename = "lamp:R[0]", skip_serializing_if = "Option::is_none")]
    pub red: Option<u8>,

    /// Green channel.
    #[serde(rename = "lamp:G[0]", skip_serializing_if = "Option::is_none")]
    pub green: Option<u8>,

    /// Blue channel.
    #[serde(rename = "lamp:B[0]", skip_serializing_if = "Option::is_none")]
    pub blue: Option<u8>,

    /// White channel.
    #[serde(rename = "lamp:W[0]", skip_serializing_if = "Option::is_none")]
    pub white: Option<u8>,
}

impl LampPatch {
    /// Creates a patch switching the lamp on or off.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            ..Self::default()
        }
    }

    /// Creates a patch setting the brightness.
    #[must_use]
    pub fn brightness(brightness: Brightness) -> Self {
        Self {
            brightness: Some(brightness.value()),
            ..Self::default()
        }
    }

    /// Creates a patch setting the three color channels.
    #[must_use]
    pub fn rgb(color: RgbColor) -> Self {
        Self {
            red: Some(color.red()),
            green: Some(color.green()),
            blue: Some(color.blue()),
            ..Self::default()
        }
    }

    /// Creates a patch setting the color and white channels.
    #[must_use]
    pub fn rgbw(color: RgbwColor) -> Self {
        Self {
            red: Some(color.red()),
            green: Some(color.green()),
            blue: Some(color.blue()),
            white: Some(color.white()),
            ..Self::default()
        }
    }
}

// Channel values are integers in practice, but tolerate floats, numeric
// strings and out-of-range numbers rather than failing the whole snapshot.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::unnecessary_wraps
)]
fn lenient_channel<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite())
        .map(|n| n.floor().clamp(0.0, 255.0) as u8))
}

#[allow(clippy::unnecessary_wraps)]
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
