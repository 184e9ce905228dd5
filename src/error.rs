// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `rubetek_light` library.
//!
//! Failures are grouped by origin: characteristic value validation, cloud
//! communication, JSON parsing, and configuration. None of them is fatal;
//! every failure is scoped to the single read or write that produced it.

use thiserror::Error;

use crate::capabilities::Characteristic;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A characteristic value was rejected.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Communication with the vendor cloud failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A cloud response could not be understood.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The accessory configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors related to characteristic values written by the host.
///
/// Numeric values outside the characteristic range are clamped rather than
/// rejected; only values that cannot be interpreted at all end up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value has the wrong type for the characteristic.
    #[error("{characteristic} expects a {expected} value")]
    TypeMismatch {
        /// The characteristic that was written.
        characteristic: Characteristic,
        /// Human readable name of the expected type.
        expected: &'static str,
    },

    /// A numeric value was NaN or infinite.
    #[error("{characteristic} value is not a finite number")]
    NotFinite {
        /// The characteristic that was written.
        characteristic: Characteristic,
    },

    /// An unknown light variant name was provided.
    #[error("unknown light variant: {0}")]
    UnknownVariant(String),
}

/// Errors related to communication with the vendor cloud.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The cloud answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The cloud rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The configured house is not part of the account.
    #[error("house {0} not found")]
    HouseNotFound(String),

    /// The configured device is not part of the house.
    #[error("device {0} not found")]
    DeviceNotFound(String),
}

/// Errors related to parsing cloud responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
