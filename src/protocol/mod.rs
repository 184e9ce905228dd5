// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the vendor cloud.
//!
//! The accessory talks to the lamp only through the [`DeviceApi`] trait:
//! one call to read every channel, one call to write a subset of them.
//!
//! # Implementations
//!
//! - [`CloudClient`]: HTTP client for the Rubetek cloud (feature `http`)
//!
//! Tests and alternative transports can provide their own implementation.

mod channels;
#[cfg(feature = "http")]
mod http;

pub use channels::{LampChannels, LampPatch};
#[cfg(feature = "http")]
pub use http::{CloudClient, CloudConfig, Credentials};

use std::future::Future;

use crate::error::Error;

/// Transport to the lamp.
///
/// Calls are single best-effort attempts: implementations report failures
/// and never retry on their own.
pub trait DeviceApi: Send + Sync + 'static {
    /// Reads the current value of every lamp channel.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    fn fetch_state(&self) -> impl Future<Output = Result<LampChannels, Error>> + Send;

    /// Writes the channels set in `patch`, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn push_state(&self, patch: LampPatch) -> impl Future<Output = Result<(), Error>> + Send;
}
