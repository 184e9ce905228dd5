// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Staleness-tracked cache of the lamp state.

use std::time::Duration;

use tokio::time::Instant;

use super::{DeviceState, StateChange};

/// Cached [`DeviceState`] with the instant of its last full refresh.
///
/// Only [`refresh`](Self::refresh) advances the refresh instant. Partial
/// writes through [`apply`](Self::apply) leave it untouched: writing one
/// field says nothing about the freshness of the others.
///
/// A cache that was never refreshed is always expired.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rubetek_light::state::{DeviceState, StateCache};
/// use tokio::time::Instant;
///
/// let mut cache = StateCache::new();
/// let now = Instant::now();
/// assert!(cache.is_expired(now, Duration::from_secs(15)));
///
/// cache.refresh(DeviceState::new(), now);
/// assert!(!cache.is_expired(now, Duration::from_secs(15)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateCache {
    state: DeviceState,
    last_updated: Option<Instant>,
}

impl StateCache {
    /// Creates an empty, expired cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the instant of the last refresh, if any.
    #[must_use]
    pub fn last_updated(&self) -> Option<Instant> {
        self.last_updated
    }

    /// Returns `true` when more than `ttl` has passed since the last refresh.
    ///
    /// An age of exactly `ttl` is still fresh.
    #[must_use]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        match self.last_updated {
            Some(updated) => now.saturating_duration_since(updated) > ttl,
            None => true,
        }
    }

    /// Replaces the whole cached state and marks it fresh as of `now`.
    pub fn refresh(&mut self, state: DeviceState, now: Instant) {
        self.state = state;
        self.last_updated = Some(now);
    }

    /// Applies a partial change without touching the refresh instant.
    pub fn apply(&mut self, change: &StateChange) {
        self.state.apply(change);
    }
}
