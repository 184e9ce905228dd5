// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The lightbulb accessory.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::accessory::LightVariant;
use crate::capabilities::{Characteristic, CharacteristicHandler, CharacteristicValue};
use crate::coalescer::{FlushWrite, WriteCoalescer};
use crate::error::Result;
use crate::protocol::{DeviceApi, LampChannels, LampPatch};
use crate::state::{DeviceState, StateCache, StateChange};
use crate::types::{Brightness, HueSaturation, RgbColor, RgbwColor};

/// Static accessory information shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    /// Manufacturer name.
    pub manufacturer: &'static str,
    /// Model name.
    pub model: &'static str,
    /// Display name of the accessory.
    pub name: String,
}

/// A cloud lamp exposed as a lightbulb service.
///
/// Reads are answered from a cache that is refreshed from the cloud once it
/// is older than the configured TTL. On and brightness writes go out
/// immediately; hue and saturation writes are coalesced so that dragging a
/// color wheel results in a single color write.
///
/// The accessory must be used from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use rubetek_light::accessory::{AccessoryConfig, LightAccessory};
///
/// # async fn example() -> rubetek_light::Result<()> {
/// let config = AccessoryConfig::new("Desk lamp", "12345", "lamp-abc")
///     .with_credentials("user@example.com", "secret");
/// let lamp = LightAccessory::from_config(&config)?;
///
/// lamp.set_on(true).await?;
/// lamp.set_hue(120.0).await?;
/// println!("brightness: {}", lamp.brightness().await?);
/// # Ok(())
/// # }
/// ```
pub struct LightAccessory<A: DeviceApi> {
    name: String,
    variant: LightVariant,
    ttl: Duration,
    api: Arc<A>,
    cache: Mutex<StateCache>,
    colors: WriteCoalescer<HueSaturation, ColorWriter<A>>,
}

impl<A: DeviceApi> LightAccessory<A> {
    /// Creates an accessory with the variant's default timing.
    #[must_use]
    pub fn new(name: impl Into<String>, api: A, variant: LightVariant) -> Self {
        Self::with_timing(
            name,
            api,
            variant,
            variant.cache_ttl(),
            variant.write_delay(),
        )
    }

    /// Creates an accessory with explicit cache TTL and color write delay.
    #[must_use]
    pub fn with_timing(
        name: impl Into<String>,
        api: A,
        variant: LightVariant,
        ttl: Duration,
        write_delay: Duration,
    ) -> Self {
        let name = name.into();
        let api = Arc::new(api);
        let writer = Arc::new(ColorWriter {
            api: Arc::clone(&api),
            variant,
        });

        tracing::info!(
            name = %name,
            %variant,
            ?ttl,
            ?write_delay,
            "Created light accessory"
        );

        Self {
            name,
            variant,
            ttl,
            api,
            cache: Mutex::new(StateCache::new()),
            colors: WriteCoalescer::new(writer, write_delay),
        }
    }

    /// Returns the accessory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lamp variant.
    #[must_use]
    pub fn variant(&self) -> LightVariant {
        self.variant
    }

    /// Returns the cache freshness window.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the transport.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the cached state without contacting the cloud.
    #[must_use]
    pub fn cached_state(&self) -> DeviceState {
        *self.cache.lock().state()
    }

    /// Returns `true` while a color write waits for its quiet period.
    #[must_use]
    pub fn has_pending_color_write(&self) -> bool {
        self.colors.is_pending()
    }

    /// Returns `true` while a color write waits or is being sent.
    #[must_use]
    pub fn has_color_write_in_progress(&self) -> bool {
        self.colors.is_busy()
    }

    /// Fetches the lamp state from the cloud and stores it in the cache.
    ///
    /// While a color write is pending or being sent, the locally written hue
    /// and saturation are kept instead of the fetched ones. This also holds
    /// when the write was still in progress as the fetch started, since the
    /// fetched color may predate it.
    ///
    /// # Errors
    ///
    /// Returns error if the fetch fails; the cache is left untouched.
    pub async fn refresh(&self) -> Result<DeviceState> {
        let color_write_before = self.colors.is_busy();
        let channels = self.api.fetch_state().await?;
        let mut state = decode(self.variant, &channels);

        {
            let mut cache = self.cache.lock();
            if color_write_before || self.colors.is_busy() {
                state.set_color(cache.state().color());
            }
            cache.refresh(state, Instant::now());
        }

        tracing::debug!(
            name = %self.name,
            on = state.is_on(),
            color = %state.color(),
            brightness = %state.brightness(),
            "Refreshed lamp state"
        );

        Ok(state)
    }

    /// Returns the state, refreshing it first if the cache is stale.
    ///
    /// # Errors
    ///
    /// Returns error if a needed refresh fails.
    pub async fn state(&self) -> Result<DeviceState> {
        let expired = self.cache.lock().is_expired(Instant::now(), self.ttl);
        if expired {
            return self.refresh().await;
        }
        Ok(self.cached_state())
    }

    /// Logs an identify request.
    ///
    /// The lamp has no identify routine of its own.
    pub fn identify(&self) {
        tracing::info!(name = %self.name, "Identify requested");
    }

    /// Returns the accessory information.
    #[must_use]
    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            manufacturer: "Rubetek",
            model: "Lightbulb",
            name: self.name.clone(),
        }
    }

    // ========== Typed accessors ==========

    /// Returns whether the lamp is on.
    ///
    /// # Errors
    ///
    /// Returns error if a needed refresh fails.
    pub async fn on(&self) -> Result<bool> {
        Ok(self.state().await?.is_on())
    }

    /// Switches the lamp on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the device write fails.
    pub async fn set_on(&self, on: bool) -> Result<()> {
        self.write(Characteristic::On, on.into()).await
    }

    /// Returns the hue in degrees.
    ///
    /// # Errors
    ///
    /// Returns error if a needed refresh fails.
    pub async fn hue(&self) -> Result<f64> {
        Ok(self.state().await?.hue())
    }

    /// Sets the hue in degrees; the write is coalesced.
    ///
    /// # Errors
    ///
    /// Returns error if `hue` is not finite.
    pub async fn set_hue(&self, hue: f64) -> Result<()> {
        self.write(Characteristic::Hue, hue.into()).await
    }

    /// Returns the saturation in percent.
    ///
    /// # Errors
    ///
    /// Returns error if a needed refresh fails.
    pub async fn saturation(&self) -> Result<f64> {
        Ok(self.state().await?.saturation())
    }

    /// Sets the saturation in percent; the write is coalesced.
    ///
    /// # Errors
    ///
    /// Returns error if `saturation` is not finite.
    pub async fn set_saturation(&self, saturation: f64) -> Result<()> {
        self.write(Characteristic::Saturation, saturation.into()).await
    }

    /// Returns the brightness.
    ///
    /// # Errors
    ///
    /// Returns error if a needed refresh fails.
    pub async fn brightness(&self) -> Result<Brightness> {
        Ok(self.state().await?.brightness())
    }

    /// Sets the brightness.
    ///
    /// # Errors
    ///
    /// Returns error if the device write fails.
    pub async fn set_brightness(&self, brightness: Brightness) -> Result<()> {
        self.write(Characteristic::Brightness, brightness.value().into())
            .await
    }
}

#[cfg(feature = "http")]
impl LightAccessory<crate::protocol::CloudClient> {
    /// Creates an accessory talking to the Rubetek cloud.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn from_config(config: &crate::accessory::AccessoryConfig) -> Result<Self> {
        config.validate()?;
        let client = config.cloud_config().into_client()?;
        tracing::debug!(
            name = %config.name,
            house = client.house_id(),
            device = client.device_id(),
            "Binding accessory to cloud device"
        );

        Ok(Self::with_timing(
            config.name.clone(),
            client,
            config.variant,
            config.cache_ttl(),
            config.write_delay(),
        ))
    }
}

impl<A: DeviceApi> CharacteristicHandler for LightAccessory<A> {
    async fn read(&self, characteristic: Characteristic) -> Result<CharacteristicValue> {
        let state = self.state().await?;
        Ok(match characteristic {
            Characteristic::On => state.is_on().into(),
            Characteristic::Hue => state.hue().into(),
            Characteristic::Saturation => state.saturation().into(),
            Characteristic::Brightness => f64::from(state.brightness().value()).into(),
        })
    }

    async fn write(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<()> {
        tracing::debug!(name = %self.name, %characteristic, ?value, "Characteristic write");

        let change = StateChange::from_write(characteristic, value)?;
        let color = {
            let mut cache = self.cache.lock();
            cache.apply(&change);
            cache.state().color()
        };

        match change {
            StateChange::Power(on) => self.api.push_state(LampPatch::power(on)).await,
            StateChange::Brightness(brightness) => {
                self.api.push_state(LampPatch::brightness(brightness)).await
            }
            StateChange::Hue(_) | StateChange::Saturation(_) => {
                self.colors.schedule(color);
                Ok(())
            }
        }
    }
}

impl<A: DeviceApi> fmt::Debug for LightAccessory<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightAccessory")
            .field("name", &self.name)
            .field("variant", &self.variant)
            .field("ttl", &self.ttl)
            .field("state", &self.cached_state())
            .finish_non_exhaustive()
    }
}

/// Sends coalesced colors to the lamp.
struct ColorWriter<A> {
    api: Arc<A>,
    variant: LightVariant,
}

impl<A: DeviceApi> FlushWrite<HueSaturation> for ColorWriter<A> {
    async fn flush(&self, color: HueSaturation) -> Result<()> {
        let patch = encode(self.variant, &color);
        tracing::debug!(%color, ?patch, "Writing lamp color");
        self.api.push_state(patch).await
    }
}

impl<A> fmt::Debug for ColorWriter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorWriter")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

fn decode(variant: LightVariant, channels: &LampChannels) -> DeviceState {
    let color = match variant {
        LightVariant::Rgb => channels.rgb().to_hue_saturation(),
        LightVariant::Rgbw => channels.rgbw().to_hue_saturation(),
    };
    DeviceState::from_parts(channels.is_on(), color, channels.brightness())
}

fn encode(variant: LightVariant, color: &HueSaturation) -> LampPatch {
    match variant {
        LightVariant::Rgb => LampPatch::rgb(RgbColor::from_hue_saturation(color)),
        LightVariant::Rgbw => LampPatch::rgbw(RgbwColor::from_hue_saturation(color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rgb_red() {
        let channels = LampChannels {
            on: Some(true),
            brightness: Some(70),
            red: Some(255),
            ..LampChannels::default()
        };
        let state = decode(LightVariant::Rgb, &channels);

        assert!(state.is_on());
        assert_eq!(state.brightness().value(), 70);
        assert!(state.hue().abs() < 1e-9);
        assert!((state.saturation() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn decode_rgbw_gray_is_unsaturated() {
        let channels = LampChannels {
            red: Some(128),
            green: Some(128),
            blue: Some(128),
            white: Some(0),
            ..LampChannels::default()
        };
        let state = decode(LightVariant::Rgbw, &channels);

        assert!(state.hue().abs() < 1e-9);
        assert!(state.saturation().abs() < 1e-9);
        assert!(!state.is_on());
    }

    #[test]
    fn encode_rgb_uses_half_value() {
        let patch = encode(LightVariant::Rgb, &HueSaturation::new(0.0, 100.0));
        assert_eq!(patch, LampPatch::rgb(RgbColor::new(127, 0, 0)));
        assert!(patch.white.is_none());
    }

    #[test]
    fn encode_rgbw_sets_white() {
        let patch = encode(LightVariant::Rgbw, &HueSaturation::new(0.0, 0.0));
        assert_eq!(patch.red, Some(0));
        assert_eq!(patch.green, Some(0));
        assert_eq!(patch.blue, Some(0));
        assert!(patch.white.is_some_and(|w| w > 0));
    }
}
