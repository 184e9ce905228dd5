// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rubetek_light` - Expose a Rubetek cloud lamp as a Hue/Saturation light.
//!
//! Home-automation hosts describe lights with four characteristics: On, Hue
//! (degrees), Saturation (percent) and Brightness (percent). The Rubetek
//! cloud only knows raw color channels. This library sits in between:
//!
//! - **Color conversion**: RGB to and from HSV and HSL, RGB to and from RGBW
//! - **Read cache**: device state is fetched at most once per TTL
//! - **Write coalescing**: bursts of hue/saturation writes become one write
//! - **Cloud transport**: HTTP client for the vendor API (feature `http`)
//!
//! # Supported Lamps
//!
//! - RGB lamps: colors encoded through HSV at half value
//! - RGBW lamps: colors encoded through HSL at half lightness, with the gray
//!   component moved to the white channel
//!
//! # Quick Start
//!
//! ```no_run
//! use rubetek_light::{AccessoryConfig, Characteristic, CharacteristicHandler, LightAccessory};
//!
//! #[tokio::main]
//! async fn main() -> rubetek_light::Result<()> {
//!     let config = AccessoryConfig::from_json(r#"{
//!         "name": "Desk lamp",
//!         "houseID": 12345,
//!         "deviceID": "lamp-abc",
//!         "username": "user@example.com",
//!         "password": "secret",
//!         "variant": "rgbw"
//!     }"#)?;
//!     let lamp = LightAccessory::from_config(&config)?;
//!
//!     // Generic characteristic access, as a host would do it
//!     lamp.write(Characteristic::On, true.into()).await?;
//!     let hue = lamp.read(Characteristic::Hue).await?;
//!     println!("hue: {hue:?}");
//!
//!     // Typed helpers
//!     lamp.set_saturation(80.0).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Custom Transports
//!
//! Anything implementing [`protocol::DeviceApi`] can back an accessory,
//! which is how the tests run without network access:
//!
//! ```
//! use rubetek_light::protocol::{DeviceApi, LampChannels, LampPatch};
//! use rubetek_light::{LightAccessory, LightVariant};
//!
//! struct AlwaysRed;
//!
//! impl DeviceApi for AlwaysRed {
//!     async fn fetch_state(&self) -> rubetek_light::Result<LampChannels> {
//!         Ok(LampChannels { red: Some(255), ..LampChannels::default() })
//!     }
//!
//!     async fn push_state(&self, _patch: LampPatch) -> rubetek_light::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rubetek_light::Result<()> {
//! let lamp = LightAccessory::new("Test", AlwaysRed, LightVariant::Rgb);
//! assert_eq!(lamp.hue().await?, 0.0);
//! # Ok(())
//! # }
//! ```

pub mod accessory;
pub mod capabilities;
pub mod coalescer;
pub mod color;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;

pub use accessory::{AccessoryConfig, AccessoryInformation, LightAccessory, LightVariant};
pub use capabilities::{Characteristic, CharacteristicHandler, CharacteristicValue};
pub use coalescer::{FlushWrite, PendingWrite, WriteCoalescer};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{CloudClient, CloudConfig};
pub use protocol::{DeviceApi, LampChannels, LampPatch};
pub use state::{DeviceState, StateCache, StateChange};
pub use types::{Brightness, HueSaturation, RgbColor, RgbwColor};
