// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color space conversions between the light model and device channels.
//!
//! Every function in this module is pure and total: inputs outside their
//! nominal range are clamped and outputs are always within range.
//!
//! - [`rgb_to_hsv`] / [`hsv_to_rgb`]: normalized hue/saturation used by
//!   RGB-only bulbs.
//! - [`rgb_to_hsl`] / [`hsl_to_rgb`]: hue in degrees, used by RGBW bulbs.
//! - [`rgb_to_rgbw`] / [`rgbw_to_rgb`]: split and merge of the dedicated
//!   white channel.
//!
//! # Examples
//!
//! ```
//! use rubetek_light::color::{rgb_to_rgbw, rgbw_to_rgb};
//!
//! // Gray is absorbed entirely by the white channel
//! assert_eq!(rgb_to_rgbw(90, 90, 90), (0, 0, 0, 90));
//!
//! // Recombination is a plain per-channel sum
//! assert_eq!(rgbw_to_rgb(200, 10, 0, 100), (300, 110, 100));
//! ```

mod hsl;
mod hsv;
mod rgbw;

pub use hsl::{hsl_to_rgb, rgb_to_hsl};
pub use hsv::{hsv_to_rgb, rgb_to_hsv};
pub use rgbw::{rgb_to_rgbw, rgbw_to_rgb};
