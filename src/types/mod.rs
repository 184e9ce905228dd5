// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! These types keep values inside their valid ranges at construction time,
//! either by rejecting invalid input or by clamping it.
//!
//! # Types
//!
//! - [`HueSaturation`] - Hue (0-360 degrees) and saturation (0-100%)
//! - [`Brightness`] - Brightness level (0-100%)
//! - [`RgbColor`] - Raw red/green/blue channel intensities
//! - [`RgbwColor`] - Raw red/green/blue/white channel intensities

mod brightness;
mod color;
mod rgb_color;
mod rgbw_color;

pub use brightness::Brightness;
pub use color::HueSaturation;
pub use rgb_color::RgbColor;
pub use rgbw_color::RgbwColor;
