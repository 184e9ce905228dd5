// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp state management types.
//!
//! [`DeviceState`] holds the lamp parameters in light model units,
//! [`StateChange`] describes a single-parameter update, and [`StateCache`]
//! tracks how old the cached state is.
//!
//! # Examples
//!
//! ```
//! use rubetek_light::state::{DeviceState, StateChange};
//!
//! let mut state = DeviceState::new();
//! state.apply(&StateChange::Hue(240.0));
//! assert_eq!(state.hue(), 240.0);
//! ```

mod cache;
mod device_state;
mod state_change;

pub use cache::StateCache;
pub use device_state::DeviceState;
pub use state_change::StateChange;
