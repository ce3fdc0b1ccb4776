// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! I2C device drivers
//!
//! This crate contains the I2C device drivers needed during board bring-up:
//!
//! - [`rk809`]: RK809 power-management IC

#![cfg_attr(target_os = "none", no_std)]

pub mod rk809;
