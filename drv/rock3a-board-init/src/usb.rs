// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! USB 3.0 host ports.

use crate::bsp;
use drv_rk356x_sys_api::{Direction, MultiPhyMode, Sys};

/// Puts the combo PHY lanes that carry USB into USB3 mode, then turns on
/// port power.
pub fn init(sys: &impl Sys) {
    for lane in bsp::USB3_PHY_LANES {
        sys.set_mode(lane, MultiPhyMode::Usb3);
    }

    sys.set_direction(bsp::USB_HOST_PWR_EN, Direction::Output);
    sys.set_level(bsp::USB_HOST_PWR_EN, true);
}
