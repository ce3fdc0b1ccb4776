// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PCIe 3.0 x2 sideband: CLKREQ#, PERST# and WAKE# routing, and the
//! reference clock.

use crate::bsp;
use crate::pinmux;
use crate::regs::SysGrf;
use drv_rk356x_sys_api::{Direction, Pull, Sys};

pub fn init<S: Sys>(sys: &S, grf: &mut SysGrf<'_, S>) {
    pinmux::apply(sys, &bsp::PCIE30X2_PINS);
    grf.select_pcie30x2_m1();

    // The clock generator enable is active low.
    let en = bsp::PCIE_CLKGEN_EN_L;
    sys.set_pull(en, Pull::None);
    sys.set_direction(en, Direction::Output);
    sys.set_level(en, false);
}
