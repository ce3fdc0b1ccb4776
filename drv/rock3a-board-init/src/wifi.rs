// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SDIO Wi-Fi module on SDMMC2.

use crate::bsp;
use crate::pinmux;
use drv_rk356x_sys_api::{Direction, Sys};

/// Clocks and routes SDMMC2, then power-cycles the module through
/// WIFI_REG_ON so that it starts from a known state.
pub fn init(sys: &impl Sys) {
    sys.set_sdmmc_clock_rate(bsp::WIFI_SDMMC, bsp::WIFI_SDMMC_CLOCK_HZ);
    pinmux::apply(sys, &bsp::SDMMC2_PINS);

    let reg_on = bsp::WIFI_REG_ON;
    sys.set_direction(reg_on, Direction::Output);
    sys.delay_ms(bsp::WIFI_POWER_SETUP_MS);
    sys.set_level(reg_on, false);
    sys.delay_ms(bsp::WIFI_POWER_OFF_MS);
    sys.set_level(reg_on, true);
    sys.delay_ms(bsp::WIFI_POWER_ON_MS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Fake, Op};

    #[test]
    fn power_cycle() {
        let fake = Fake::new();
        init(&fake);

        let ops = fake.ops();
        assert_eq!(ops[0], Op::SdmmcClock(2, 100_000_000));

        let reg_on = bsp::WIFI_REG_ON;
        let tail = &ops[ops.len() - 6..];
        assert_eq!(
            tail,
            [
                Op::Direction(reg_on, Direction::Output),
                Op::DelayUs(1_000),
                Op::Level(reg_on, false),
                Op::DelayUs(500_000),
                Op::Level(reg_on, true),
                Op::DelayUs(100_000),
            ]
        );
        for entry in &bsp::SDMMC2_PINS {
            assert_eq!(fake.pin(entry.pin).function, Some(entry.function));
        }
    }
}
