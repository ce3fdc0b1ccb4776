// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GMAC1 and its RGMII PHY.
//!
//! The MAC is held in reset while its pins, clocks and delay lines are set
//! up and the PHY is put through a hard reset. Once it is released it gets
//! its address, and the PHY routine takes over from there.

use crate::bsp;
use crate::mac::{self, MacAddress, UidHasher};
use crate::pinmux;
use crate::regs::{CruRegs, Gmac, SysGrf};
use drv_rk356x_sys_api::{Direction, Sys};
use ringbuf::{ringbuf, ringbuf_entry};

/// The PHY-specific part of bring-up, run once the MAC is out of reset.
pub trait EthernetPhy {
    /// `mac_base` is the controller's register base, for MDIO access.
    fn init(&self, mac_base: usize);
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Trace {
    None,
    MacReset(bool),
    PhyReset(bool),
    Address(MacAddress),
    PhyInit(usize),
}

ringbuf!(Trace, 8, Trace::None);

pub fn init<S: Sys>(
    sys: &S,
    grf: &mut SysGrf<'_, S>,
    cru: &mut CruRegs<'_, S>,
    gmac: &mut Gmac<'_, S>,
    hasher: &impl UidHasher,
    phy: &impl EthernetPhy,
) -> MacAddress {
    ringbuf_entry!(Trace::MacReset(true));
    sys.assert_soft_reset(bsp::GMAC1_SOFT_RESET);

    grf.select_gmac1_m1();
    pinmux::apply(sys, &bsp::GMAC1_PINS);

    cru.select_gmac1_rgmii_clocks();
    grf.set_mac1_delays(bsp::GMAC1_TX_DELAY, bsp::GMAC1_RX_DELAY);
    grf.set_mac1_rgmii_with_delays();

    reset_phy(sys);

    ringbuf_entry!(Trace::MacReset(false));
    sys.deassert_soft_reset(bsp::GMAC1_SOFT_RESET);

    let address = mac::derive(sys, hasher);
    ringbuf_entry!(Trace::Address(address));
    gmac.set_mac_address0(address.high_word(), address.low_word());

    ringbuf_entry!(Trace::PhyInit(gmac.base()));
    phy.init(gmac.base());

    address
}

/// Pulses the PHY's reset line low. The delays are minimums from the PHY
/// datasheet.
fn reset_phy(sys: &impl Sys) {
    let pin = bsp::GMAC1_PHY_RESET;
    sys.set_direction(pin, Direction::Output);
    sys.delay_ms(bsp::PHY_RESET_SETUP_MS);

    ringbuf_entry!(Trace::PhyReset(true));
    sys.set_level(pin, false);
    sys.delay_ms(bsp::PHY_RESET_ASSERT_MS);

    ringbuf_entry!(Trace::PhyReset(false));
    sys.set_level(pin, true);
    sys.delay_ms(bsp::PHY_RESET_RECOVERY_MS);
}
