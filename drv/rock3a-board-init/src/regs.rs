// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RK3568 register map, restricted to what board bring-up touches.
//!
//! Each block is an owned handle over an [`Mmio`] implementation. Handles
//! are only minted together, by [`Registers::new`], which the orchestrator
//! calls once; sub-initializers borrow the handles they need mutably. Since
//! every write takes `&mut self`, a block has exactly one writer at a time.
//!
//! There is no other way to get a handle:
//!
//! ```compile_fail
//! use drv_rk356x_sys_api::Volatile;
//! use drv_rock3a_board_init::regs::SysGrf;
//!
//! let mmio = unsafe { Volatile::new() };
//! let mut grf = SysGrf::new(&mmio);
//! grf.select_gmac1_m1();
//! ```

use bitflags::bitflags;
use drv_rk356x_sys_api::{hiword_mask, hiword_update, Mmio};
use static_assertions::const_assert_eq;

pub const CPU_GRF_BASE: usize = 0xfdc3_0000;
pub const SYS_GRF_BASE: usize = 0xfdc6_0000;
pub const CRU_BASE: usize = 0xfdd2_0000;
pub const PMU_BASE: usize = 0xfdd9_0000;
pub const GMAC1_BASE: usize = 0xfe01_0000;

/// Every register block bring-up writes, each owned exactly once.
pub struct Registers<'a, M> {
    pub sys_grf: SysGrf<'a, M>,
    pub cpu_grf: CpuGrf<'a, M>,
    pub pmu: Pmu<'a, M>,
    pub cru: CruRegs<'a, M>,
    pub gmac1: Gmac<'a, M>,
}

impl<'a, M: Mmio> Registers<'a, M> {
    pub(crate) fn new(mmio: &'a M) -> Self {
        Self {
            sys_grf: SysGrf::new(mmio),
            cpu_grf: CpuGrf::new(mmio),
            pmu: Pmu::new(mmio),
            cru: CruRegs::new(mmio),
            gmac1: Gmac::new(mmio, GMAC1_BASE),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

const GRF_IOFUNC_SEL0: usize = 0x0300;
const GRF_IOFUNC_SEL5: usize = 0x0314;
const GRF_MAC1_CON0: usize = 0x0388;
const GRF_MAC1_CON1: usize = 0x038c;

const GMAC1_IOMUX_SEL: u16 = 1 << 8;
const PCIE30X2_IOMUX_SEL_MASK: u16 = 0b11 << 6;
const PCIE30X2_IOMUX_SEL_M1: u16 = 0b01 << 6;

const CLK_TX_DL_CFG_SHIFT: u16 = 0;
const CLK_RX_DL_CFG_SHIFT: u16 = 8;
const CLK_DL_CFG_MASK: u16 = 0x7f;

bitflags! {
    /// GRF_MAC1_CON1
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct MacCon1: u16 {
        const TXCLK_DLY_ENA = 1 << 0;
        const RXCLK_DLY_ENA = 1 << 1;
        const MAC_SPEED = 1 << 2;
        const FLOWCTRL = 1 << 3;
        const PHY_INTF_SEL_MASK = 0b111 << 4;
        const PHY_INTF_SEL_RGMII = 0b001 << 4;
    }
}

/// System general register file: IO routing and GMAC interface glue.
pub struct SysGrf<'a, M> {
    mmio: &'a M,
}

impl<'a, M: Mmio> SysGrf<'a, M> {
    fn new(mmio: &'a M) -> Self {
        Self { mmio }
    }

    fn write(&mut self, offset: usize, value: u32) {
        self.mmio.write32(SYS_GRF_BASE + offset, value);
    }

    /// Routes GMAC1 to its M1 pin set.
    pub fn select_gmac1_m1(&mut self) {
        self.write(GRF_IOFUNC_SEL0, hiword_mask(GMAC1_IOMUX_SEL));
    }

    /// Routes the PCIe 3.0 x2 sideband signals to their M1 pin set.
    pub fn select_pcie30x2_m1(&mut self) {
        self.write(
            GRF_IOFUNC_SEL5,
            hiword_update(PCIE30X2_IOMUX_SEL_MASK, PCIE30X2_IOMUX_SEL_M1),
        );
    }

    /// Sets the GMAC1 TX and RX clock delay lines (7 bits each).
    pub fn set_mac1_delays(&mut self, tx: u8, rx: u8) {
        let value = (tx as u16 & CLK_DL_CFG_MASK) << CLK_TX_DL_CFG_SHIFT
            | (rx as u16 & CLK_DL_CFG_MASK) << CLK_RX_DL_CFG_SHIFT;
        let mask = CLK_DL_CFG_MASK << CLK_TX_DL_CFG_SHIFT
            | CLK_DL_CFG_MASK << CLK_RX_DL_CFG_SHIFT;
        self.write(GRF_MAC1_CON0, hiword_update(mask, value));
    }

    /// Selects RGMII on GMAC1 and switches both delay lines in.
    pub fn set_mac1_rgmii_with_delays(&mut self) {
        let mask = MacCon1::PHY_INTF_SEL_MASK
            | MacCon1::TXCLK_DLY_ENA
            | MacCon1::RXCLK_DLY_ENA;
        let value = MacCon1::PHY_INTF_SEL_RGMII
            | MacCon1::TXCLK_DLY_ENA
            | MacCon1::RXCLK_DLY_ENA;
        self.write(GRF_MAC1_CON1, hiword_update(mask.bits(), value.bits()));
    }
}

////////////////////////////////////////////////////////////////////////////////

const CORE_PVTPLL_CON0: usize = 0x0010;
const CORE_PVTPLL_RING_LENGTH_SEL_SHIFT: u16 = 3;
const CORE_PVTPLL_RING_LENGTH_SEL_MASK: u16 = 0x1f;

bitflags! {
    /// CPU_GRF COREPVTPLL_CON0 control bits.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct PvtPllCon0: u16 {
        const START = 1 << 0;
        const OSC_EN = 1 << 1;
    }
}

/// CPU general register file.
pub struct CpuGrf<'a, M> {
    mmio: &'a M,
}

impl<'a, M: Mmio> CpuGrf<'a, M> {
    fn new(mmio: &'a M) -> Self {
        Self { mmio }
    }

    /// Selects the core PVTPLL ring length and starts the oscillator.
    pub fn start_core_pvtpll(&mut self, ring_length: u8) {
        let ctl = PvtPllCon0::OSC_EN | PvtPllCon0::START;
        let mask = CORE_PVTPLL_RING_LENGTH_SEL_MASK
            << CORE_PVTPLL_RING_LENGTH_SEL_SHIFT
            | ctl.bits();
        let value = (ring_length as u16 & CORE_PVTPLL_RING_LENGTH_SEL_MASK)
            << CORE_PVTPLL_RING_LENGTH_SEL_SHIFT
            | ctl.bits();
        self.mmio
            .write32(CPU_GRF_BASE + CORE_PVTPLL_CON0, hiword_update(mask, value));
    }
}

////////////////////////////////////////////////////////////////////////////////

const PMU_NOC_AUTO_CON0: usize = 0x0070;
const PMU_NOC_AUTO_CON1: usize = 0x0074;

/// Power management unit.
pub struct Pmu<'a, M> {
    mmio: &'a M,
}

impl<'a, M: Mmio> Pmu<'a, M> {
    fn new(mmio: &'a M) -> Self {
        Self { mmio }
    }

    /// Lets the NoC gate idle bus clocks on its own. CON0 is a plain
    /// register; CON1 is hi-word masked and only has four defined bits.
    pub fn enable_noc_auto_gating(&mut self) {
        self.mmio.write32(PMU_BASE + PMU_NOC_AUTO_CON0, 0xffff_ffff);
        self.mmio
            .write32(PMU_BASE + PMU_NOC_AUTO_CON1, hiword_mask(0x000f));
    }
}

////////////////////////////////////////////////////////////////////////////////

const fn cru_clksel_con(n: usize) -> usize {
    0x0100 + n * 4
}

const GMAC1_CLKSEL_CON: usize = 33;
const RMII1_MODE_MASK: u16 = 0b11 << 0;
const RMII1_MODE_RGMII: u16 = 0b00 << 0;
const RMII1_EXTCLK_SEL_IO: u16 = 1 << 2;
const RGMII1_CLK_SEL_MASK: u16 = 0b11 << 4;
const RGMII1_CLK_SEL_125M: u16 = 0b00 << 4;

const GMAC1_CLKSEL_MASK: u16 =
    RMII1_MODE_MASK | RMII1_EXTCLK_SEL_IO | RGMII1_CLK_SEL_MASK;
const GMAC1_CLKSEL_RGMII_125M_IO: u16 =
    RMII1_MODE_RGMII | RMII1_EXTCLK_SEL_IO | RGMII1_CLK_SEL_125M;

const_assert_eq!(
    hiword_update(GMAC1_CLKSEL_MASK, GMAC1_CLKSEL_RGMII_125M_IO),
    0x0037_0004
);

/// Clock and reset unit, for the clock selections that are plain register
/// writes. Soft resets go through [`drv_rk356x_sys_api::Cru`].
pub struct CruRegs<'a, M> {
    mmio: &'a M,
}

impl<'a, M: Mmio> CruRegs<'a, M> {
    fn new(mmio: &'a M) -> Self {
        Self { mmio }
    }

    /// GMAC1 in RGMII mode, 125 MHz RGMII clock, MAC clock taken from the
    /// pad rather than generated internally.
    pub fn select_gmac1_rgmii_clocks(&mut self) {
        self.mmio.write32(
            CRU_BASE + cru_clksel_con(GMAC1_CLKSEL_CON),
            hiword_update(GMAC1_CLKSEL_MASK, GMAC1_CLKSEL_RGMII_125M_IO),
        );
    }
}

////////////////////////////////////////////////////////////////////////////////

const MAC_ADDRESS0_HIGH: usize = 0x0300;
const MAC_ADDRESS0_LOW: usize = 0x0304;

/// The GMAC1 controller itself.
pub struct Gmac<'a, M> {
    mmio: &'a M,
    base: usize,
}

impl<'a, M: Mmio> Gmac<'a, M> {
    fn new(mmio: &'a M, base: usize) -> Self {
        Self { mmio, base }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Programs the primary unicast address filter.
    pub fn set_mac_address0(&mut self, high: u32, low: u32) {
        self.mmio.write32(self.base + MAC_ADDRESS0_LOW, low);
        self.mmio.write32(self.base + MAC_ADDRESS0_HIGH, high);
    }
}
