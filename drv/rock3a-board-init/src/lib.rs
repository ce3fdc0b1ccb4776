// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board bring-up for the Radxa ROCK-3A (RK3568).
//!
//! [`init`] runs once, early in boot, and leaves the power rails, CPU clock,
//! pin multiplexing and on-board peripherals in the state the operating
//! system expects to find them in. The steps run in a fixed order; each
//! depends on the ones before it (the PMIC has to be up before anything it
//! powers is touched, for instance). A fatal error stops the sequence where
//! it happened. Nothing is retried and nothing is rolled back.
//!
//! All hardware access goes through the traits in `drv-rk356x-sys-api`,
//! `drv-i2c-api` and `drv-scmi-clock-api`, plus [`mac::UidHasher`] and
//! [`gmac::EthernetPhy`] here.

#![cfg_attr(target_os = "none", no_std)]

pub mod bsp;
pub mod clock;
pub mod gmac;
pub mod mac;
pub mod pcie;
pub mod pinmux;
pub mod pmic;
pub mod regs;
pub mod usb;
#[cfg(feature = "wifi")]
pub mod wifi;

#[cfg(test)]
mod fake;

use drv_i2c_api::I2cBus;
use drv_i2c_devices::rk809::ChipId;
use drv_rk356x_sys_api::{IoDomain, Sys};
use drv_scmi_clock_api::ClockProtocol;
use ringbuf::{ringbuf, ringbuf_entry};

use crate::clock::ClockError;
use crate::gmac::EthernetPhy;
use crate::mac::{MacAddress, UidHasher};
use crate::pmic::PmicError;
use crate::regs::Registers;

/// The supply voltage of one I/O domain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VoltageDomain {
    pub domain: IoDomain,
    pub millivolts: u16,
}

impl VoltageDomain {
    pub const fn new(domain: IoDomain, millivolts: u16) -> Self {
        Self { domain, millivolts }
    }
}

/// Bring-up steps, in the order they run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    VoltageDomains,
    Pmic,
    RtcI2c,
    CpuClock,
    ClockGating,
    PvtPll,
    Usb,
    Pcie,
    Ethernet,
    #[cfg(feature = "wifi")]
    Wifi,
    Done,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BootError {
    Pmic(PmicError),
    Clock(ClockError),
}

impl From<PmicError> for BootError {
    fn from(e: PmicError) -> Self {
        BootError::Pmic(e)
    }
}

impl From<ClockError> for BootError {
    fn from(e: ClockError) -> Self {
        BootError::Clock(e)
    }
}

/// What bring-up found and chose.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BringupSummary {
    pub pmic: ChipId,
    pub cpu_rate_hz: u64,
    pub mac_address: MacAddress,
}

/// Everything [`init`] talks to.
pub struct Board<'a, S, B, C, H, P> {
    pub sys: &'a S,
    pub i2c: &'a B,
    /// `None` if firmware provides no clock service.
    pub clock: Option<&'a C>,
    pub hasher: &'a H,
    pub phy: &'a P,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Trace {
    None,
    Step(Step),
    Failed(Step, BootError),
}

ringbuf!(Trace, 16, Trace::None);

pub fn init<S, B, C, H, P>(
    board: &Board<'_, S, B, C, H, P>,
) -> Result<BringupSummary, BootError>
where
    S: Sys,
    B: I2cBus,
    C: ClockProtocol,
    H: UidHasher,
    P: EthernetPhy,
{
    let sys = board.sys;
    let mut regs = Registers::new(sys);

    ringbuf_entry!(Trace::Step(Step::VoltageDomains));
    for d in bsp::IO_DOMAINS {
        sys.set_domain_voltage(d.domain, d.millivolts);
    }

    ringbuf_entry!(Trace::Step(Step::Pmic));
    let pmic = pmic::init(sys, board.i2c)
        .map_err(|e| fail(Step::Pmic, e.into()))?;

    ringbuf_entry!(Trace::Step(Step::RtcI2c));
    pinmux::configure_i2c(sys, &bsp::RTC_I2C_PINS);

    ringbuf_entry!(Trace::Step(Step::CpuClock));
    let cpu_rate_hz = clock::negotiate_cpu_clock(board.clock)
        .map_err(|e| fail(Step::CpuClock, e.into()))?;

    ringbuf_entry!(Trace::Step(Step::ClockGating));
    regs.pmu.enable_noc_auto_gating();

    ringbuf_entry!(Trace::Step(Step::PvtPll));
    regs.cpu_grf.start_core_pvtpll(bsp::CPU_PVTPLL_RING_LENGTH);

    ringbuf_entry!(Trace::Step(Step::Usb));
    usb::init(sys);

    ringbuf_entry!(Trace::Step(Step::Pcie));
    pcie::init(sys, &mut regs.sys_grf);

    ringbuf_entry!(Trace::Step(Step::Ethernet));
    let mac_address = gmac::init(
        sys,
        &mut regs.sys_grf,
        &mut regs.cru,
        &mut regs.gmac1,
        board.hasher,
        board.phy,
    );

    #[cfg(feature = "wifi")]
    {
        ringbuf_entry!(Trace::Step(Step::Wifi));
        wifi::init(sys);
    }

    ringbuf_entry!(Trace::Step(Step::Done));
    Ok(BringupSummary {
        pmic,
        cpu_rate_hz,
        mac_address,
    })
}

fn fail(step: Step, e: BootError) -> BootError {
    ringbuf_entry!(Trace::Failed(step, e));
    e
}
