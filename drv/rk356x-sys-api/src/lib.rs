// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contracts for the RK356x SoC primitives used during board bring-up.
//!
//! Bring-up code is written against these traits rather than against
//! registers, so that the same sequence can run on hardware (where firmware
//! libraries provide the implementations) and on the host under test.
//!
//! None of these operations report failure. GPIO, CRU, OTP and domain
//! voltage accesses on this SoC are plain register writes that the hardware
//! accepts unconditionally.

#![cfg_attr(target_os = "none", no_std)]

mod gpio;
mod mmio;

pub use gpio::{
    Bank, Direction, Drive, Function, Gpio, InputMode, Pin, Port, Pull,
};
pub use mmio::{hiword_mask, hiword_update, Mmio, Volatile};

/// A soft reset line in the CRU, named by its SOFTRST_CON register index and
/// bit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SoftReset {
    pub con: u8,
    pub bit: u8,
}

/// Clock and reset unit.
pub trait Cru {
    fn assert_soft_reset(&self, reset: SoftReset);
    fn deassert_soft_reset(&self, reset: SoftReset);
    /// Sets the card clock of SDMMC controller `index` to `hz`.
    fn set_sdmmc_clock_rate(&self, index: u8, hz: u64);
}

/// One-time-programmable storage.
pub trait Otp {
    /// Fills `buf` from OTP starting at byte `offset`.
    fn read_otp(&self, offset: usize, buf: &mut [u8]);
}

/// The SoC's separately-powered I/O domains.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum IoDomain {
    Pmuio2 = 0,
    Vccio1,
    Vccio2,
    Vccio3,
    Vccio4,
    Vccio5,
    Vccio6,
    Vccio7,
}

/// Tells the SoC which voltage each I/O domain is supplied with, so that
/// its pad drivers are configured to match.
pub trait IoDomains {
    fn set_domain_voltage(&self, domain: IoDomain, millivolts: u16);
}

/// Operating modes of the shared multi-protocol (Naneng combo) PHYs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum MultiPhyMode {
    Sata = 0,
    Usb3 = 1,
    Pcie = 2,
    Qsgmii = 3,
}

pub trait MultiPhy {
    fn set_mode(&self, lane: u8, mode: MultiPhyMode);
}

/// Blocking delays. There is nothing else to run, so these simply spin.
pub trait Delay {
    fn delay_us(&self, us: u32);

    fn delay_ms(&self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

/// Everything the board sequence needs from the SoC, in one bound.
pub trait Sys: Gpio + Mmio + Cru + Otp + IoDomains + MultiPhy + Delay {}

impl<T> Sys for T where T: Gpio + Mmio + Cru + Otp + IoDomains + MultiPhy + Delay
{}
