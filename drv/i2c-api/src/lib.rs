// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contract for register-addressed I2C access during board bring-up
//!
//! Bring-up code does not own an I2C controller driver; it is handed
//! something that implements [`I2cBus`] and talks to devices through an
//! [`I2cDevice`] handle built on top of it.
//!
//! # I2C devices
//!
//! An I2C device is identified by a pair:
//!
//! - The I2C controller in the SoC
//! - The 7-bit address of the device itself
//!
//! There are no multiplexers on the boards this is used on.

#![cfg_attr(target_os = "none", no_std)]

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// The response code returned by an I2C bus implementation. These are
/// specific not because the caller is expected to handle them differently,
/// but so that a trace of a failed boot says what actually went wrong.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ResponseCode {
    /// Bad response from controller
    BadResponse = 1,
    /// Bad argument passed to the bus
    BadArg = 2,
    /// Indicated I2C device did not acknowledge its address
    NoDevice = 3,
    /// Indicated I2C controller is invalid
    BadController = 4,
    /// Device address is reserved
    ReservedAddress = 5,
    /// Device did not acknowledge the register address
    NoRegister = 8,
    /// I2C bus was spontaneously reset during operation
    BusReset = 17,
    /// I2C bus locked up and was reset
    BusLocked = 19,
    /// I2C controller appeared to be busy and was reset
    ControllerBusy = 21,
    /// I2C bus error
    BusError = 22,
    /// Requested operation is not supported
    OperationNotSupported = 25,
}

///
/// The controller for a given I2C device. The numbering here follows the
/// numbering for the peripheral in the SoC reference manual.
///
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Controller {
    I2C0 = 0,
    I2C1 = 1,
    I2C2 = 2,
    I2C3 = 3,
    I2C4 = 4,
    I2C5 = 5,
}

#[derive(Copy, Clone, Debug, FromPrimitive, Eq, PartialEq)]
#[allow(clippy::unusual_byte_groupings)]
pub enum ReservedAddress {
    GeneralCall = 0b0000_000,
    CBUSAddress = 0b0000_001,
    FutureBus = 0b0000_010,
    FuturePurposes = 0b0000_011,
    HighSpeedReserved00 = 0b0000_100,
    HighSpeedReserved01 = 0b0000_101,
    HighSpeedReserved10 = 0b0000_110,
    HighSpeedReserved11 = 0b0000_111,
    TenBit00 = 0b1111_100,
    TenBit01 = 0b1111_101,
    TenBit10 = 0b1111_110,
    TenBit11 = 0b1111_111,
}

/// Register-addressed, single-byte transactions on an I2C bus.
///
/// Every transaction can fail; implementations report why through
/// [`ResponseCode`] and must not retry on the caller's behalf.
pub trait I2cBus {
    /// Writes `reg` to the device at `address`, then reads one byte back.
    fn read_reg(
        &self,
        controller: Controller,
        address: u8,
        reg: u8,
    ) -> Result<u8, ResponseCode>;

    /// Writes `reg` followed by `value` to the device at `address`.
    fn write_reg(
        &self,
        controller: Controller,
        address: u8,
        reg: u8,
        value: u8,
    ) -> Result<(), ResponseCode>;
}

///
/// A device on a particular controller, bound to the bus that reaches it.
///
pub struct I2cDevice<'a, B> {
    bus: &'a B,
    pub controller: Controller,
    pub address: u8,
}

impl<B> core::fmt::Display for I2cDevice<'_, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} {:#x}", self.controller, self.address)
    }
}

impl<'a, B: I2cBus> I2cDevice<'a, B> {
    ///
    /// Returns a new [`I2cDevice`]. No bus traffic is generated; an address
    /// in one of the reserved ranges (or wider than 7 bits) is refused.
    ///
    pub fn new(
        bus: &'a B,
        controller: Controller,
        address: u8,
    ) -> Result<Self, ResponseCode> {
        if address > 0x7f || ReservedAddress::from_u8(address).is_some() {
            return Err(ResponseCode::ReservedAddress);
        }

        Ok(Self {
            bus,
            controller,
            address,
        })
    }

    /// Reads an 8-bit register.
    pub fn read_reg(&self, reg: u8) -> Result<u8, ResponseCode> {
        self.bus.read_reg(self.controller, self.address, reg)
    }

    /// Writes an 8-bit register. There is no read-back.
    pub fn write_reg(&self, reg: u8, value: u8) -> Result<(), ResponseCode> {
        self.bus.write_reg(self.controller, self.address, reg, value)
    }
}
