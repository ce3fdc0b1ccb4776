// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver for the RK809 power-management IC
//!
//! Only the regulator-control subset is modelled: identification, the LDO
//! output voltage selectors, and the three power-enable registers.

use drv_i2c_api::{I2cBus, I2cDevice, ResponseCode};
use static_assertions::const_assert_eq;

/// The value of [`ChipId::id`] for an RK809.
pub const RK809_CHIP_ID: u16 = 0x809;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    PowerEn1 = 0xb2,
    PowerEn2 = 0xb3,
    PowerEn3 = 0xb4,
    Ldo1OnVsel = 0xcc,
    Ldo2OnVsel = 0xce,
    Ldo3OnVsel = 0xd0,
    Ldo4OnVsel = 0xd2,
    Ldo5OnVsel = 0xd4,
    Ldo6OnVsel = 0xd6,
    Ldo7OnVsel = 0xd8,
    Ldo8OnVsel = 0xda,
    Ldo9OnVsel = 0xdc,
    ChipName = 0xed,
    ChipVer = 0xee,
}

/// The nine linear regulators.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Ldo {
    Ldo1 = 1,
    Ldo2,
    Ldo3,
    Ldo4,
    Ldo5,
    Ldo6,
    Ldo7,
    Ldo8,
    Ldo9,
}

impl Ldo {
    /// The register holding this regulator's output voltage while on.
    pub const fn on_vsel(self) -> Register {
        match self {
            Ldo::Ldo1 => Register::Ldo1OnVsel,
            Ldo::Ldo2 => Register::Ldo2OnVsel,
            Ldo::Ldo3 => Register::Ldo3OnVsel,
            Ldo::Ldo4 => Register::Ldo4OnVsel,
            Ldo::Ldo5 => Register::Ldo5OnVsel,
            Ldo::Ldo6 => Register::Ldo6OnVsel,
            Ldo::Ldo7 => Register::Ldo7OnVsel,
            Ldo::Ldo8 => Register::Ldo8OnVsel,
            Ldo::Ldo9 => Register::Ldo9OnVsel,
        }
    }
}

/// LDO selector encoding: 600 mV at code 0, 25 mV per step.
pub const LDO_VSEL_MIN_MV: u16 = 600;
pub const LDO_VSEL_STEP_MV: u16 = 25;
pub const LDO_VSEL_MAX: u8 = 0x70;

/// Encodes an LDO output voltage. Voltages below the minimum clamp to code 0,
/// voltages above the maximum clamp to [`LDO_VSEL_MAX`], and anything between
/// steps rounds down.
pub const fn ldo_vsel(millivolts: u16) -> u8 {
    if millivolts <= LDO_VSEL_MIN_MV {
        return 0;
    }
    let code = (millivolts - LDO_VSEL_MIN_MV) / LDO_VSEL_STEP_MV;
    if code > LDO_VSEL_MAX as u16 {
        LDO_VSEL_MAX
    } else {
        code as u8
    }
}

/// Inverse of [`ldo_vsel`].
pub const fn ldo_millivolts(vsel: u8) -> u16 {
    LDO_VSEL_MIN_MV + vsel as u16 * LDO_VSEL_STEP_MV
}

const_assert_eq!(ldo_vsel(900), 0x0c);
const_assert_eq!(ldo_vsel(1800), 0x30);
const_assert_eq!(ldo_vsel(3300), 0x6c);

/// Builds a POWER_ENn value. The high nibble is a write mask for the low
/// nibble, so only the regulators named in `bits` change state; each one
/// named is switched on.
pub const fn power_en(bits: u8) -> u8 {
    (bits & 0xf) << 4 | (bits & 0xf)
}

/// Identity as reported by CHIP_NAME and CHIP_VER.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChipId {
    /// `0x809` for an RK809.
    pub id: u16,
    pub version: u8,
}

impl ChipId {
    /// CHIP_NAME holds the upper eight bits of the part number; CHIP_VER
    /// holds the low digit in its high nibble and the silicon revision in its
    /// low nibble.
    pub const fn from_regs(name: u8, ver: u8) -> Self {
        Self {
            id: (name as u16) << 4 | (ver >> 4) as u16,
            version: ver & 0xf,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BadRead { reg: Register, code: ResponseCode },
    BadWrite { reg: Register, code: ResponseCode },
}

impl From<Error> for ResponseCode {
    fn from(err: Error) -> Self {
        match err {
            Error::BadRead { code, .. } => code,
            Error::BadWrite { code, .. } => code,
        }
    }
}

pub struct Rk809<'a, B> {
    device: I2cDevice<'a, B>,
}

impl<'a, B: I2cBus> Rk809<'a, B> {
    pub fn new(device: I2cDevice<'a, B>) -> Self {
        Self { device }
    }

    pub fn read_reg(&self, reg: Register) -> Result<u8, Error> {
        self.device
            .read_reg(reg as u8)
            .map_err(|code| Error::BadRead { reg, code })
    }

    pub fn write_reg(&self, reg: Register, value: u8) -> Result<(), Error> {
        self.device
            .write_reg(reg as u8, value)
            .map_err(|code| Error::BadWrite { reg, code })
    }

    /// Reads CHIP_NAME then CHIP_VER.
    pub fn chip_id(&self) -> Result<ChipId, Error> {
        let name = self.read_reg(Register::ChipName)?;
        let ver = self.read_reg(Register::ChipVer)?;
        Ok(ChipId::from_regs(name, ver))
    }

    pub fn ldo_vsel(&self, ldo: Ldo) -> Result<u8, Error> {
        self.read_reg(ldo.on_vsel())
    }

    pub fn set_ldo_vsel(&self, ldo: Ldo, vsel: u8) -> Result<(), Error> {
        self.write_reg(ldo.on_vsel(), vsel)
    }
}
