// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RK809 power-up sequence.
//!
//! The PMIC comes out of reset with only the rails the SoC needs to boot.
//! This brings up the rest in three phases: LDO1 and LDO9 are switched on at
//! their reset voltages, every LDO the board uses is reprogrammed to its
//! final voltage, and then the remaining bucks, switches and LDOs are
//! enabled.

use crate::bsp;
use crate::pinmux;
use drv_i2c_api::{I2cBus, I2cDevice, ResponseCode};
use drv_i2c_devices::rk809::{
    self, ldo_millivolts, ldo_vsel, ChipId, Ldo, Register, Rk809,
    RK809_CHIP_ID,
};
use drv_rk356x_sys_api::Gpio;
use ringbuf::{ringbuf, ringbuf_entry};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PmicError {
    /// A transaction failed. Nothing after it was attempted.
    Bus {
        register: Register,
        code: ResponseCode,
    },
    /// The board's PMIC address was refused by the bus layer.
    BadAddress(ResponseCode),
    /// Something answered, but it is not an RK809.
    UnexpectedChip(ChipId),
}

impl From<rk809::Error> for PmicError {
    fn from(err: rk809::Error) -> Self {
        match err {
            rk809::Error::BadRead { reg, code }
            | rk809::Error::BadWrite { reg, code } => PmicError::Bus {
                register: reg,
                code,
            },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Trace {
    None,
    Start,
    ChipId(ChipId),
    UnexpectedChip(ChipId),
    DefaultMismatch {
        ldo: Ldo,
        expected_mv: u16,
        found_mv: u16,
    },
    EarlyEnable,
    LdoVsel(Ldo, u8),
    FinalEnable,
    Done,
    Failed(PmicError),
}

ringbuf!(Trace, 32, Trace::None);

/// Runs the whole sequence and returns the identity of the part found.
///
/// Any bus error stops the sequence where it happened. A mismatched factory
/// default is only traced: the part is still an RK809, and the values about
/// to be written do not depend on what was there before.
pub fn init<B: I2cBus>(
    gpio: &impl Gpio,
    bus: &B,
) -> Result<ChipId, PmicError> {
    ringbuf_entry!(Trace::Start);
    let r = sequence(gpio, bus);
    match r {
        Ok(_) => ringbuf_entry!(Trace::Done),
        Err(e) => ringbuf_entry!(Trace::Failed(e)),
    }
    r
}

fn sequence<B: I2cBus>(
    gpio: &impl Gpio,
    bus: &B,
) -> Result<ChipId, PmicError> {
    pinmux::configure_i2c(gpio, &bsp::PMIC_I2C_PINS);

    let device =
        I2cDevice::new(bus, bsp::PMIC_CONTROLLER, bsp::PMIC_ADDRESS)
            .map_err(PmicError::BadAddress)?;
    let pmic = Rk809::new(device);

    let id = pmic.chip_id()?;
    if id.id != RK809_CHIP_ID {
        ringbuf_entry!(Trace::UnexpectedChip(id));
        return Err(PmicError::UnexpectedChip(id));
    }
    ringbuf_entry!(Trace::ChipId(id));

    for (ldo, expected) in bsp::PMIC_FACTORY_DEFAULTS {
        let found = pmic.ldo_vsel(ldo)?;
        if let Some(t) = default_mismatch(ldo, expected, found) {
            ringbuf_entry!(t);
        }
    }

    ringbuf_entry!(Trace::EarlyEnable);
    pmic.write_reg(Register::PowerEn1, bsp::PMIC_EARLY_EN1)?;
    pmic.write_reg(Register::PowerEn3, bsp::PMIC_EARLY_EN3)?;

    for (ldo, mv) in bsp::PMIC_LDO_VOLTAGES {
        let vsel = ldo_vsel(mv);
        ringbuf_entry!(Trace::LdoVsel(ldo, vsel));
        pmic.set_ldo_vsel(ldo, vsel)?;
    }

    ringbuf_entry!(Trace::FinalEnable);
    pmic.write_reg(Register::PowerEn1, bsp::PMIC_FINAL_EN1)?;
    pmic.write_reg(Register::PowerEn2, bsp::PMIC_FINAL_EN2)?;
    pmic.write_reg(Register::PowerEn3, bsp::PMIC_FINAL_EN3)?;

    Ok(id)
}

fn default_mismatch(ldo: Ldo, expected: u8, found: u8) -> Option<Trace> {
    (found != expected).then(|| Trace::DefaultMismatch {
        ldo,
        expected_mv: ldo_millivolts(expected),
        found_mv: ldo_millivolts(found),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Fake, Op};
    use drv_i2c_api::Controller;

    fn writes(fake: &Fake) -> Vec<(u8, u8)> {
        fake.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::I2cWrite(Controller::I2C0, 0x20, reg, value) => {
                    Some((reg, value))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn healthy_pmic() {
        let fake = Fake::new();
        let id = init(&fake, &fake).unwrap();
        assert_eq!(id, ChipId { id: 0x809, version: 0xf });

        assert_eq!(
            writes(&fake),
            [
                (0xb2, 0x11),
                (0xb4, 0x11),
                (0xcc, 0x0c),
                (0xce, 0x0c),
                (0xd0, 0x0c),
                (0xd2, 0x6c),
                (0xd6, 0x6c),
                (0xd8, 0x30),
                (0xda, 0x30),
                (0xdc, 0x30),
                (0xb2, 0xff),
                (0xb3, 0xee),
                (0xb4, 0x55),
            ]
        );
    }

    #[test]
    fn identity_is_read_before_anything_is_written() {
        let fake = Fake::new();
        init(&fake, &fake).unwrap();

        let reads: Vec<u8> = fake
            .ops()
            .into_iter()
            .take_while(|op| !matches!(op, Op::I2cWrite(..)))
            .filter_map(|op| match op {
                Op::I2cRead(_, _, reg) => Some(reg),
                _ => None,
            })
            .collect();
        assert_eq!(reads, [0xed, 0xee, 0xcc, 0xdc]);
    }

    #[test]
    fn bus_pins_are_routed_first() {
        let fake = Fake::new();
        init(&fake, &fake).unwrap();
        let ops = fake.ops();
        let first_i2c = ops
            .iter()
            .position(|op| matches!(op, Op::I2cRead(..)))
            .unwrap();
        let pins = bsp::PMIC_I2C_PINS;
        assert!(ops[..first_i2c].contains(&Op::Function(pins.sda, pins.function)));
    }

    #[test]
    fn wrong_chip_stops_before_any_write() {
        let fake = Fake::new();
        fake.set_pmic_reg(0xed, 0x81);
        fake.set_pmic_reg(0xee, 0x70);

        assert_eq!(
            init(&fake, &fake),
            Err(PmicError::UnexpectedChip(ChipId {
                id: 0x817,
                version: 0
            }))
        );
        assert!(writes(&fake).is_empty());
    }

    #[test]
    fn mismatched_defaults_only_warn() {
        let fake = Fake::new();
        fake.set_pmic_reg(0xcc, 0x20);
        fake.set_pmic_reg(0xdc, 0x00);

        assert!(init(&fake, &fake).is_ok());
        assert_eq!(writes(&fake).len(), 13);
        assert_eq!(fake.pmic_reg(0xcc), 0x0c);
        assert_eq!(fake.pmic_reg(0xdc), 0x30);
    }

    #[test]
    fn mismatches_are_traced_in_millivolts() {
        assert_eq!(default_mismatch(Ldo::Ldo1, 0x0c, 0x0c), None);
        assert_eq!(
            default_mismatch(Ldo::Ldo1, 0x0c, 0x20),
            Some(Trace::DefaultMismatch {
                ldo: Ldo::Ldo1,
                expected_mv: 900,
                found_mv: 1400,
            })
        );
        assert_eq!(
            default_mismatch(Ldo::Ldo9, 0x30, 0x00),
            Some(Trace::DefaultMismatch {
                ldo: Ldo::Ldo9,
                expected_mv: 1800,
                found_mv: 600,
            })
        );
    }

    #[test]
    fn bus_error_aborts_at_the_failing_register() {
        let fake = Fake::new();
        fake.fail_i2c_at(0xd2);

        assert_eq!(
            init(&fake, &fake),
            Err(PmicError::Bus {
                register: Register::Ldo4OnVsel,
                code: ResponseCode::NoRegister,
            })
        );
        // The LDO4 write was the last one tried.
        let w = writes(&fake);
        assert_eq!(w.last(), Some(&(0xd2, 0x6c)));
        assert_eq!(fake.pmic_reg(0xd0), 0x0c);
        assert!(!w.contains(&(0xb2, 0xff)));
    }

    #[test]
    fn read_failure_during_identification() {
        let fake = Fake::new();
        fake.fail_i2c_at(0xed);
        assert_eq!(
            init(&fake, &fake),
            Err(PmicError::Bus {
                register: Register::ChipName,
                code: ResponseCode::NoRegister,
            })
        );
    }
}
