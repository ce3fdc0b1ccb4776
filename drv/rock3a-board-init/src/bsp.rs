// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ROCK-3A board description: which pins go where, which rails carry what.
//!
//! Everything here is fixed for the board revision; there is no probing.

use crate::pinmux::{BusPins, PinMuxEntry};
use crate::VoltageDomain;
use drv_i2c_api::Controller;
use drv_i2c_devices::rk809::{ldo_vsel, power_en, Ldo};
use drv_rk356x_sys_api::{
    Bank, Drive, Function, IoDomain, Pin, Port, Pull, SoftReset,
};
use static_assertions::const_assert_eq;

////////////////////////////////////////////////////////////////////////////////
// I/O domains

/// Supply voltage of each I/O domain, as wired on this board.
pub const IO_DOMAINS: [VoltageDomain; 8] = [
    VoltageDomain::new(IoDomain::Pmuio2, 3300),
    VoltageDomain::new(IoDomain::Vccio1, 3300),
    VoltageDomain::new(IoDomain::Vccio2, 1800),
    VoltageDomain::new(IoDomain::Vccio3, 3300),
    VoltageDomain::new(IoDomain::Vccio4, 1800),
    VoltageDomain::new(IoDomain::Vccio5, 3300),
    VoltageDomain::new(IoDomain::Vccio6, 1800),
    VoltageDomain::new(IoDomain::Vccio7, 3300),
];

////////////////////////////////////////////////////////////////////////////////
// PMIC

pub const PMIC_CONTROLLER: Controller = Controller::I2C0;
pub const PMIC_ADDRESS: u8 = 0x20;

pub const PMIC_I2C_PINS: BusPins = BusPins {
    scl: Bank::Gpio0.pin(Port::B, 1),
    sda: Bank::Gpio0.pin(Port::B, 2),
    function: Function(1),
};

/// Selector values the PMIC powers up with. Anything else means either a
/// different OTP load or that something has already been here.
pub const PMIC_FACTORY_DEFAULTS: [(Ldo, u8); 2] =
    [(Ldo::Ldo1, 0x0c), (Ldo::Ldo9, 0x30)];

/// Phase one: LDO1 and LDO9 on at whatever they are set to.
pub const PMIC_EARLY_EN1: u8 = power_en(0b0001);
pub const PMIC_EARLY_EN3: u8 = power_en(0b0001);

/// Phase two, in register order. LDO5 (vccio_sd) is left alone.
pub const PMIC_LDO_VOLTAGES: [(Ldo, u16); 8] = [
    (Ldo::Ldo1, 900),
    (Ldo::Ldo2, 900),
    (Ldo::Ldo3, 900),
    (Ldo::Ldo4, 3300),
    (Ldo::Ldo6, 3300),
    (Ldo::Ldo7, 1800),
    (Ldo::Ldo8, 1800),
    (Ldo::Ldo9, 1800),
];

/// Phase three: every buck and switch, LDO2-4 and LDO6-9.
pub const PMIC_FINAL_EN1: u8 = power_en(0b1111);
pub const PMIC_FINAL_EN2: u8 = power_en(0b1110);
pub const PMIC_FINAL_EN3: u8 = power_en(0b0101);

const_assert_eq!(PMIC_EARLY_EN1, 0x11);
const_assert_eq!(PMIC_FINAL_EN1, 0xff);
const_assert_eq!(PMIC_FINAL_EN2, 0xee);
const_assert_eq!(PMIC_FINAL_EN3, 0x55);
const_assert_eq!(ldo_vsel(PMIC_LDO_VOLTAGES[0].1), 0x0c);
const_assert_eq!(ldo_vsel(PMIC_LDO_VOLTAGES[3].1), 0x6c);
const_assert_eq!(ldo_vsel(PMIC_LDO_VOLTAGES[7].1), 0x30);

////////////////////////////////////////////////////////////////////////////////
// RTC

/// HYM8563 real-time clock bus.
pub const RTC_I2C_PINS: BusPins = BusPins {
    scl: Bank::Gpio3.pin(Port::B, 3),
    sda: Bank::Gpio3.pin(Port::B, 4),
    function: Function(4),
};

////////////////////////////////////////////////////////////////////////////////
// CPU

/// Core PVTPLL ring oscillator length selector.
pub const CPU_PVTPLL_RING_LENGTH: u8 = 5;

////////////////////////////////////////////////////////////////////////////////
// Ethernet

const GMAC1_FUNCTION: Function = Function(3);

const fn gmac1(name: &'static str, pin: Pin, drive: Drive) -> PinMuxEntry {
    PinMuxEntry {
        name,
        pin,
        function: GMAC1_FUNCTION,
        pull: Pull::None,
        drive,
    }
}

/// GMAC1 RGMII, M1 routing. The transmit data lines and clock get stronger
/// drivers to keep edges clean at 125 MHz.
pub const GMAC1_PINS: [PinMuxEntry; 15] = [
    gmac1("gmac1_mdcm1", Bank::Gpio4.pin(Port::B, 6), Drive::Default),
    gmac1("gmac1_mdiom1", Bank::Gpio4.pin(Port::B, 7), Drive::Default),
    gmac1("gmac1_txd0m1", Bank::Gpio4.pin(Port::A, 4), Drive::Level(2)),
    gmac1("gmac1_txd1m1", Bank::Gpio4.pin(Port::A, 5), Drive::Level(2)),
    gmac1("gmac1_txenm1", Bank::Gpio4.pin(Port::A, 6), Drive::Default),
    gmac1("gmac1_rxd0m1", Bank::Gpio4.pin(Port::A, 7), Drive::Default),
    gmac1("gmac1_rxd1m1", Bank::Gpio4.pin(Port::B, 0), Drive::Default),
    gmac1("gmac1_rxdvcrsm1", Bank::Gpio4.pin(Port::B, 1), Drive::Default),
    gmac1("gmac1_rxclkm1", Bank::Gpio4.pin(Port::A, 3), Drive::Default),
    gmac1("gmac1_txclkm1", Bank::Gpio4.pin(Port::A, 0), Drive::Level(1)),
    gmac1("gmac1_mclkinoutm1", Bank::Gpio4.pin(Port::C, 1), Drive::Default),
    gmac1("gmac1_rxd2m1", Bank::Gpio4.pin(Port::A, 1), Drive::Default),
    gmac1("gmac1_rxd3m1", Bank::Gpio4.pin(Port::A, 2), Drive::Default),
    gmac1("gmac1_txd2m1", Bank::Gpio3.pin(Port::D, 6), Drive::Level(2)),
    gmac1("gmac1_txd3m1", Bank::Gpio3.pin(Port::D, 7), Drive::Level(2)),
];

pub const GMAC1_SOFT_RESET: SoftReset = SoftReset { con: 14, bit: 12 };

/// RTL8211F reset line. Active low.
pub const GMAC1_PHY_RESET: Pin = Bank::Gpio3.pin(Port::B, 0);

/// RGMII clock delay line settings for this board's trace lengths.
pub const GMAC1_TX_DELAY: u8 = 0x42;
pub const GMAC1_RX_DELAY: u8 = 0x28;

/// PHY reset timing, in milliseconds. These are minimums.
pub const PHY_RESET_SETUP_MS: u32 = 1;
pub const PHY_RESET_ASSERT_MS: u32 = 20;
pub const PHY_RESET_RECOVERY_MS: u32 = 100;

/// Where the SoC unique id lives in OTP, and how long it is.
pub const OTP_UID_OFFSET: usize = 0;
pub const OTP_UID_LEN: usize = 32;

////////////////////////////////////////////////////////////////////////////////
// PCIe

const PCIE30X2_FUNCTION: Function = Function(4);

/// PCIe 3.0 x2 root port sideband, M1 routing.
pub const PCIE30X2_PINS: [PinMuxEntry; 3] = [
    PinMuxEntry {
        name: "pcie30x2_clkreqnm1",
        pin: Bank::Gpio2.pin(Port::D, 4),
        function: PCIE30X2_FUNCTION,
        pull: Pull::None,
        drive: Drive::Default,
    },
    PinMuxEntry {
        name: "pcie30x2_perstnm1",
        pin: Bank::Gpio2.pin(Port::D, 6),
        function: PCIE30X2_FUNCTION,
        pull: Pull::None,
        drive: Drive::Default,
    },
    PinMuxEntry {
        name: "pcie30x2_wakenm1",
        pin: Bank::Gpio2.pin(Port::D, 5),
        function: PCIE30X2_FUNCTION,
        pull: Pull::None,
        drive: Drive::Default,
    },
];

/// Enable for the 100 MHz reference clock generator. Active low.
pub const PCIE_CLKGEN_EN_L: Pin = Bank::Gpio0.pin(Port::D, 4);

////////////////////////////////////////////////////////////////////////////////
// USB

/// Combo PHY lanes carrying the USB 3.0 ports.
pub const USB3_PHY_LANES: [u8; 2] = [0, 1];

/// VBUS switch for the host ports.
pub const USB_HOST_PWR_EN: Pin = Bank::Gpio0.pin(Port::A, 6);

////////////////////////////////////////////////////////////////////////////////
// Wi-Fi module

pub const WIFI_SDMMC: u8 = 2;
pub const WIFI_SDMMC_CLOCK_HZ: u64 = 100_000_000;

const fn sdmmc2(name: &'static str, pin: Pin) -> PinMuxEntry {
    PinMuxEntry {
        name,
        pin,
        function: Function(3),
        pull: Pull::Up,
        drive: Drive::Level(2),
    }
}

pub const SDMMC2_PINS: [PinMuxEntry; 6] = [
    sdmmc2("sdmmc2_d0m0", Bank::Gpio3.pin(Port::C, 6)),
    sdmmc2("sdmmc2_d1m0", Bank::Gpio3.pin(Port::C, 7)),
    sdmmc2("sdmmc2_d2m0", Bank::Gpio3.pin(Port::D, 0)),
    sdmmc2("sdmmc2_d3m0", Bank::Gpio3.pin(Port::D, 1)),
    sdmmc2("sdmmc2_cmdm0", Bank::Gpio3.pin(Port::D, 2)),
    sdmmc2("sdmmc2_clkm0", Bank::Gpio3.pin(Port::D, 3)),
];

pub const WIFI_REG_ON: Pin = Bank::Gpio3.pin(Port::D, 5);

pub const WIFI_POWER_SETUP_MS: u32 = 1;
pub const WIFI_POWER_OFF_MS: u32 = 500;
pub const WIFI_POWER_ON_MS: u32 = 100;

const_assert_eq!(GMAC1_PINS.len(), 15);
const_assert_eq!(PCIE30X2_PINS.len(), 3);
const_assert_eq!(SDMMC2_PINS.len(), 6);
