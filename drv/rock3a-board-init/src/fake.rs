// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A stand-in for the whole board, for host tests.
//!
//! One `Fake` implements every collaborator trait and records each
//! state-changing call, in order, so tests can check sequencing across
//! subsystems as well as within one.

use crate::gmac::EthernetPhy;
use crate::mac::{Sha256Hasher, UidHasher};
use drv_i2c_api::{Controller, I2cBus, ResponseCode};
use drv_rk356x_sys_api::{
    Cru, Delay, Direction, Drive, Function, Gpio, InputMode, IoDomain,
    IoDomains, Mmio, MultiPhy, MultiPhyMode, Otp, Pin, Pull, SoftReset,
};
use drv_scmi_clock_api::{
    ClockAttributes, ClockId, ClockName, ClockProtocol, ClockRate,
    RatesDescriptor, ScmiError, ScmiStatus,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Op {
    Domain(IoDomain, u16),
    Pull(Pin, Pull),
    Drive(Pin, Drive),
    InputMode(Pin, InputMode),
    Function(Pin, Function),
    Direction(Pin, Direction),
    Level(Pin, bool),
    Mmio(usize, u32),
    AssertReset(SoftReset),
    DeassertReset(SoftReset),
    SdmmcClock(u8, u64),
    OtpRead(usize, usize),
    PhyMode(u8, MultiPhyMode),
    DelayUs(u32),
    I2cRead(Controller, u8, u8),
    I2cWrite(Controller, u8, u8, u8),
    ScmiVersion,
    RateGet(ClockId),
    RateSet(ClockId, u64),
    DescribeRates(usize),
    PhyInit(usize),
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PinState {
    pub pull: Option<Pull>,
    pub drive: Option<Drive>,
    pub input_mode: Option<InputMode>,
    pub function: Option<Function>,
    pub direction: Option<Direction>,
    pub high: bool,
}

/// What the clock service does with an empty `describe_rates` buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sizing {
    /// Refuses it and reports the size, as it should.
    Normal,
    Succeeds,
    Fails(ScmiStatus),
}

pub struct Fake {
    log: RefCell<Vec<Op>>,
    pins: RefCell<BTreeMap<Pin, PinState>>,
    mmio: RefCell<BTreeMap<usize, u32>>,

    pmic: RefCell<[u8; 256]>,
    i2c_fail: Cell<Option<u8>>,

    otp: Cell<[u8; 32]>,
    digest: Cell<Option<[u8; 32]>>,
    hashed: RefCell<Option<Vec<u8>>>,

    scmi_version: Cell<u32>,
    clock_name: Cell<ClockName>,
    rates: RefCell<Vec<ClockRate>>,
    current_rate: Cell<u64>,
    sizing: Cell<Sizing>,
}

impl Fake {
    /// A healthy board: an RK809 with its reset defaults, and a clock
    /// service offering the usual RK3568 operating points.
    pub fn new() -> Self {
        let mut pmic = [0u8; 256];
        pmic[0xed] = 0x80;
        pmic[0xee] = 0x9f;
        pmic[0xcc] = 0x0c;
        pmic[0xdc] = 0x30;

        let rates = [
            408_000_000u64,
            600_000_000,
            816_000_000,
            1_104_000_000,
            1_416_000_000,
            1_608_000_000,
            1_800_000_000,
            1_992_000_000,
        ]
        .into_iter()
        .map(|rate| ClockRate::Discrete { rate })
        .collect();

        Self {
            log: RefCell::new(Vec::new()),
            pins: RefCell::new(BTreeMap::new()),
            mmio: RefCell::new(BTreeMap::new()),
            pmic: RefCell::new(pmic),
            i2c_fail: Cell::new(None),
            otp: Cell::new([0x42; 32]),
            digest: Cell::new(None),
            hashed: RefCell::new(None),
            scmi_version: Cell::new(0x0002_0000),
            clock_name: Cell::new(ClockName::new("scmi_clk_cpu")),
            rates: RefCell::new(rates),
            current_rate: Cell::new(816_000_000),
            sizing: Cell::new(Sizing::Normal),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.log.borrow().clone()
    }

    pub fn pin(&self, pin: Pin) -> PinState {
        self.pins.borrow().get(&pin).copied().unwrap_or_default()
    }

    pub fn mmio(&self, addr: usize) -> Option<u32> {
        self.mmio.borrow().get(&addr).copied()
    }

    pub fn pmic_reg(&self, reg: u8) -> u8 {
        self.pmic.borrow()[reg as usize]
    }

    pub fn set_pmic_reg(&self, reg: u8, value: u8) {
        self.pmic.borrow_mut()[reg as usize] = value;
    }

    /// Every transaction touching `reg` fails from now on.
    pub fn fail_i2c_at(&self, reg: u8) {
        self.i2c_fail.set(Some(reg));
    }

    pub fn set_otp(&self, uid: [u8; 32]) {
        self.otp.set(uid);
    }

    /// Makes the hasher return a digest starting with `prefix`.
    pub fn set_digest(&self, prefix: [u8; 6]) {
        let mut digest = [0u8; 32];
        digest[..6].copy_from_slice(&prefix);
        self.digest.set(Some(digest));
    }

    /// What was last passed to the hasher.
    pub fn hashed(&self) -> Option<Vec<u8>> {
        self.hashed.borrow().clone()
    }

    pub fn set_scmi_version(&self, version: u32) {
        self.scmi_version.set(version);
    }

    pub fn set_clock_name(&self, name: &str) {
        self.clock_name.set(ClockName::new(name));
    }

    pub fn set_rates(&self, rates: Vec<ClockRate>) {
        *self.rates.borrow_mut() = rates;
    }

    pub fn rate_count(&self) -> usize {
        self.rates.borrow().len()
    }

    pub fn set_sizing(&self, sizing: Sizing) {
        self.sizing.set(sizing);
    }

    fn record(&self, op: Op) {
        self.log.borrow_mut().push(op);
    }

    fn update_pin(&self, pin: Pin, f: impl FnOnce(&mut PinState)) {
        f(self.pins.borrow_mut().entry(pin).or_default());
    }
}

impl Gpio for Fake {
    fn set_direction(&self, pin: Pin, direction: Direction) {
        self.record(Op::Direction(pin, direction));
        self.update_pin(pin, |s| s.direction = Some(direction));
    }

    fn set_pull(&self, pin: Pin, pull: Pull) {
        self.record(Op::Pull(pin, pull));
        self.update_pin(pin, |s| s.pull = Some(pull));
    }

    fn set_input_mode(&self, pin: Pin, mode: InputMode) {
        self.record(Op::InputMode(pin, mode));
        self.update_pin(pin, |s| s.input_mode = Some(mode));
    }

    fn set_function(&self, pin: Pin, function: Function) {
        self.record(Op::Function(pin, function));
        self.update_pin(pin, |s| s.function = Some(function));
    }

    fn set_drive(&self, pin: Pin, drive: Drive) {
        self.record(Op::Drive(pin, drive));
        self.update_pin(pin, |s| s.drive = Some(drive));
    }

    fn set_level(&self, pin: Pin, high: bool) {
        self.record(Op::Level(pin, high));
        self.update_pin(pin, |s| s.high = high);
    }

    fn read_level(&self, pin: Pin) -> bool {
        self.pin(pin).high
    }
}

impl Mmio for Fake {
    fn read32(&self, addr: usize) -> u32 {
        self.mmio(addr).unwrap_or(0)
    }

    fn write32(&self, addr: usize, value: u32) {
        self.record(Op::Mmio(addr, value));
        self.mmio.borrow_mut().insert(addr, value);
    }
}

impl Cru for Fake {
    fn assert_soft_reset(&self, reset: SoftReset) {
        self.record(Op::AssertReset(reset));
    }

    fn deassert_soft_reset(&self, reset: SoftReset) {
        self.record(Op::DeassertReset(reset));
    }

    fn set_sdmmc_clock_rate(&self, index: u8, hz: u64) {
        self.record(Op::SdmmcClock(index, hz));
    }
}

impl Otp for Fake {
    fn read_otp(&self, offset: usize, buf: &mut [u8]) {
        self.record(Op::OtpRead(offset, buf.len()));
        let otp = self.otp.get();
        for (i, b) in buf.iter_mut().enumerate() {
            *b = otp.get(offset + i).copied().unwrap_or(0);
        }
    }
}

impl IoDomains for Fake {
    fn set_domain_voltage(&self, domain: IoDomain, millivolts: u16) {
        self.record(Op::Domain(domain, millivolts));
    }
}

impl MultiPhy for Fake {
    fn set_mode(&self, lane: u8, mode: MultiPhyMode) {
        self.record(Op::PhyMode(lane, mode));
    }
}

impl Delay for Fake {
    fn delay_us(&self, us: u32) {
        self.record(Op::DelayUs(us));
    }
}

impl I2cBus for Fake {
    fn read_reg(
        &self,
        controller: Controller,
        address: u8,
        reg: u8,
    ) -> Result<u8, ResponseCode> {
        self.record(Op::I2cRead(controller, address, reg));
        if self.i2c_fail.get() == Some(reg) {
            return Err(ResponseCode::NoRegister);
        }
        Ok(self.pmic_reg(reg))
    }

    fn write_reg(
        &self,
        controller: Controller,
        address: u8,
        reg: u8,
        value: u8,
    ) -> Result<(), ResponseCode> {
        self.record(Op::I2cWrite(controller, address, reg, value));
        if self.i2c_fail.get() == Some(reg) {
            return Err(ResponseCode::NoRegister);
        }
        self.set_pmic_reg(reg, value);
        Ok(())
    }
}

impl ClockProtocol for Fake {
    fn version(&self) -> Result<u32, ScmiError> {
        self.record(Op::ScmiVersion);
        Ok(self.scmi_version.get())
    }

    fn attributes(
        &self,
        _clock: ClockId,
    ) -> Result<ClockAttributes, ScmiError> {
        Ok(ClockAttributes {
            enabled: true,
            name: self.clock_name.get(),
        })
    }

    fn rate_get(&self, clock: ClockId) -> Result<u64, ScmiError> {
        self.record(Op::RateGet(clock));
        Ok(self.current_rate.get())
    }

    fn rate_set(&self, clock: ClockId, rate: u64) -> Result<(), ScmiError> {
        self.record(Op::RateSet(clock, rate));
        self.current_rate.set(rate);
        Ok(())
    }

    fn describe_rates(
        &self,
        _clock: ClockId,
        buf: &mut [ClockRate],
    ) -> Result<RatesDescriptor, ScmiError> {
        self.record(Op::DescribeRates(buf.len()));
        let rates = self.rates.borrow();
        let desc = RatesDescriptor {
            format: rates.first().unwrap_or(&ClockRate::EMPTY).format(),
            total_rates: rates.len() as u32,
            required_size: rates.len() * ClockRate::WIRE_SIZE,
        };

        if buf.is_empty() {
            return match self.sizing.get() {
                Sizing::Normal => Err(ScmiError::BufferTooSmall(desc)),
                Sizing::Succeeds => Ok(desc),
                Sizing::Fails(status) => Err(status.into()),
            };
        }
        if buf.len() < rates.len() {
            return Err(ScmiError::BufferTooSmall(desc));
        }
        buf[..rates.len()].copy_from_slice(&rates);
        Ok(desc)
    }
}

impl UidHasher for Fake {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        *self.hashed.borrow_mut() = Some(data.to_vec());
        self.digest
            .get()
            .unwrap_or_else(|| Sha256Hasher.digest(data))
    }
}

impl EthernetPhy for Fake {
    fn init(&self, mac_base: usize) {
        self.record(Op::PhyInit(mac_base));
    }
}
