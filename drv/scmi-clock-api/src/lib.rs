// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client API for an SCMI clock management service.
//!
//! On RK356x the CPU clock is owned by trusted firmware, and everything else
//! asks it for changes through the Arm System Control and Management
//! Interface. This crate describes the clock protocol as the bring-up code
//! consumes it: one method per protocol message.
//!
//! # Rate discovery
//!
//! `describe_rates` follows a describe-then-fetch pattern. Called with a
//! buffer too small for the clock's rate list (including an empty one), it
//! fails with [`ScmiError::BufferTooSmall`], which still carries a
//! [`RatesDescriptor`] giving the format, the number of rates, and the
//! number of bytes needed. Called again with room for that many entries, it
//! fills the buffer and returns the same descriptor.

#![cfg_attr(target_os = "none", no_std)]

/// Maximum length of an SCMI name string, including the terminating NUL.
pub const SCMI_MAX_STR_LEN: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClockId(pub u32);

/// Status codes defined by the SCMI specification, other than success.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum ScmiStatus {
    NotSupported = -1,
    InvalidParameters = -2,
    Denied = -3,
    NotFound = -4,
    OutOfRange = -5,
    Busy = -6,
    CommsError = -7,
    GenericError = -8,
    HardwareError = -9,
    ProtocolError = -10,
}

/// How a clock's supported rates are described.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateFormat {
    /// An explicit list of rates.
    Discrete,
    /// A single `{ min, max, step }` range.
    Linear,
}

/// One entry of a `describe_rates` reply.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClockRate {
    Discrete { rate: u64 },
    Linear { min: u64, max: u64, step: u64 },
}

impl ClockRate {
    /// Placeholder used to size buffers before a fetch.
    pub const EMPTY: Self = Self::Discrete { rate: 0 };

    /// Size of one entry as the service counts it.
    pub const WIRE_SIZE: usize = 3 * core::mem::size_of::<u64>();

    pub fn format(&self) -> RateFormat {
        match self {
            ClockRate::Discrete { .. } => RateFormat::Discrete,
            ClockRate::Linear { .. } => RateFormat::Linear,
        }
    }
}

/// Summary returned with every `describe_rates` call, successful or not.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RatesDescriptor {
    pub format: RateFormat,
    pub total_rates: u32,
    /// Bytes required to hold every entry, at [`ClockRate::WIRE_SIZE`] each.
    pub required_size: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScmiError {
    Status(ScmiStatus),
    BufferTooSmall(RatesDescriptor),
}

impl From<ScmiStatus> for ScmiError {
    fn from(status: ScmiStatus) -> Self {
        ScmiError::Status(status)
    }
}

/// A clock's NUL-padded name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClockName(pub [u8; SCMI_MAX_STR_LEN]);

impl ClockName {
    pub fn new(name: &str) -> Self {
        let mut buf = [0; SCMI_MAX_STR_LEN];
        let n = name.len().min(SCMI_MAX_STR_LEN - 1);
        buf[..n].copy_from_slice(&name.as_bytes()[..n]);
        Self(buf)
    }

    /// The name up to its first NUL, or `"?"` if that is not UTF-8.
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        core::str::from_utf8(&self.0[..len]).unwrap_or("?")
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClockAttributes {
    pub enabled: bool,
    pub name: ClockName,
}

/// Splits a protocol version word into `(major, minor)`.
pub const fn version_parts(version: u32) -> (u16, u16) {
    ((version >> 16) as u16, version as u16)
}

/// The SCMI clock management protocol.
pub trait ClockProtocol {
    /// PROTOCOL_VERSION: major in the upper half, minor in the lower.
    fn version(&self) -> Result<u32, ScmiError>;

    /// CLOCK_ATTRIBUTES
    fn attributes(&self, clock: ClockId)
        -> Result<ClockAttributes, ScmiError>;

    /// CLOCK_RATE_GET, in Hz.
    fn rate_get(&self, clock: ClockId) -> Result<u64, ScmiError>;

    /// CLOCK_RATE_SET, in Hz.
    fn rate_set(&self, clock: ClockId, rate: u64) -> Result<(), ScmiError>;

    /// CLOCK_DESCRIBE_RATES. See the crate documentation for the sizing
    /// protocol.
    fn describe_rates(
        &self,
        clock: ClockId,
        rates: &mut [ClockRate],
    ) -> Result<RatesDescriptor, ScmiError>;
}
