// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CPU clock negotiation with the SCMI clock service.
//!
//! The CPU PLL belongs to trusted firmware. We ask it what rates it will
//! run the cores at, pick the fastest, and ask for that.

use drv_scmi_clock_api::{
    version_parts, ClockId, ClockName, ClockProtocol, ClockRate, RateFormat,
    ScmiError,
};
use heapless::Vec;
use ringbuf::{ringbuf, ringbuf_entry};

/// The cluster clock, as numbered by the firmware.
pub const CPU_CLOCK: ClockId = ClockId(0);

/// Most rates we will take from a discrete rate list.
pub const MAX_RATES: usize = 32;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClockError {
    /// No clock service is present.
    ServiceAbsent,
    /// The service rejected a request.
    Scmi(ScmiError),
    /// The service speaks a protocol version we do not understand.
    UnsupportedVersion(u32),
    /// A sizing query succeeded when it should have asked for a buffer.
    UnexpectedResponse,
    NoRates,
    /// Only explicit rate lists are handled.
    UnsupportedFormat(RateFormat),
    /// More rates than [`MAX_RATES`].
    OutOfResources(u32),
}

impl From<ScmiError> for ClockError {
    fn from(err: ScmiError) -> Self {
        ClockError::Scmi(err)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Trace {
    None,
    Version { major: u16, minor: u16 },
    Attributes { enabled: bool, name: ClockName },
    CurrentRate(u64),
    Rates { format: RateFormat, count: u32 },
    Unsorted { last: u64, max: u64 },
    SetRate(u64),
    Confirmed(u64),
    Failed(ClockError),
}

ringbuf!(Trace, 32, Trace::None);

/// The fastest rate in a discrete rate list. For a provider that lists its
/// rates in ascending order this is the last entry; any other order still
/// yields the maximum.
pub fn select_rate(rates: &[ClockRate]) -> Option<u64> {
    rates
        .iter()
        .filter_map(|r| match *r {
            ClockRate::Discrete { rate } => Some(rate),
            ClockRate::Linear { .. } => None,
        })
        .max()
}

/// Negotiates the CPU clock up to its highest supported rate and returns
/// the rate the service reports afterwards.
///
/// Exactly one `rate_set` is issued on success, and none on any failure.
pub fn negotiate_cpu_clock<C: ClockProtocol>(
    service: Option<&C>,
) -> Result<u64, ClockError> {
    let r = match service {
        Some(service) => negotiate(service),
        None => Err(ClockError::ServiceAbsent),
    };
    if let Err(e) = r {
        ringbuf_entry!(Trace::Failed(e));
    }
    r
}

fn negotiate(service: &impl ClockProtocol) -> Result<u64, ClockError> {
    let version = service.version()?;
    let (major, minor) = version_parts(version);
    ringbuf_entry!(Trace::Version { major, minor });
    if major == 0 {
        return Err(ClockError::UnsupportedVersion(version));
    }

    let attributes = service.attributes(CPU_CLOCK)?;
    ringbuf_entry!(Trace::Attributes {
        enabled: attributes.enabled,
        name: attributes.name,
    });
    ringbuf_entry!(Trace::CurrentRate(service.rate_get(CPU_CLOCK)?));

    // Sizing pass: an empty buffer must be refused with the descriptor.
    let desc = match service.describe_rates(CPU_CLOCK, &mut []) {
        Err(ScmiError::BufferTooSmall(desc)) => desc,
        Err(e) => return Err(e.into()),
        Ok(_) => return Err(ClockError::UnexpectedResponse),
    };
    ringbuf_entry!(Trace::Rates {
        format: desc.format,
        count: desc.total_rates
    });

    if desc.total_rates == 0 {
        return Err(ClockError::NoRates);
    }
    if desc.format != RateFormat::Discrete {
        return Err(ClockError::UnsupportedFormat(desc.format));
    }

    let mut rates: Vec<ClockRate, MAX_RATES> = Vec::new();
    rates
        .resize(desc.total_rates as usize, ClockRate::EMPTY)
        .map_err(|_| ClockError::OutOfResources(desc.total_rates))?;

    let filled = service.describe_rates(CPU_CLOCK, &mut rates)?;
    if filled.format != RateFormat::Discrete {
        return Err(ClockError::UnsupportedFormat(filled.format));
    }
    rates.truncate(filled.total_rates as usize);

    let target = select_rate(&rates).ok_or(ClockError::NoRates)?;
    if let Some(ClockRate::Discrete { rate: last }) = rates.last() {
        if *last != target {
            ringbuf_entry!(Trace::Unsorted {
                last: *last,
                max: target
            });
        }
    }

    ringbuf_entry!(Trace::SetRate(target));
    service.rate_set(CPU_CLOCK, target)?;

    let confirmed = service.rate_get(CPU_CLOCK)?;
    ringbuf_entry!(Trace::Confirmed(confirmed));
    Ok(confirmed)
}
