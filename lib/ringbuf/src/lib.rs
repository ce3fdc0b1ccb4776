// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trace ring buffers for early-boot code
//!
//! Board bring-up runs before there is a console, a log sink, or anything
//! else that could take formatted text. Instead, each module that wants to
//! record what it did declares a small static ring of `Copy` payloads (usually
//! a module-local `Trace` enum) and appends to it as it goes. After boot, or
//! after a hang, the rings are read out of RAM with a debugger.
//!
//! ## Declaring and recording
//!
//! ```ignore
//! #[derive(Copy, Clone, PartialEq)]
//! enum Trace {
//!     None,
//!     ChipId(u16),
//! }
//!
//! ringbuf!(Trace, 16, Trace::None);
//!
//! ringbuf_entry!(Trace::ChipId(0x809));
//! ```
//!
//! A name can be given to keep more than one ring in a module:
//!
//! ```ignore
//! ringbuf!(PHY_RINGBUF, Trace, 8, Trace::None);
//! ringbuf_entry!(PHY_RINGBUF, Trace::ChipId(0x809));
//! ```
//!
//! Recording the same payload from the same source line twice in a row bumps
//! the `count` of the newest entry rather than taking a new slot, so a polling
//! loop does not wash older history out of the ring.
//!
//! ## Inspecting with GDB
//!
//! ```console
//! (gdb) set print pretty on
//! (gdb) print drv_rock3a_board_init::pmic::__RINGBUF
//! ```
//!
//! The static is a `spin::Mutex` around a [`Ringbuf`]; `data.last` is the
//! index of the newest entry and `generation` tells how many times a slot has
//! been reused.

#![cfg_attr(target_os = "none", no_std)]

/// Re-exported so that code generated by the macros can always name it.
pub use spin::Mutex;

/// Declares a ring buffer in the current module.
///
/// `ringbuf!(NAME, Type, N, expr)` makes a static named `NAME` holding `N`
/// entries of `Type`, all initialized to `expr`. If the name is omitted it
/// defaults to `__RINGBUF`.
#[cfg(not(feature = "disabled"))]
#[macro_export]
macro_rules! ringbuf {
    ($name:ident, $t:ty, $n:expr, $init:expr) => {
        #[used]
        static $name: $crate::Mutex<$crate::Ringbuf<$t, $n>> =
            $crate::Mutex::new($crate::Ringbuf::new($init));
    };
    ($t:ty, $n:expr, $init:expr) => {
        $crate::ringbuf!(__RINGBUF, $t, $n, $init);
    };
}

#[cfg(feature = "disabled")]
#[macro_export]
macro_rules! ringbuf {
    ($name:ident, $t:ty, $n:expr, $init:expr) => {
        #[allow(dead_code)]
        const _: $t = $init;
    };
    ($t:ty, $n:expr, $init:expr) => {
        #[allow(dead_code)]
        const _: $t = $init;
    };
}

/// Appends a payload to a ring buffer declared with [`ringbuf!`].
///
/// `ringbuf_entry!(NAME, expr)` records `expr` in `NAME`; with no name the
/// module's `__RINGBUF` is used.
#[cfg(not(feature = "disabled"))]
#[macro_export]
macro_rules! ringbuf_entry {
    ($buf:expr, $payload:expr) => {{
        // Evaluate the payload before taking the lock so that a payload
        // expression which itself traces cannot deadlock on the same ring.
        let p = $payload;
        $crate::Ringbuf::entry(&mut *$buf.lock(), line!() as u16, p);
    }};
    ($payload:expr) => {
        $crate::ringbuf_entry!(__RINGBUF, $payload);
    };
}

#[cfg(feature = "disabled")]
#[macro_export]
macro_rules! ringbuf_entry {
    ($buf:expr, $payload:expr) => {{
        let _ = &$payload;
    }};
    ($payload:expr) => {{
        let _ = &$payload;
    }};
}

/// One slot of a [`Ringbuf`].
#[derive(Debug, Copy, Clone)]
pub struct RingbufEntry<T: Copy + PartialEq> {
    pub line: u16,
    pub generation: u16,
    pub count: u32,
    pub payload: T,
}

/// A fixed-size ring of trace entries. See [`ringbuf!`].
#[derive(Debug)]
pub struct Ringbuf<T: Copy + PartialEq, const N: usize> {
    pub last: Option<usize>,
    pub buffer: [RingbufEntry<T>; N],
}

impl<T: Copy + PartialEq, const N: usize> Ringbuf<T, N> {
    pub const fn new(init: T) -> Self {
        Self {
            last: None,
            buffer: [RingbufEntry {
                line: 0,
                generation: 0,
                count: 0,
                payload: init,
            }; N],
        }
    }

    pub fn entry(&mut self, line: u16, payload: T) {
        if let Some(ent) = self.last.and_then(|i| self.buffer.get_mut(i)) {
            if ent.line == line && ent.payload == payload {
                if let Some(count) = ent.count.checked_add(1) {
                    ent.count = count;
                    return;
                }
            }
        }

        // A corrupt `last` restarts the ring at slot 0 instead of panicking.
        let ndx = match self.last.map(|i| i.wrapping_add(1)) {
            Some(next) if next < N => next,
            _ => 0,
        };
        let Some(ent) = self.buffer.get_mut(ndx) else {
            // Zero-length ring.
            return;
        };
        *ent = RingbufEntry {
            line,
            generation: ent.generation.wrapping_add(1),
            count: 1,
            payload,
        };
        self.last = Some(ndx);
    }

    /// Iterates over recorded entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RingbufEntry<T>> + '_ {
        let start = self.last.map_or(0, |i| i.saturating_add(1));
        let (newer, older) = self.buffer.split_at(start.min(N));
        older
            .iter()
            .chain(newer.iter())
            .filter(|ent| ent.generation != 0)
    }
}
