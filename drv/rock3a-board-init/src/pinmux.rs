// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Table-driven pin multiplexing.

use drv_rk356x_sys_api::{Drive, Function, Gpio, InputMode, Pin, Pull};
use ringbuf::{ringbuf, ringbuf_entry};

/// One row of a pin-mux table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PinMuxEntry {
    /// Signal name, as in the SoC datasheet. Only used for tracing.
    pub name: &'static str,
    pub pin: Pin,
    pub function: Function,
    pub pull: Pull,
    pub drive: Drive,
}

/// The two pins of an I2C bus and the function that routes them to the
/// controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BusPins {
    pub scl: Pin,
    pub sda: Pin,
    pub function: Function,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Trace {
    None,
    Group { first: &'static str, len: usize },
    I2cBus(Pin, Pin),
}

ringbuf!(Trace, 8, Trace::None);

/// Applies every entry in `group`. Pull and drive are set before the
/// function so that the pad is already conditioned when the peripheral
/// takes it over. Entries are independent of each other; applying a group
/// twice leaves the pins as applying it once does.
pub fn apply(gpio: &impl Gpio, group: &[PinMuxEntry]) {
    if let Some(first) = group.first() {
        ringbuf_entry!(Trace::Group {
            first: first.name,
            len: group.len(),
        });
    }

    for entry in group {
        gpio.set_pull(entry.pin, entry.pull);
        if entry.drive != Drive::Default {
            gpio.set_drive(entry.pin, entry.drive);
        }
        gpio.set_function(entry.pin, entry.function);
    }
}

/// Routes an I2C bus: no internal pulls (the board has its own), Schmitt
/// inputs, then the controller function.
pub fn configure_i2c(gpio: &impl Gpio, pins: &BusPins) {
    ringbuf_entry!(Trace::I2cBus(pins.scl, pins.sda));

    for pin in [pins.scl, pins.sda] {
        gpio.set_pull(pin, Pull::None);
        gpio.set_input_mode(pin, InputMode::Schmitt);
        gpio.set_function(pin, pins.function);
    }
}
