// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPIO-related things needed by bring-up code.

/// The five GPIO controllers. GPIO0 lives in the PMU power domain; the rest
/// are in the logic domain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u8)]
pub enum Bank {
    Gpio0 = 0,
    Gpio1,
    Gpio2,
    Gpio3,
    Gpio4,
}

/// Each bank is divided into four lettered ports of eight pins.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B,
    C,
    D,
}

/// A single pin, e.g. `GPIO3_B0` is `Bank::Gpio3.pin(Port::B, 0)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Pin {
    pub bank: Bank,
    /// 0..32; port A is 0..8, port B 8..16, and so on.
    pub index: u8,
}

impl Bank {
    #[inline(always)]
    pub const fn pin(self, port: Port, n: u8) -> Pin {
        Pin {
            bank: self,
            index: (port as u8) * 8 + (n & 0x7),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Input,
    Output,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Input receiver type. `Schmitt` adds hysteresis, which is what open-drain
/// buses such as I2C want.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputMode {
    Normal,
    Schmitt,
}

/// Pad drive strength. `Default` leaves the pad's reset value alone; levels
/// are the IOC DS selector codes (higher is stronger).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Drive {
    Default,
    Level(u8),
}

/// IOMUX function selector. Function 0 is always plain GPIO.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Function(pub u8);

impl Function {
    pub const GPIO: Self = Self(0);
}

/// Per-pin GPIO and IOMUX operations.
pub trait Gpio {
    fn set_direction(&self, pin: Pin, direction: Direction);
    fn set_pull(&self, pin: Pin, pull: Pull);
    fn set_input_mode(&self, pin: Pin, mode: InputMode);
    fn set_function(&self, pin: Pin, function: Function);
    fn set_drive(&self, pin: Pin, drive: Drive);
    fn set_level(&self, pin: Pin, high: bool);
    fn read_level(&self, pin: Pin) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_indices() {
        assert_eq!(Bank::Gpio0.pin(Port::A, 0).index, 0);
        assert_eq!(Bank::Gpio3.pin(Port::B, 0).index, 8);
        assert_eq!(Bank::Gpio4.pin(Port::C, 1).index, 17);
        assert_eq!(Bank::Gpio2.pin(Port::D, 6).index, 30);
        assert_eq!(Bank::Gpio2.pin(Port::D, 6).bank, Bank::Gpio2);
    }
}
