// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable MAC address derivation.
//!
//! The board has no EEPROM with an assigned address, so one is made up from
//! the SoC's unique id: hash it, keep the first six bytes, and mark the
//! result as a locally administered unicast address. The same chip always
//! gets the same address.

use crate::bsp;
use drv_rk356x_sys_api::Otp;
use sha2::{Digest, Sha256};

/// Something that reduces the unique id to a fixed-size digest.
pub trait UidHasher {
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// SHA-256.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sha256Hasher;

impl UidHasher for Sha256Hasher {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Takes the first six bytes of `digest`, clears the multicast bit and
    /// sets the locally-administered bit.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut mac = [0; 6];
        mac.copy_from_slice(&digest[..6]);
        mac[0] &= !0b01;
        mac[0] |= 0b10;
        Self(mac)
    }

    /// The first four octets, most significant first, as the MAC address
    /// low register wants them.
    pub fn low_word(&self) -> u32 {
        let [b0, b1, b2, b3, _, _] = self.0;
        u32::from_be_bytes([b0, b1, b2, b3])
    }

    /// The last two octets.
    pub fn high_word(&self) -> u32 {
        let [_, _, _, _, b4, b5] = self.0;
        u16::from_be_bytes([b4, b5]) as u32
    }
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Reads the unique id out of OTP and derives this board's address from it.
pub fn derive(otp: &impl Otp, hasher: &impl UidHasher) -> MacAddress {
    let mut uid = [0u8; bsp::OTP_UID_LEN];
    otp.read_otp(bsp::OTP_UID_OFFSET, &mut uid);
    MacAddress::from_digest(&hasher.digest(&uid))
}
