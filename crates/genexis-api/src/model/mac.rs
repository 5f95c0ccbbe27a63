// ── Hardware address ──
//
// Routers report MAC addresses in whatever notation their firmware
// prefers. `MacAddress` parses every common notation into six octets and
// always renders as lowercase colon-separated hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A well-formed 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Accepts `aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF`, `aabb.ccdd.eeff`
/// and bare `aabbccddeeff`.
impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMacAddress(raw.to_owned());
        let trimmed = raw.trim();

        let (groups, width): (Vec<&str>, usize) = if trimmed.contains(':') {
            (trimmed.split(':').collect(), 2)
        } else if trimmed.contains('-') {
            (trimmed.split('-').collect(), 2)
        } else if trimmed.contains('.') {
            (trimmed.split('.').collect(), 4)
        } else {
            (vec![trimmed], 12)
        };

        if groups.iter().any(|g| g.len() != width) {
            return Err(invalid());
        }
        let hex = groups.concat();
        if hex.len() != 12 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut octets = [0_u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            let pair = hex.get(i * 2..i * 2 + 2).ok_or_else(invalid)?;
            *octet = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
