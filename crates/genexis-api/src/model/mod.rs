// ── Domain model ──
//
// Typed records returned by the `Session::get_*` methods. Every record is
// built fresh per call from the raw RPC results and owned by the caller.

pub mod interface;
pub mod ipv4;
pub mod mac;
pub mod status;

use serde::{Deserialize, Serialize};

pub use interface::Interface;
pub use ipv4::{Ipv4DhcpLease, Ipv4Reservation, Ipv4Status};
pub use mac::MacAddress;
pub use status::{Device, Status, StatusBuilder, WanAddressing};

/// Hardware and firmware identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firmware {
    pub hardware_version: String,
    pub model: String,
    pub firmware_version: String,
}
