// ── Network interface section ──

use serde::{Deserialize, Serialize};

use crate::convert::{de_lenient_string, de_lenient_u64, de_string_list};

/// One section of the `interfaces.get` result (`internet`, `lan`, ...).
///
/// Every field is optional: the router omits whatever does not apply to
/// the interface (a LAN bridge has no gateway, a down WAN has no address).
/// Counters accept both numbers and decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub macaddr: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub ipaddr: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub netmask: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub rx_packets: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub rx_octets: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub tx_packets: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub tx_octets: Option<u64>,
    /// Link speed in Mbit/s.
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub speed: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub duplex: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub domain_name: Option<String>,
    #[serde(default, deserialize_with = "de_string_list")]
    pub ip6addr: Vec<String>,
}
