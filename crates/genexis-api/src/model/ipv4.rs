// ── IPv4 / DHCP domain types ──

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// A static DHCP reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Reservation {
    pub macaddr: MacAddress,
    pub ipaddr: Ipv4Addr,
    pub enabled: bool,
}

/// An active DHCP lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4DhcpLease {
    pub macaddr: MacAddress,
    pub ipaddr: Ipv4Addr,
    pub hostname: String,
    /// Expiry exactly as the router reported it.
    pub lease_time: String,
}

/// WAN and LAN IPv4 configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Status {
    pub wan_macaddr: MacAddress,
    pub wan_ipv4_ipaddr: Ipv4Addr,
    pub wan_ipv4_gateway: Ipv4Addr,
    pub wan_ipv4_netmask: Ipv4Addr,
    pub wan_ipv4_pridns: Ipv4Addr,
    pub wan_ipv4_snddns: Ipv4Addr,
    pub lan_macaddr: MacAddress,
    pub lan_ipv4_ipaddr: Ipv4Addr,
    pub lan_ipv4_netmask: Ipv4Addr,
    /// First DNS server the DHCP pool hands out, if any.
    pub lan_ipv4_pridns: Option<Ipv4Addr>,
    pub lan_ipv4_dhcp_enable: bool,
}
