// ── Router status snapshot ──

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;
use crate::error::Error;

/// One client discovered by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub macaddr: MacAddress,
    /// `0.0.0.0` when the router holds no lease for the device.
    pub ipaddr: Ipv4Addr,
    pub hostname: String,
}

/// Composite snapshot assembled from five RPC calls.
///
/// WAN fields are `None` when the router reports no `internet` section.
/// Radio flags are `None` when no interface for that band was reported.
/// The client counters are not exposed by the router firmware and stay
/// `None`; `clients_total` counts discovered devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub wan_macaddr: Option<MacAddress>,
    pub lan_macaddr: MacAddress,
    pub wan_ipv4_addr: Option<Ipv4Addr>,
    pub lan_ipv4_addr: Option<Ipv4Addr>,
    pub wan_ipv4_gateway: Option<Ipv4Addr>,
    pub wired_total: Option<u32>,
    pub wifi_clients_total: Option<u32>,
    pub guest_clients_total: Option<u32>,
    pub clients_total: usize,
    pub guest_2g_enable: Option<bool>,
    pub guest_5g_enable: Option<bool>,
    pub wifi_2g_enable: Option<bool>,
    pub wifi_5g_enable: Option<bool>,
    /// In the order of the router's discovery list.
    pub devices: Vec<Device>,
}

/// WAN addressing reported in the `internet` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WanAddressing {
    pub macaddr: MacAddress,
    pub ipaddr: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

/// Collects the parts of a [`Status`] as the RPC results come in.
///
/// Nothing is visible to callers until [`build`](Self::build) succeeds,
/// which requires at least the LAN hardware address.
#[derive(Debug, Clone, Default)]
pub struct StatusBuilder {
    wan: Option<WanAddressing>,
    lan_macaddr: Option<MacAddress>,
    lan_ipv4_addr: Option<Ipv4Addr>,
    guest_2g_enable: Option<bool>,
    guest_5g_enable: Option<bool>,
    wifi_2g_enable: Option<bool>,
    wifi_5g_enable: Option<bool>,
    devices: Vec<Device>,
}

impl StatusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wan(mut self, wan: Option<WanAddressing>) -> Self {
        self.wan = wan;
        self
    }

    pub fn lan_macaddr(mut self, mac: MacAddress) -> Self {
        self.lan_macaddr = Some(mac);
        self
    }

    pub fn lan_ipv4_addr(mut self, addr: Option<Ipv4Addr>) -> Self {
        self.lan_ipv4_addr = addr;
        self
    }

    /// Guest radio flags for the 2.4GHz and 5GHz bands.
    pub fn guest_enable(mut self, band_2g: Option<bool>, band_5g: Option<bool>) -> Self {
        self.guest_2g_enable = band_2g;
        self.guest_5g_enable = band_5g;
        self
    }

    /// Main radio flags for the 2.4GHz and 5GHz bands.
    pub fn wifi_enable(mut self, band_2g: Option<bool>, band_5g: Option<bool>) -> Self {
        self.wifi_2g_enable = band_2g;
        self.wifi_5g_enable = band_5g;
        self
    }

    pub fn devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }

    pub fn build(self) -> Result<Status, Error> {
        let lan_macaddr = self
            .lan_macaddr
            .ok_or_else(|| Error::shape("status", "missing LAN MAC address"))?;

        Ok(Status {
            wan_macaddr: self.wan.map(|w| w.macaddr),
            lan_macaddr,
            wan_ipv4_addr: self.wan.map(|w| w.ipaddr),
            lan_ipv4_addr: self.lan_ipv4_addr,
            wan_ipv4_gateway: self.wan.map(|w| w.gateway),
            wired_total: None,
            wifi_clients_total: None,
            guest_clients_total: None,
            clients_total: self.devices.len(),
            guest_2g_enable: self.guest_2g_enable,
            guest_5g_enable: self.guest_5g_enable,
            wifi_2g_enable: self.wifi_2g_enable,
            wifi_5g_enable: self.wifi_5g_enable,
            devices: self.devices,
        })
    }
}
