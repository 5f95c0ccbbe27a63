// Status endpoints
//
// `get_status` stitches five RPC results into one `Status` snapshot;
// `get_interfaces` exposes the raw interface sections.

use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;

use serde_json::Value;
use tracing::debug;

use crate::client::Session;
use crate::convert::{parse_ipv4, parse_mac, required, value_to_bool};
use crate::error::Error;
use crate::model::{Device, Interface, MacAddress, Status, StatusBuilder, WanAddressing};
use crate::models::{
    ClientsResult, InterfaceSection, InterfacesResult, ParentalControlResult, RadioInterface,
    WirelessGuestResult, WirelessResult,
};

pub(crate) const INTERFACES: &str = "interfaces.get";
pub(crate) const CLIENTS: &str = "clients.get";
const PARENTAL_CONTROL: &str = "parental_control.get";
const WIRELESS: &str = "wireless.get";
const WIRELESS_GUEST: &str = "wireless.guest.get";

impl Session {
    /// Build a [`Status`] snapshot.
    ///
    /// Issues, in order: `interfaces.get`, `parental_control.get`,
    /// `wireless.get`, `wireless.guest.get`, `clients.get`. Each discovered
    /// device gets the address of the matching DHCP client, or `0.0.0.0`
    /// when the router holds no lease for it.
    pub async fn get_status(&self) -> Result<Status, Error> {
        debug!("fetching router status");
        let interfaces: InterfacesResult = self.call(INTERFACES).await?;
        let parental: ParentalControlResult = self.call(PARENTAL_CONTROL).await?;
        let wireless: WirelessResult = self.call(WIRELESS).await?;
        let guest: WirelessGuestResult = self.call(WIRELESS_GUEST).await?;
        let clients: ClientsResult = self.call(CLIENTS).await?;

        let lan = interfaces
            .lan
            .as_ref()
            .ok_or_else(|| Error::shape(INTERFACES, "missing `lan` section"))?;
        let lan_macaddr = parse_mac(required(lan.macaddr.as_deref(), INTERFACES, "lan.macaddr")?)?;
        let lan_ipv4_addr = lan.ipaddr.as_deref().map(parse_ipv4).transpose()?;
        let wan = interfaces
            .internet
            .as_ref()
            .map(wan_addressing)
            .transpose()?;

        let leases = lease_lookup(&clients);

        let devices = parental
            .discoveries
            .iter()
            .map(|discovery| -> Result<Device, Error> {
                let macaddr = parse_mac(&discovery.mac)?;
                let ipaddr = match leases.get(&macaddr) {
                    Some(ip) => parse_ipv4(ip)?,
                    None => Ipv4Addr::UNSPECIFIED,
                };
                Ok(Device {
                    macaddr,
                    ipaddr,
                    hostname: discovery.name.clone(),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let radios = &wireless.wireless.interfaces;
        let guest_radios = &guest.wireless_guest.interfaces;

        StatusBuilder::new()
            .wan(wan)
            .lan_macaddr(lan_macaddr)
            .lan_ipv4_addr(lan_ipv4_addr)
            .wifi_enable(
                first_enable(radios, |r| r.name.as_deref() == Some("wlan1")),
                first_enable(radios, |r| r.name.as_deref() == Some("wlan2")),
            )
            .guest_enable(
                first_enable(guest_radios, |r| r.band.as_deref() == Some("2.4GHz")),
                first_enable(guest_radios, |r| r.band.as_deref() == Some("5GHz")),
            )
            .devices(devices)
            .build()
    }

    /// Get every interface section reported by `interfaces.get`, keyed by
    /// section name (`internet`, `lan`, ...).
    pub async fn get_interfaces(&self) -> Result<BTreeMap<String, Interface>, Error> {
        debug!("fetching interfaces");
        let sections: BTreeMap<String, Value> = self.call(INTERFACES).await?;
        sections
            .into_iter()
            .filter(|(_, value)| value.is_object())
            .map(|(name, value)| -> Result<(String, Interface), Error> {
                let iface = serde_json::from_value(value)
                    .map_err(|e| Error::shape(INTERFACES, format!("section `{name}`: {e}")))?;
                Ok((name, iface))
            })
            .collect()
    }
}

fn wan_addressing(section: &InterfaceSection) -> Result<WanAddressing, Error> {
    Ok(WanAddressing {
        macaddr: parse_mac(required(
            section.macaddr.as_deref(),
            INTERFACES,
            "internet.macaddr",
        )?)?,
        ipaddr: parse_ipv4(required(
            section.ipaddr.as_deref(),
            INTERFACES,
            "internet.ipaddr",
        )?)?,
        gateway: parse_ipv4(required(
            section.gateway.as_deref(),
            INTERFACES,
            "internet.gateway",
        )?)?,
    })
}

/// MAC→IP map of the DHCP clients that carry both fields.
///
/// Only addresses looked up for a discovery get validated, so a client
/// with a blank MAC or no address is left out rather than failing the
/// whole snapshot.
fn lease_lookup(clients: &ClientsResult) -> HashMap<MacAddress, &str> {
    clients
        .clients
        .iter()
        .filter_map(|client| {
            let ipaddr = client.ipaddr.as_deref().filter(|ip| !ip.trim().is_empty())?;
            match parse_mac(&client.macaddr) {
                Ok(mac) => Some((mac, ipaddr)),
                Err(e) => {
                    debug!(error = %e, "skipping DHCP client without a usable MAC");
                    None
                }
            }
        })
        .collect()
}

/// Enable flag of the first radio matching `tag`; later matches are ignored.
fn first_enable(radios: &[RadioInterface], tag: impl Fn(&RadioInterface) -> bool) -> Option<bool> {
    radios
        .iter()
        .find(|radio| tag(radio))
        .and_then(|radio| radio.enable.as_ref())
        .map(value_to_bool)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn radios(value: Value) -> Vec<RadioInterface> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn first_matching_radio_wins() {
        let list = radios(json!([
            { "name": "wlan1", "enable": "no" },
            { "name": "wlan1", "enable": "yes" },
            { "name": "wlan2", "enable": true }
        ]));
        assert_eq!(
            first_enable(&list, |r| r.name.as_deref() == Some("wlan1")),
            Some(false)
        );
        assert_eq!(
            first_enable(&list, |r| r.name.as_deref() == Some("wlan2")),
            Some(true)
        );
    }

    #[test]
    fn absent_radio_leaves_flag_unset() {
        let list = radios(json!([{ "band": "2.4GHz", "enable": "yes" }]));
        assert_eq!(
            first_enable(&list, |r| r.name.as_deref() == Some("wlan1")),
            None
        );
        assert_eq!(
            first_enable(&list, |r| r.band.as_deref() == Some("5GHz")),
            None
        );
    }

    #[test]
    fn lease_lookup_skips_incomplete_clients() {
        let clients: ClientsResult = serde_json::from_value(json!({
            "clients": [
                { "macaddr": "AA:BB:CC:00:00:01", "ipaddr": "192.168.1.10" },
                { "macaddr": "", "ipaddr": "192.168.1.99" },
                { "macaddr": "aa:bb:cc:00:00:09", "ipaddr": null },
                { "macaddr": "aa:bb:cc:00:00:0a" }
            ]
        }))
        .unwrap();
        let leases = lease_lookup(&clients);
        assert_eq!(leases.len(), 1);
        let mac: MacAddress = "aa:bb:cc:00:00:01".parse().unwrap();
        assert_eq!(leases.get(&mac), Some(&"192.168.1.10"));
    }

    #[test]
    fn wan_requires_gateway() {
        let section: InterfaceSection = serde_json::from_value(json!({
            "macaddr": "00:0f:94:00:00:01",
            "ipaddr": "203.0.113.7"
        }))
        .unwrap();
        let err = wan_addressing(&section).unwrap_err();
        assert!(err.to_string().contains("internet.gateway"), "{err}");
    }
}
