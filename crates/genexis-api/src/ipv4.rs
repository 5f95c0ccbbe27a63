// IPv4 / DHCP endpoints
//
// WAN/LAN addressing, static DHCP reservations and active leases.

use tracing::debug;

use crate::client::Session;
use crate::convert::{parse_ipv4, parse_mac, required, value_to_bool};
use crate::error::Error;
use crate::model::{Ipv4DhcpLease, Ipv4Reservation, Ipv4Status};
use crate::models::{ClientsResult, DhcpResult, DhcpStaticResult, InterfacesResult};
use crate::status::{CLIENTS, INTERFACES};

const DHCP: &str = "dhcp.get";
const DHCP_STATIC: &str = "dhcp.static.get";

impl Session {
    /// Get WAN and LAN IPv4 configuration.
    ///
    /// Issues `interfaces.get` then `dhcp.get`. WAN DNS servers come from
    /// the first two static DNS entries; the LAN DHCP flag and primary DNS
    /// come from the first DHCP pool.
    pub async fn get_ipv4_status(&self) -> Result<Ipv4Status, Error> {
        debug!("fetching IPv4 status");
        let interfaces: InterfacesResult = self.call(INTERFACES).await?;
        let dhcp: DhcpResult = self.call(DHCP).await?;

        let wan = interfaces
            .internet
            .as_ref()
            .ok_or_else(|| Error::shape(INTERFACES, "missing `internet` section"))?;
        let lan = interfaces
            .lan
            .as_ref()
            .ok_or_else(|| Error::shape(INTERFACES, "missing `lan` section"))?;
        let static_dns = wan
            .dns
            .as_ref()
            .map(|dns| dns.static_dns.as_slice())
            .unwrap_or_default();
        let pool = dhcp
            .pool
            .first()
            .ok_or_else(|| Error::shape(DHCP, "empty `pool` list"))?;
        let dhcp_enabled = required(pool.enabled.as_ref(), DHCP, "pool[0].enabled")?;

        Ok(Ipv4Status {
            wan_macaddr: parse_mac(required(wan.macaddr.as_deref(), INTERFACES, "internet.macaddr")?)?,
            wan_ipv4_ipaddr: parse_ipv4(required(
                wan.ipaddr.as_deref(),
                INTERFACES,
                "internet.ipaddr",
            )?)?,
            wan_ipv4_gateway: parse_ipv4(required(
                wan.gateway.as_deref(),
                INTERFACES,
                "internet.gateway",
            )?)?,
            wan_ipv4_netmask: parse_ipv4(required(
                wan.netmask.as_deref(),
                INTERFACES,
                "internet.netmask",
            )?)?,
            wan_ipv4_pridns: parse_ipv4(required(
                static_dns.first().map(String::as_str),
                INTERFACES,
                "internet.dns.static_dns[0]",
            )?)?,
            wan_ipv4_snddns: parse_ipv4(required(
                static_dns.get(1).map(String::as_str),
                INTERFACES,
                "internet.dns.static_dns[1]",
            )?)?,
            lan_macaddr: parse_mac(required(lan.macaddr.as_deref(), INTERFACES, "lan.macaddr")?)?,
            lan_ipv4_ipaddr: parse_ipv4(required(lan.ipaddr.as_deref(), INTERFACES, "lan.ipaddr")?)?,
            lan_ipv4_netmask: parse_ipv4(required(
                lan.netmask.as_deref(),
                INTERFACES,
                "lan.netmask",
            )?)?,
            lan_ipv4_pridns: pool
                .opt_dnsaddr
                .first()
                .map(|dns| parse_ipv4(dns))
                .transpose()?,
            lan_ipv4_dhcp_enable: value_to_bool(dhcp_enabled),
        })
    }

    /// List static DHCP reservations in router order.
    ///
    /// `dhcp.static.get`
    pub async fn get_ipv4_reservations(&self) -> Result<Vec<Ipv4Reservation>, Error> {
        debug!("fetching DHCP reservations");
        let data: DhcpStaticResult = self.call(DHCP_STATIC).await?;

        data.lan
            .staticaddress
            .iter()
            .map(|entry| -> Result<Ipv4Reservation, Error> {
                let enable = required(entry.enable.as_ref(), DHCP_STATIC, "staticaddress.enable")?;
                Ok(Ipv4Reservation {
                    macaddr: parse_mac(&entry.macaddr)?,
                    ipaddr: parse_ipv4(&entry.ipaddr)?,
                    enabled: value_to_bool(enable),
                })
            })
            .collect()
    }

    /// List active DHCP leases in router order.
    ///
    /// `clients.get`; the expiry is passed through unmodified.
    pub async fn get_ipv4_dhcp_leases(&self) -> Result<Vec<Ipv4DhcpLease>, Error> {
        debug!("fetching DHCP leases");
        let data: ClientsResult = self.call(CLIENTS).await?;

        data.clients
            .into_iter()
            .map(|client| -> Result<Ipv4DhcpLease, Error> {
                let hostname = required(client.hostname.as_deref(), CLIENTS, "clients.hostname")?;
                let expiry = required(client.expiry.as_deref(), CLIENTS, "clients.expiry")?;
                let ipaddr = required(client.ipaddr.as_deref(), CLIENTS, "clients.ipaddr")?;
                Ok(Ipv4DhcpLease {
                    macaddr: parse_mac(&client.macaddr)?,
                    ipaddr: parse_ipv4(ipaddr)?,
                    hostname: hostname.to_owned(),
                    lease_time: expiry.to_owned(),
                })
            })
            .collect()
    }
}
