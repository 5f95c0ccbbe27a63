//! IPv4, DHCP reservation and lease command handlers.

use tabled::Tabled;

use genexis_api::{Ipv4DhcpLease, Ipv4Reservation, Ipv4Status, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&Ipv4Reservation> for ReservationRow {
    fn from(r: &Ipv4Reservation) -> Self {
        Self {
            mac: r.macaddr.to_string(),
            ip: r.ipaddr.to_string(),
            enabled: if r.enabled { "yes" } else { "no" }.into(),
        }
    }
}

#[derive(Tabled)]
struct LeaseRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Expires")]
    lease_time: String,
}

impl From<&Ipv4DhcpLease> for LeaseRow {
    fn from(l: &Ipv4DhcpLease) -> Self {
        Self {
            hostname: l.hostname.clone(),
            ip: l.ipaddr.to_string(),
            mac: l.macaddr.to_string(),
            lease_time: l.lease_time.clone(),
        }
    }
}

fn detail(s: &Ipv4Status) -> String {
    [
        format!("WAN MAC:       {}", s.wan_macaddr),
        format!("WAN IPv4:      {}", s.wan_ipv4_ipaddr),
        format!("WAN netmask:   {}", s.wan_ipv4_netmask),
        format!("WAN gateway:   {}", s.wan_ipv4_gateway),
        format!("WAN DNS:       {}, {}", s.wan_ipv4_pridns, s.wan_ipv4_snddns),
        format!("LAN MAC:       {}", s.lan_macaddr),
        format!("LAN IPv4:      {}", s.lan_ipv4_ipaddr),
        format!("LAN netmask:   {}", s.lan_ipv4_netmask),
        format!("LAN DNS:       {}", or_dash(s.lan_ipv4_pridns)),
        format!(
            "DHCP server:   {}",
            if s.lan_ipv4_dhcp_enable { "on" } else { "off" }
        ),
    ]
    .join("\n")
}

pub async fn status(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let ipv4 = session.get_ipv4_status().await?;
    let out = output::render_single(&global.format(), &ipv4, detail, |s| {
        s.wan_ipv4_ipaddr.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn reservations(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let reservations = session.get_ipv4_reservations().await?;
    let out = output::render_list(
        &global.format(),
        &reservations,
        |r| ReservationRow::from(r),
        |r| format!("{} {}", r.macaddr, r.ipaddr),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn leases(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let leases = session.get_ipv4_dhcp_leases().await?;
    let out = output::render_list(
        &global.format(),
        &leases,
        |l| LeaseRow::from(l),
        |l| format!("{} {}", l.macaddr, l.ipaddr),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
