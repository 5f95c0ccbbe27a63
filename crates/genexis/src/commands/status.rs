//! Status and device command handlers.

use tabled::Tabled;

use genexis_api::{Device, Session, Status};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, on_off, or_dash};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.hostname.clone(),
            ip: if d.ipaddr.is_unspecified() {
                "-".into()
            } else {
                d.ipaddr.to_string()
            },
            mac: d.macaddr.to_string(),
        }
    }
}

fn detail(s: &Status) -> String {
    [
        format!("WAN MAC:      {}", or_dash(s.wan_macaddr)),
        format!("WAN IPv4:     {}", or_dash(s.wan_ipv4_addr)),
        format!("WAN gateway:  {}", or_dash(s.wan_ipv4_gateway)),
        format!("LAN MAC:      {}", s.lan_macaddr),
        format!("LAN IPv4:     {}", or_dash(s.lan_ipv4_addr)),
        format!("WiFi 2.4GHz:  {}", on_off(s.wifi_2g_enable)),
        format!("WiFi 5GHz:    {}", on_off(s.wifi_5g_enable)),
        format!("Guest 2.4GHz: {}", on_off(s.guest_2g_enable)),
        format!("Guest 5GHz:   {}", on_off(s.guest_5g_enable)),
        format!("Devices:      {}", s.clients_total),
    ]
    .join("\n")
}

pub async fn status(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let status = session.get_status().await?;
    let out = output::render_single(&global.format(), &status, detail, |s| {
        s.lan_macaddr.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn devices(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let status = session.get_status().await?;
    let out = output::render_list(
        &global.format(),
        &status.devices,
        |d| DeviceRow::from(d),
        |d| d.macaddr.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
