// JSON-RPC wire types
//
// Raw shapes of the `result` member for each RPC method the mapper uses.
// Fields the mapper only needs conditionally are `Option` so that presence
// checks happen in the mapper with a precise error message; fields that are
// always required fail deserialization directly.

use serde::Deserialize;
use serde_json::Value;

use crate::convert::de_lenient_string;

// ── Envelope ─────────────────────────────────────────────────────────

/// Status block returned by `session.login` and `reload.set`.
///
/// ```json
/// { "result": { "result": 0, "sessionid": "...", "message": "..." } }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct RpcStatus {
    pub result: i64,
    #[serde(default)]
    pub sessionid: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub message: Option<String>,
}

// ── genui.info ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GenuiInfo {
    pub deviceinfo: DeviceInfo,
    pub sysinfo: SysInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceInfo {
    pub hardware_revision: String,
    pub product_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SysInfo {
    pub firmware_revision: String,
}

// ── interfaces.get ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct InterfacesResult {
    #[serde(default)]
    pub internet: Option<InterfaceSection>,
    #[serde(default)]
    pub lan: Option<InterfaceSection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterfaceSection {
    #[serde(default)]
    pub macaddr: Option<String>,
    #[serde(default)]
    pub ipaddr: Option<String>,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub dns: Option<DnsSettings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DnsSettings {
    #[serde(default)]
    pub static_dns: Vec<String>,
}

// ── parental_control.get ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ParentalControlResult {
    #[serde(default)]
    pub discoveries: Vec<Discovery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Discovery {
    pub mac: String,
    pub name: String,
}

// ── wireless.get / wireless.guest.get ────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct WirelessResult {
    pub wireless: RadioList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirelessGuestResult {
    pub wireless_guest: RadioList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadioList {
    pub interfaces: Vec<RadioInterface>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadioInterface {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub enable: Option<Value>,
}

// ── clients.get ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ClientsResult {
    pub clients: Vec<ClientEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClientEntry {
    pub macaddr: String,
    #[serde(default)]
    pub ipaddr: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub expiry: Option<String>,
}

// ── dhcp.get ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct DhcpResult {
    pub pool: Vec<DhcpPool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DhcpPool {
    #[serde(default)]
    pub enabled: Option<Value>,
    #[serde(default)]
    pub opt_dnsaddr: Vec<String>,
}

// ── dhcp.static.get ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct DhcpStaticResult {
    pub lan: StaticLan,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StaticLan {
    pub staticaddress: Vec<StaticAddress>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StaticAddress {
    pub macaddr: String,
    pub ipaddr: String,
    #[serde(default)]
    pub enable: Option<Value>,
}
