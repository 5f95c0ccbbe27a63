// ── Field coercion ──
//
// The router encodes addresses and flags as loosely-typed JSON strings.
// These helpers turn them into strong types at the mapping boundary and
// fail with a typed error instead of substituting defaults.

use std::net::Ipv4Addr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;
use crate::model::MacAddress;

/// Tokens the router uses for an enabled flag.
const TRUE_TOKENS: [&str; 3] = ["yes", "true", "on"];

/// Parse a hardware address in any common notation.
pub fn parse_mac(raw: &str) -> Result<MacAddress, Error> {
    raw.parse()
}

/// Parse a dotted-quad IPv4 address.
pub fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidIpv4Address(raw.to_owned()))
}

/// Lenient boolean: `yes`, `true` and `on` in any case are true,
/// everything else is false.
pub fn str_to_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    TRUE_TOKENS.contains(&lowered.as_str())
}

/// Coerce a router flag that may be a JSON bool, string or number.
pub fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => str_to_bool(s),
        Value::Number(n) => str_to_bool(&n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Unwrap a field the mapper cannot do without.
pub(crate) fn required<'a, T: ?Sized>(
    value: Option<&'a T>,
    method: &str,
    field: &str,
) -> Result<&'a T, Error> {
    value.ok_or_else(|| Error::shape(method, format!("missing field `{field}`")))
}

// ── Serde helpers for loosely-typed wire fields ────────────────────

/// Accept a string, number or bool and keep its textual form.
pub(crate) fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a scalar, got {other}"))),
    }
}

/// Accept an unsigned integer or its decimal string form.
pub(crate) fn de_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an unsigned integer, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!(
            "expected an unsigned integer, got {other}"
        ))),
    }
}

/// Accept a list of strings, a single string, or nothing.
pub(crate) fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(D::Error::custom(format!("expected a string, got {other}"))),
            })
            .collect(),
        Some(other) => Err(D::Error::custom(format!("expected a list, got {other}"))),
    }
}
