//! Async client for the JSON-RPC management API of Genexis routers.
//!
//! A [`Session`] owns the endpoint, the credentials and the session token.
//! Call [`Session::authorize`] once, then any of the `get_*` methods; each
//! one issues its RPC calls sequentially and returns a freshly built record
//! from [`model`]. Call [`Session::logout`] when done.
//!
//! ```no_run
//! use genexis_api::{Session, TransportConfig};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), genexis_api::Error> {
//! let mut session = Session::new(
//!     "192.168.1.1",
//!     "admin",
//!     SecretString::from("admin".to_owned()),
//!     &TransportConfig::default(),
//! )?;
//! if session.authorize().await? {
//!     let status = session.get_status().await?;
//!     println!("{} devices", status.devices.len());
//!     session.logout().await;
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
pub mod client;
pub mod convert;
pub mod error;
mod ipv4;
pub mod model;
mod models;
mod status;
mod system;
pub mod transport;

pub use client::{Session, SessionConfig};
pub use error::Error;
pub use model::{
    Device, Firmware, Interface, Ipv4DhcpLease, Ipv4Reservation, Ipv4Status, MacAddress, Status,
    StatusBuilder,
};
pub use transport::{TlsMode, TransportConfig, normalize_endpoint};
