// System endpoints
//
// Device identification (`genui.info`) and the reboot command
// (`reload.set`).

use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{debug, info};

use crate::client::{Session, decode_envelope, take_result};
use crate::error::Error;
use crate::model::Firmware;
use crate::models::{GenuiInfo, RpcStatus};

const REBOOT_REQUEST_ID: u32 = 40;

/// `reload.set` mode for a plain restart.
const REBOOT_MODE_RESTART: u8 = 0;

impl Session {
    /// Get hardware revision, product name and firmware revision.
    ///
    /// `genui.info`
    pub async fn get_firmware(&self) -> Result<Firmware, Error> {
        debug!("fetching firmware info");
        let info: GenuiInfo = self.call("genui.info").await?;
        Ok(Firmware {
            hardware_version: info.deviceinfo.hardware_revision,
            model: info.deviceinfo.product_name,
            firmware_version: info.sysinfo.firmware_revision,
        })
    }

    /// Restart the router. Never requests a factory reset.
    ///
    /// `reload.set` re-sends the credentials alongside the session token.
    /// A non-zero result code becomes [`Error::RemoteOperation`] carrying
    /// the router's message.
    pub async fn reboot(&self) -> Result<(), Error> {
        let token = self.session_id().ok_or(Error::Unauthorized)?;
        debug!("rebooting router");

        let params = json!({
            "reboot": REBOOT_MODE_RESTART,
            "factory_default": false,
            "username": self.username(),
            "password": self.password().expose_secret(),
            "sessionid": token,
        });
        let body = self.post(REBOOT_REQUEST_ID, "reload.set", params).await?;
        let envelope = decode_envelope(&body)?;

        let status: RpcStatus =
            serde_json::from_value(take_result(envelope)).map_err(|e| Error::Protocol {
                message: format!("unexpected reboot response: {e}"),
                body: body.clone(),
            })?;

        if status.result == 0 {
            info!(
                message = status.message.as_deref().unwrap_or_default(),
                "router reboot acknowledged"
            );
            Ok(())
        } else {
            Err(Error::RemoteOperation {
                message: status
                    .message
                    .unwrap_or_else(|| format!("reboot failed with result code {}", status.result)),
            })
        }
    }
}
