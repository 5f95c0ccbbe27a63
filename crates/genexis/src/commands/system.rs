//! Firmware and reboot command handlers.

use tracing::info;

use genexis_api::{Firmware, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(f: &Firmware) -> String {
    [
        format!("Model:    {}", f.model),
        format!("Hardware: {}", f.hardware_version),
        format!("Firmware: {}", f.firmware_version),
    ]
    .join("\n")
}

pub async fn firmware(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let firmware = session.get_firmware().await?;
    let out = output::render_single(&global.format(), &firmware, detail, |f| {
        f.firmware_version.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn reboot(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    session.reboot().await?;
    info!("reboot requested");
    if !global.quiet {
        eprintln!("Router is rebooting");
    }
    Ok(())
}
