//! Command dispatch: bridges CLI args -> session calls -> output formatting.

pub mod ipv4;
pub mod query;
pub mod status;
pub mod system;
pub mod util;

use genexis_api::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Ask for confirmation before any router connection is opened.
///
/// Returns `false` when the user declined and the command should not run.
pub fn preflight(cmd: &Command, global: &GlobalOpts) -> Result<bool, CliError> {
    match cmd {
        Command::Reboot => util::confirm("reboot", "Reboot the router now?", global.yes),
        _ => Ok(true),
    }
}

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Firmware => system::firmware(session, global).await,
        Command::Reboot => system::reboot(session, global).await,
        Command::Status => status::status(session, global).await,
        Command::Devices => status::devices(session, global).await,
        Command::Ipv4 => ipv4::status(session, global).await,
        Command::Reservations => ipv4::reservations(session, global).await,
        Command::Leases => ipv4::leases(session, global).await,
        Command::Query(args) => query::handle(session, args, global).await,
        // Completions are handled before a session is opened
        Command::Completions(_) => Ok(()),
    }
}
