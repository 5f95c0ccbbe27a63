//! Clap derive structures for the `genexis` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// genexis -- query and manage Genexis routers
#[derive(Debug, Parser)]
#[command(
    name = "genexis",
    version,
    about = "Query and manage Genexis routers from the command line",
    long_about = "Talks to the JSON-RPC management API served by Genexis routers.\n\n\
        Every command logs in, runs its RPC calls, and logs out again.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "GENEXIS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router host or URL (overrides profile)
    #[arg(long, short = 'H', env = "GENEXIS_HOST", global = true)]
    pub host: Option<String>,

    /// Login name (overrides profile)
    #[arg(long, short = 'u', env = "GENEXIS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "GENEXIS_PASSWORD", global = true, hide_env_values = true, hide = true)]
    pub password: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "GENEXIS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GENEXIS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 10]
    #[arg(long, env = "GENEXIS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Selected output format, `table` when none was resolved.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show hardware revision, model and firmware version
    #[command(alias = "fw")]
    Firmware,

    /// Show WAN/LAN addressing, radio state and device count
    #[command(alias = "st")]
    Status,

    /// List devices the router has discovered
    #[command(alias = "dev")]
    Devices,

    /// Show WAN and LAN IPv4 configuration
    Ipv4,

    /// List static DHCP reservations
    #[command(alias = "res")]
    Reservations,

    /// List active DHCP leases
    Leases,

    /// Reboot the router
    Reboot,

    /// Invoke a raw JSON-RPC method and print the response
    Query(QueryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Method name, e.g. `interfaces.get`
    pub method: String,

    /// Extra params as a JSON object, merged after the session token
    #[arg(long)]
    pub params: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
