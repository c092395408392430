//! Clap derive structures for the `streamline` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on `clap` and `clap_complete` so `build.rs` can include it
//! for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// streamline -- subscription manager for IPTV resellers
#[derive(Debug, Parser)]
#[command(
    name = "streamline",
    version,
    about = "Manage IPTV reseller subscriptions from the command line",
    long_about = "Track IPTV clients, their packages, player apps and expiry dates.\n\n\
        Client records live in a local JSON file; the dashboard summarises\n\
        revenue, upcoming expiries and the package mix.",
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
    /// Client data file (overrides config)
    #[arg(long, short = 'f', env = "STREAMLINE_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "STREAMLINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "STREAMLINE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage client subscriptions
    #[command(alias = "cl", alias = "c")]
    Clients(ClientsArgs),

    /// Revenue, expiry and package overview
    #[command(alias = "dash", alias = "d")]
    Dashboard(DashboardArgs),

    /// M3U / Xtream helpers and customer messages
    Tools(ToolsArgs),

    /// Write the demo clients to the data file
    Seed(SeedArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    ExpiringSoon,
    Expired,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageArg {
    Diamond,
    Lion,
    Vip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartView {
    /// Revenue by start date over the last seven days
    Week,
    /// Today's revenue spread over the day
    Today,
}

// ── Clients ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub command: ClientsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List clients, newest first
    #[command(alias = "ls")]
    List(ClientListArgs),

    /// Show one client
    Get {
        /// Client ID, email or phone number
        client: String,
    },

    /// Create a client
    Add(ClientAddArgs),

    /// Change fields of an existing client
    Edit(ClientEditArgs),

    /// Delete a client
    #[command(alias = "rm")]
    Remove {
        /// Client ID, email or phone number
        client: String,
    },

    /// Recompute stored statuses from expiry dates
    Refresh,
}

#[derive(Debug, Args)]
pub struct ClientListArgs {
    /// Case-insensitive match on name or email, substring match on phone
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only clients with this stored status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only clients on this package
    #[arg(long, value_enum)]
    pub package: Option<PackageArg>,
}

#[derive(Debug, Args)]
pub struct ClientAddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address (must be unique)
    #[arg(long)]
    pub email: String,

    /// WhatsApp number (must be unique)
    #[arg(long, alias = "whatsapp")]
    pub phone: String,

    /// Package tier
    #[arg(long, value_enum, default_value = "diamond")]
    pub package: PackageArg,

    /// Player app (suggested name or any custom name) [default: Smart IPTV]
    #[arg(long)]
    pub app: Option<String>,

    /// Subscription start date, YYYY-MM-DD [default: today]
    #[arg(long)]
    pub start: Option<String>,

    /// Subscription length in months (1, 3, 6 or 12) [default: from config]
    #[arg(long)]
    pub duration: Option<u32>,

    /// Price [default: from config]
    #[arg(long)]
    pub price: Option<String>,

    /// Use the Nth price preset from the config (1 = first)
    #[arg(long, conflicts_with = "price")]
    pub preset: Option<usize>,

    /// Device MAC address (IBO apps)
    #[arg(long)]
    pub mac: Option<String>,

    /// Device key (IBO apps)
    #[arg(long)]
    pub device_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClientEditArgs {
    /// Client ID, email or phone number
    pub client: String,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// WhatsApp number
    #[arg(long, alias = "whatsapp")]
    pub phone: Option<String>,

    /// Package tier
    #[arg(long, value_enum)]
    pub package: Option<PackageArg>,

    /// Player app
    #[arg(long)]
    pub app: Option<String>,

    /// Subscription start date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Subscription length in months (1, 3, 6 or 12)
    #[arg(long)]
    pub duration: Option<u32>,

    /// Price
    #[arg(long)]
    pub price: Option<String>,

    /// Use the Nth price preset from the config (1 = first)
    #[arg(long, conflicts_with = "price")]
    pub preset: Option<usize>,

    /// Device MAC address (IBO apps)
    #[arg(long)]
    pub mac: Option<String>,

    /// Device key (IBO apps)
    #[arg(long)]
    pub device_key: Option<String>,
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Revenue chart to draw
    #[arg(long, value_enum, default_value = "week")]
    pub view: ChartView,
}

// ── Tools ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ToolsCommand {
    /// Extract Xtream Codes host, username and password from an M3U link
    Xtream {
        /// M3U playlist link
        link: String,
    },

    /// Print the customer welcome message for a link
    Message {
        /// M3U playlist link (a placeholder is used when omitted)
        link: Option<String>,
    },
}

// ── Seed ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Overwrite an existing, non-empty data file
    #[arg(long)]
    pub force: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup (defaults with --yes)
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
