//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// Salesforce permission set provisioning tool.
#[derive(Parser, Debug)]
#[command(name = "sfgrant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and store a session
    Login(commands::login::LoginArgs),

    /// Display the active session
    Whoami(commands::whoami::WhoamiArgs),

    /// Clear the stored session
    Logout(commands::logout::LogoutArgs),

    /// Show daily API request usage
    Usage(commands::usage::UsageArgs),

    /// Write YAML configuration templates for objects
    Template(commands::template::TemplateArgs),

    /// Create permission sets and field permissions for objects
    Provision(commands::provision::ProvisionArgs),
}
