//! Subcommand implementations.

pub mod login;
pub mod logout;
pub mod provision;
pub mod template;
pub mod usage;
pub mod whoami;

use anyhow::Result;

use crate::cli::Commands;

pub async fn handle(command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(args).await,
        Commands::Whoami(args) => whoami::run(args).await,
        Commands::Logout(args) => logout::run(args).await,
        Commands::Usage(args) => usage::run(args).await,
        Commands::Template(args) => template::run(args).await,
        Commands::Provision(args) => provision::run(args).await,
    }
}
