//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sfgrant_core::traits::Session;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sfgrant login' first.")?;

    output::field("Instance", session.instance().as_str());

    Ok(())
}
