//! Usage command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sfgrant_core::traits::Session;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct UsageArgs {}

pub async fn run(_args: UsageArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sfgrant login' first.")?;

    let usage = session
        .limits()
        .await
        .context("Failed to get API usage")?;

    output::field(
        "API requests remaining",
        &format!("{}/{}", usage.remaining, usage.max),
    );

    Ok(())
}
