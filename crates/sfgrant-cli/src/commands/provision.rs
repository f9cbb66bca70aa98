//! Provision command implementation.
//!
//! Drives the straight-line flow per object: record types, configuration,
//! permission set, field permissions. An error on one object is reported
//! and processing continues with the next.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{error, info};

use sfgrant_core::provision;
use sfgrant_core::traits::Session;
use sfgrant_core::types::AccessLevel;

use crate::config;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Specific objects to process
    pub objects: Vec<String>,

    /// Process all objects in the org
    #[arg(short, long, conflicts_with = "objects")]
    pub all: bool,

    /// Process all custom objects in the org
    #[arg(long, conflicts_with_all = ["objects", "all"])]
    pub custom_all: bool,

    /// Record type the permission set is created for
    #[arg(long, default_value = "basic")]
    pub record_type: String,

    /// Field access level to grant: "read" or "edit"
    #[arg(long, default_value = "read")]
    pub access_level: AccessLevel,

    /// Directory holding per-object configuration files
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

pub async fn run(args: ProvisionArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sfgrant login' first.")?;

    let usage = session.limits().await.context("Failed to get API usage")?;
    info!(
        remaining = usage.remaining,
        max = usage.max,
        "API requests remaining"
    );

    let objects = if args.all {
        session
            .describe_global()
            .await
            .context("Failed to list objects")?
            .into_iter()
            .map(|object| object.name)
            .collect()
    } else if args.custom_all {
        session
            .describe_global()
            .await
            .context("Failed to list objects")?
            .into_iter()
            .filter(|object| object.custom)
            .map(|object| object.name)
            .collect()
    } else if !args.objects.is_empty() {
        args.objects.clone()
    } else {
        bail!("No objects specified; pass object names or use --all / --custom-all");
    };

    let mut failed = 0usize;
    for object_name in &objects {
        match process_object(&session, object_name, &args).await {
            Ok(()) => {
                output::success(&format!("Object {} processed", object_name));
            }
            Err(e) => {
                failed += 1;
                error!(object = object_name, error = %e, "Error processing object");
                output::error(&format!("Object {} failed: {:#}", object_name, e));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} objects failed", failed, objects.len());
    }

    output::success("All objects processed");
    Ok(())
}

async fn process_object<S>(session: &S, object_name: &str, args: &ProvisionArgs) -> Result<()>
where
    S: Session,
{
    info!(object = object_name, "Processing object");

    let record_types = provision::record_types(session, object_name)
        .await
        .with_context(|| format!("Failed to get record types for {}", object_name))?;

    if record_types.is_empty() {
        info!(object = object_name, "No record types found, using 'Master'");
    } else {
        for rt in &record_types {
            info!(record_type = %rt.developer_name, "Found record type");
        }
    }

    let object_config = config::load(&args.config_dir, object_name)?;

    let permission_set_id =
        provision::create_permission_set(session, object_name, &args.record_type)
            .await
            .with_context(|| format!("Failed to create permission set for {}", object_name))?;

    let allowed_fields = object_config.allowed_fields();
    provision::set_field_permissions(
        session,
        &permission_set_id,
        object_name,
        &allowed_fields,
        args.access_level,
    )
    .await
    .with_context(|| format!("Failed to set field permissions for {}", object_name))?;

    Ok(())
}
