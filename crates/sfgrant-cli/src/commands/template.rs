//! Template command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use sfgrant_core::provision;
use sfgrant_core::traits::Session;

use crate::config::{self, ObjectConfig, STANDARD_RESTRICTED_FIELDS};
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Objects to write configuration templates for
    #[arg(required = true)]
    pub objects: Vec<String>,

    /// Directory to write configuration files into
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

pub async fn run(args: TemplateArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sfgrant login' first.")?;

    for object_name in &args.objects {
        let path = write_template(&session, object_name, &args.config_dir).await?;
        output::success(&format!("Configuration template created at {}", path.display()));
    }

    Ok(())
}

async fn write_template<S>(
    session: &S,
    object_name: &str,
    config_dir: &std::path::Path,
) -> Result<PathBuf>
where
    S: Session,
{
    info!(object = object_name, "Creating configuration template");

    let describe = session
        .describe(object_name)
        .await
        .with_context(|| format!("Failed to describe {}", object_name))?;

    let record_types = provision::record_types(session, object_name)
        .await
        .with_context(|| format!("Failed to get record types for {}", object_name))?;

    let record_type_names: Vec<String> = if record_types.is_empty() {
        info!(object = object_name, "No record types found, using 'Master'");
        vec!["Master".to_string()]
    } else {
        for rt in &record_types {
            info!(record_type = %rt.developer_name, "Found record type");
        }
        record_types
            .into_iter()
            .map(|rt| rt.developer_name)
            .collect()
    };

    let fields: Vec<String> = describe
        .fields
        .iter()
        .map(|field| field.name.clone())
        .filter(|name| !STANDARD_RESTRICTED_FIELDS.contains(&name.as_str()))
        .collect();

    let template = ObjectConfig {
        record_types: record_type_names,
        fields,
        restricted_fields: STANDARD_RESTRICTED_FIELDS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    config::save(config_dir, object_name, &template)
}
