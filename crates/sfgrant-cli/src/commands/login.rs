//! Login command implementation.

use std::env;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sfgrant_core::traits::{SalesforceApi, Session};
use sfgrant_core::types::Domain;
use sfgrant_core::Credentials;
use sfgrant_rest::RestApi;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Salesforce username (falls back to SF_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// Salesforce password (falls back to SF_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,

    /// Security token appended to the password (falls back to SF_SECURITY_TOKEN)
    #[arg(long)]
    pub security_token: Option<String>,

    /// Environment to authenticate against: "login" or "test"
    /// (falls back to SF_DOMAIN, then "login")
    #[arg(long)]
    pub domain: Option<String>,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let username = resolve(args.username, "SF_USERNAME")?;
    let password = resolve(args.password, "SF_PASSWORD")?;
    let security_token = resolve(args.security_token, "SF_SECURITY_TOKEN")?;
    let domain: Domain = args
        .domain
        .or_else(|| env::var("SF_DOMAIN").ok())
        .unwrap_or_else(|| "login".to_string())
        .parse()?;

    let credentials = Credentials::new(username, password, security_token, domain);

    eprintln!("{}", "Logging in...".dimmed());

    let api = RestApi::new(domain);
    let session = api
        .login(credentials)
        .await
        .context("Failed to login to Salesforce")?;

    storage::save_session(&session).context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("Instance", session.instance().as_str());
    output::field("Domain", domain.as_str());

    Ok(())
}

fn resolve(flag: Option<String>, var: &str) -> Result<String> {
    flag.or_else(|| env::var(var).ok())
        .with_context(|| format!("Missing credential: pass the flag or set {}", var))
}
