use std::process::ExitStatus;

use anyhow::{bail, Context};
use tokio::process::Command;

use crate::settings::Config;

fn database_url(config: &Config) -> anyhow::Result<&str> {
    config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not set")
}

async fn sqlx_migrate(args: &[&str]) -> anyhow::Result<()> {
    let status: ExitStatus = Command::new("sqlx")
        .arg("migrate")
        .args(args)
        .status()
        .await
        .context("failed to run sqlx, is sqlx-cli installed?")?;
    if !status.success() {
        bail!("sqlx migrate {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

pub async fn db_generate(migration_name: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["add", migration_name, "-r"]).await
}

pub async fn db_list(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["info", "-D", database_url(config)?]).await
}

pub async fn db_migrate(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["run", "-D", database_url(config)?]).await
}

pub async fn db_revert(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["revert", "-D", database_url(config)?]).await
}
