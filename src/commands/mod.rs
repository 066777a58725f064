//! Report commands: fetch from the tracker, assemble, write HTML to disk.

pub mod bugs;
pub mod features;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::client::TrackerClient;
use crate::config::ReportConfig;

/// Build a client from `config` and check the service accepts it.
pub async fn connect(config: &ReportConfig) -> Result<TrackerClient> {
    let client = TrackerClient::from_config(config)?;
    client
        .login()
        .await
        .with_context(|| format!("Could not connect to tracker at {}", client.base_url()))?;
    tracing::debug!("Connected to {}", client.base_url());
    Ok(client)
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tracing::info!("Writing html file: {}", path.display());
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}
