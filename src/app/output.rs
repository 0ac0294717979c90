//! Result persistence: confirmed mail servers appended to a flat text file.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;

use crate::domain::DomainSet;

/// Appends one hostname per line to `path`, creating the file if needed.
///
/// Existing content is never truncated. Returns the number of lines written.
pub async fn append_mail_servers(path: &Path, mail_servers: &DomainSet) -> Result<usize> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open output file {}", path.display()))?;

    let mut buffer = String::new();
    for record in mail_servers {
        buffer.push_str(record.name());
        buffer.push('\n');
    }
    file.write_all(buffer.as_bytes())
        .await
        .with_context(|| format!("Failed to write to output file {}", path.display()))?;
    file.flush().await.context("Failed to flush output file")?;
    Ok(mail_servers.len())
}
