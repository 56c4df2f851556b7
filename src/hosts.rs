//! Hosts override file reconciliation
//!
//! The override file is shared with other tools and hand-written
//! entries, so rewriting it is alias-scoped: only lines this tool owns
//! for the alias being reconciled are removed. A line is owned when it
//! is uncommented and contains the alias token, or when it is exactly
//! the marker comment this tool writes above its own batch. Comments,
//! blank lines, and other aliases' entries pass through untouched, in
//! their original order.
//!
//! The file is never edited in place: read whole, compute whole, write
//! whole. A failure before the write leaves the original intact.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::{Result, XtreamError};

/// Marker comment written above each batch of owned entries
fn marker_line(alias: &str) -> String {
    format!("# Added by xtream-m3u for alias {alias}")
}

fn is_owned(line: &str, alias: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    if trimmed == marker {
        return true;
    }
    !trimmed.starts_with('#') && trimmed.contains(alias)
}

/// Compute new override-file content for one alias.
///
/// Drops every line owned by `alias`, keeps everything else verbatim,
/// and appends a marker plus one `IP\talias` line per address when
/// `ips` is non-empty. An empty `ips` contracts: old entries are
/// removed and nothing replaces them. Reconciling twice with the same
/// inputs yields identical content.
pub fn reconcile(current: &str, alias: &str, ips: &BTreeSet<Ipv4Addr>) -> String {
    let marker = marker_line(alias);
    let mut output = String::new();

    for line in current.split_inclusive('\n') {
        if is_owned(line, alias, &marker) {
            tracing::info!("Removing old {} entry: {}", alias, line.trim());
            continue;
        }
        output.push_str(line);
    }

    if !ips.is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        // Blank separator, unless the retained tail already ends in one.
        if !output.is_empty() && !output.ends_with("\n\n") {
            output.push('\n');
        }
        output.push_str(&marker);
        output.push('\n');
        for ip in ips {
            output.push_str(&format!("{ip}\t{alias}\n"));
        }
    }

    output
}

/// Reconcile the override file on disk for one alias.
///
/// A missing file is a no-op: there is nothing to reconcile and the
/// tool never creates the file itself.
pub fn update_hosts_file(path: &Path, alias: &str, ips: &BTreeSet<Ipv4Addr>) -> Result<()> {
    if !path.exists() {
        tracing::debug!("{} does not exist, skipping hosts update", path.display());
        return Ok(());
    }

    let current = std::fs::read_to_string(path).map_err(|source| XtreamError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let updated = reconcile(&current, alias, ips);
    std::fs::write(path, updated).map_err(|source| XtreamError::File {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "{} updated with {} IPs for {}",
        path.display(),
        ips.len(),
        alias
    );
    Ok(())
}
