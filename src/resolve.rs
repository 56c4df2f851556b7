//! Name-resolution collaborator
//!
//! Looks up the current IPv4 addresses for an alias directly against
//! the configured DNS servers, bypassing the hosts override file the
//! tool itself maintains. When the direct query fails, a getaddrinfo
//! fallback is tried — that path may read the override file, which is
//! acceptable as a last resort.

use hickory_resolver::error::ResolveError;
use hickory_resolver::TokioAsyncResolver;
use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};

/// Resolve the current IPv4 address set for `domain`.
///
/// An empty set means "could not resolve"; the caller skips the hosts
/// update in that case.
pub async fn resolve_host_ips(domain: &str) -> BTreeSet<Ipv4Addr> {
    match resolve_direct(domain).await {
        Ok(ips) => ips,
        Err(e) => {
            tracing::error!(
                "DNS resolution for {} failed: {}. Using socket fallback.",
                domain,
                e
            );
            resolve_fallback(domain).await
        }
    }
}

async fn resolve_direct(domain: &str) -> Result<BTreeSet<Ipv4Addr>, ResolveError> {
    let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
    let lookup = resolver.ipv4_lookup(domain).await?;
    Ok(lookup.iter().map(|a| a.0).collect())
}

async fn resolve_fallback(domain: &str) -> BTreeSet<Ipv4Addr> {
    match tokio::net::lookup_host((domain, 80)).await {
        Ok(addrs) => addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(e) => {
            tracing::error!("Socket fallback resolution for {} failed: {}", domain, e);
            BTreeSet::new()
        }
    }
}
