/// Handle discovery: handle -> DID
///
/// Discovery channels in fixed priority order:
/// 1. DNS TXT record at `_atproto.<handle>` with a `did=` value
/// 2. HTTPS `https://<handle>/.well-known/atproto-did` (plain-text DID)
///
/// The first channel yielding a syntactically valid DID wins.
use crate::error::StepError;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;
use tracing::debug;

/// Trait seam for handle -> DID discovery
#[async_trait]
pub trait HandleDiscoverer: Send + Sync {
    /// Discover the DID asserted by the handle's owner
    async fn discover(&self, handle: &str) -> Result<String, StepError>;
}

/// Production discoverer using DNS TXT records and the well-known document
pub struct DnsWellKnownDiscoverer {
    dns: TokioAsyncResolver,
    http_client: reqwest::Client,
}

impl DnsWellKnownDiscoverer {
    pub fn new(http_client: reqwest::Client, timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        let dns = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);

        Self { dns, http_client }
    }

    /// DNS TXT channel: `_atproto.<handle>` records carrying `did=<did>`
    async fn discover_dns(&self, handle: &str) -> Result<String, StepError> {
        let name = format!("_atproto.{}.", handle);
        let lookup = self
            .dns
            .txt_lookup(name)
            .await
            .map_err(|e| StepError::not_found(format!("DNS TXT lookup failed: {}", e)))?;

        for record in lookup.iter() {
            let joined: String = record
                .txt_data()
                .iter()
                .map(|data| String::from_utf8_lossy(data))
                .collect();
            if let Some(did) = did_from_txt(&joined) {
                return Ok(did.to_string());
            }
        }

        Err(StepError::not_found("no did= TXT record found"))
    }

    /// Well-known channel: plain-text DID served over HTTPS
    async fn discover_well_known(&self, handle: &str) -> Result<String, StepError> {
        let url = well_known_url(handle);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| StepError::not_found(format!("well-known fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StepError::not_found(format!(
                "well-known endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StepError::not_found(format!("failed to read well-known body: {}", e)))?;

        let did = body
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| StepError::malformed("well-known document is empty"))?;

        if !did.starts_with("did:") {
            return Err(StepError::malformed(
                "well-known document does not contain a DID",
            ));
        }

        Ok(did.to_string())
    }
}

#[async_trait]
impl HandleDiscoverer for DnsWellKnownDiscoverer {
    async fn discover(&self, handle: &str) -> Result<String, StepError> {
        match self.discover_dns(handle).await {
            Ok(did) => return Ok(did),
            Err(e) => debug!(%handle, "DNS TXT discovery failed: {}", e),
        }

        self.discover_well_known(handle).await
    }
}

/// Extract the DID from a TXT record payload.
///
/// Records without the `did=` prefix, or with a value that is not a DID,
/// are skipped; unrelated TXT records may share the name.
fn did_from_txt(record: &str) -> Option<&str> {
    let value = record.trim().strip_prefix("did=")?;
    if value.starts_with("did:") {
        Some(value)
    } else {
        None
    }
}

fn well_known_url(handle: &str) -> String {
    format!("https://{}/.well-known/atproto-did", handle)
}
