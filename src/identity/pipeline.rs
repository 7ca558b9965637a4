/// Resolution orchestrator
///
/// Sequences discovery, document resolution, endpoint extraction, and PDS
/// verification into one atomic operation per request. Strictly sequential,
/// no branching back; any step failure is terminal and no partial result is
/// ever returned.
use crate::config::IdentityConfig;
use crate::error::{LocatorError, LocatorResult, ResolutionError, ResolveStep};
use crate::identity::{
    DnsWellKnownDiscoverer, DocumentResolver, EndpointExtractor, HandleDiscoverer,
    HttpDocumentResolver, ResolutionResult, VerificationCaller, XrpcVerificationCaller,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Orchestrates the four resolution steps. Stateless across requests; any
/// number of resolutions may run in parallel.
#[derive(Clone)]
pub struct ResolutionPipeline {
    discoverer: Arc<dyn HandleDiscoverer>,
    documents: Arc<dyn DocumentResolver>,
    extractor: EndpointExtractor,
    verifier: Arc<dyn VerificationCaller>,
}

impl ResolutionPipeline {
    /// Assemble a pipeline from parts; used directly by tests
    pub fn new(
        discoverer: Arc<dyn HandleDiscoverer>,
        documents: Arc<dyn DocumentResolver>,
        extractor: EndpointExtractor,
        verifier: Arc<dyn VerificationCaller>,
    ) -> Self {
        Self {
            discoverer,
            documents,
            extractor,
            verifier,
        }
    }

    /// Build the production pipeline from configuration
    pub fn from_config(config: &IdentityConfig) -> LocatorResult<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| LocatorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::new(
            Arc::new(DnsWellKnownDiscoverer::new(http_client.clone(), timeout)),
            Arc::new(HttpDocumentResolver::new(
                http_client.clone(),
                config.did_plc_url.clone(),
            )),
            EndpointExtractor::new(config.reference_network_suffix.clone()),
            Arc::new(XrpcVerificationCaller::new(http_client)),
        ))
    }

    /// Resolve a handle to its verified DID and PDS address.
    ///
    /// Steps run strictly in order; a later step never begins before the
    /// earlier one completed successfully. The discovery DID must equal the
    /// DID the PDS asserts, otherwise the resolution fails with Mismatch.
    pub async fn resolve(&self, handle: &str) -> Result<ResolutionResult, ResolutionError> {
        let handle = handle.trim().to_lowercase();
        debug!(%handle, "starting resolution");

        let did = self
            .discoverer
            .discover(&handle)
            .await
            .map_err(|e| e.at(&handle, ResolveStep::Discovery))?;
        debug!(%handle, %did, "discovered DID");

        let document = self
            .documents
            .resolve_document(&did)
            .await
            .map_err(|e| e.at(&handle, ResolveStep::Document))?;

        let endpoint = self
            .extractor
            .extract(&document)
            .map_err(|e| e.at(&handle, ResolveStep::Endpoint))?;
        debug!(%handle, pds = %endpoint.url, "extracted PDS endpoint");

        let verified = self
            .verifier
            .verify(&handle, &endpoint)
            .await
            .map_err(|e| e.at(&handle, ResolveStep::Verification))?;

        // The correctness-critical check: the PDS must corroborate the
        // mapping produced by discovery.
        if verified != did {
            warn!(%handle, discovered = %did, %verified, "verification DID mismatch");
            return Err(ResolutionError::mismatch(&handle, &did, &verified));
        }

        info!(%handle, %did, pds = %endpoint.url, "resolution verified");
        Ok(ResolutionResult {
            handle,
            did,
            pds_url: endpoint.url,
            bsky_pds: endpoint.bsky_pds,
        })
    }
}
