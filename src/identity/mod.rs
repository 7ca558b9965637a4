/// Identity Resolution System
///
/// Resolves ATProto handles to DIDs, fetches DID documents, locates the
/// account's PDS, and verifies the mapping against the PDS itself.
pub mod document;
pub mod endpoint;
pub mod handle;
pub mod pipeline;
pub mod verify;

pub use document::{DocumentResolver, HttpDocumentResolver};
pub use endpoint::EndpointExtractor;
pub use handle::{DnsWellKnownDiscoverer, HandleDiscoverer};
pub use pipeline::ResolutionPipeline;
pub use verify::{VerificationCaller, XrpcVerificationCaller};

use serde::{Deserialize, Serialize};

/// Service descriptor within a DID document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub service_endpoint: String,
}

/// Parsed DID document, reduced to the fields needed for PDS lookup.
/// Request-scoped; discarded after endpoint extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    pub id: String,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub service: Vec<Service>,
}

/// PDS network address plus the derived reference-network flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub url: String,
    /// Hostname-suffix heuristic against the reference network's domain,
    /// not a cryptographic fact
    pub bsky_pds: bool,
}

/// Final output of one verified resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub handle: String,
    pub did: String,
    pub pds_url: String,
    pub bsky_pds: bool,
}
