/// DID document resolution: DID -> DID document
///
/// Dispatches on the DID method: did:plc documents come from the PLC
/// directory, did:web documents from the well-known or path-derived HTTPS
/// location. No retries at this layer.
use crate::error::StepError;
use crate::identity::DidDocument;
use async_trait::async_trait;

/// Trait seam for DID -> document resolution
#[async_trait]
pub trait DocumentResolver: Send + Sync {
    async fn resolve_document(&self, did: &str) -> Result<DidDocument, StepError>;
}

/// Production resolver fetching documents over HTTPS
pub struct HttpDocumentResolver {
    http_client: reqwest::Client,
    plc_directory_url: String,
}

impl HttpDocumentResolver {
    pub fn new(http_client: reqwest::Client, plc_directory_url: String) -> Self {
        Self {
            http_client,
            plc_directory_url,
        }
    }

    /// Fetch and parse a DID document from the given URL.
    ///
    /// HTTP error statuses map to NotFound, unparseable bodies to Malformed,
    /// transport failures to Unreachable.
    async fn fetch(&self, url: &str) -> Result<DidDocument, StepError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            StepError::unreachable(format!("failed to fetch DID document: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(StepError::not_found(format!(
                "document source returned {}",
                response.status()
            )));
        }

        response
            .json::<DidDocument>()
            .await
            .map_err(|e| StepError::malformed(format!("invalid DID document: {}", e)))
    }

    async fn fetch_plc_document(&self, did: &str) -> Result<DidDocument, StepError> {
        let url = format!("{}/{}", self.plc_directory_url.trim_end_matches('/'), did);
        self.fetch(&url).await
    }

    async fn fetch_web_document(&self, did: &str) -> Result<DidDocument, StepError> {
        let url = did_web_url(did)?;
        self.fetch(&url).await
    }
}

#[async_trait]
impl DocumentResolver for HttpDocumentResolver {
    async fn resolve_document(&self, did: &str) -> Result<DidDocument, StepError> {
        if did.starts_with("did:plc:") {
            self.fetch_plc_document(did).await
        } else if did.starts_with("did:web:") {
            self.fetch_web_document(did).await
        } else {
            Err(StepError::not_found(format!(
                "unsupported DID method: {}",
                did
            )))
        }
    }
}

/// Derive the document URL for a did:web identifier.
///
/// did:web:example.com -> https://example.com/.well-known/did.json
/// did:web:example.com:user:alice -> https://example.com/user/alice/did.json
fn did_web_url(did: &str) -> Result<String, StepError> {
    let suffix = did
        .strip_prefix("did:web:")
        .ok_or_else(|| StepError::malformed("invalid did:web identifier"))?;

    let parts: Vec<&str> = suffix.split(':').collect();
    let domain = parts
        .first()
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| StepError::malformed("missing domain in did:web identifier"))?;

    if parts.len() == 1 {
        Ok(format!("https://{}/.well-known/did.json", domain))
    } else {
        let path = parts[1..].join("/");
        Ok(format!("https://{}/{}/did.json", domain, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveErrorKind;

    #[test]
    fn test_did_web_url_simple() {
        assert_eq!(
            did_web_url("did:web:example.com").unwrap(),
            "https://example.com/.well-known/did.json"
        );
    }

    #[test]
    fn test_did_web_url_with_path() {
        assert_eq!(
            did_web_url("did:web:example.com:user:alice").unwrap(),
            "https://example.com/user/alice/did.json"
        );
    }

    #[test]
    fn test_did_web_url_empty_domain() {
        assert!(did_web_url("did:web:").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_found() {
        let resolver = HttpDocumentResolver::new(
            reqwest::Client::new(),
            "https://plc.directory".to_string(),
        );

        let err = resolver
            .resolve_document("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::NotFound);
    }
}
