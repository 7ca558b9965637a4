/// PDS verification round-trip
///
/// Asks the discovered PDS's own com.atproto.identity.resolveHandle endpoint
/// which DID it maps the handle to. Comparing that DID against the discovery
/// DID belongs to the orchestrator, keeping the check centralized.
use crate::error::StepError;
use crate::identity::ServiceEndpoint;
use async_trait::async_trait;

/// XRPC path of the PDS-side handle resolution endpoint
const RESOLVE_HANDLE_PATH: &str = "/xrpc/com.atproto.identity.resolveHandle";

/// Trait seam for the verification round-trip
#[async_trait]
pub trait VerificationCaller: Send + Sync {
    /// Ask the PDS which DID it asserts for the handle
    async fn verify(&self, handle: &str, endpoint: &ServiceEndpoint) -> Result<String, StepError>;
}

/// Production caller using the PDS's XRPC interface
pub struct XrpcVerificationCaller {
    http_client: reqwest::Client,
}

impl XrpcVerificationCaller {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl VerificationCaller for XrpcVerificationCaller {
    async fn verify(&self, handle: &str, endpoint: &ServiceEndpoint) -> Result<String, StepError> {
        let url = format!("{}{}", endpoint.url.trim_end_matches('/'), RESOLVE_HANDLE_PATH);

        let response = self
            .http_client
            .get(&url)
            .query(&[("handle", handle)])
            .send()
            .await
            .map_err(|e| StepError::unreachable(format!("failed to reach PDS: {}", e)))?;

        if !response.status().is_success() {
            return Err(StepError::malformed(format!(
                "PDS returned {} for handle resolution",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StepError::malformed(format!("invalid PDS response: {}", e)))?;

        match body.get("did").and_then(|value| value.as_str()) {
            Some(did) => Ok(did.to_string()),
            None => Err(StepError::malformed("PDS response lacks a did field")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_for(server: &MockServer) -> ServiceEndpoint {
        ServiceEndpoint {
            url: server.uri(),
            bsky_pds: false,
        }
    }

    #[tokio::test]
    async fn test_verify_returns_asserted_did() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOLVE_HANDLE_PATH))
            .and(query_param("handle", "alice.example.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "did": "did:plc:abc123"
                })),
            )
            .mount(&server)
            .await;

        let caller = XrpcVerificationCaller::new(reqwest::Client::new());
        let did = caller
            .verify("alice.example.com", &endpoint_for(&server))
            .await
            .unwrap();
        assert_eq!(did, "did:plc:abc123");
    }

    #[tokio::test]
    async fn test_missing_did_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOLVE_HANDLE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "message": "ok"
                })),
            )
            .mount(&server)
            .await;

        let caller = XrpcVerificationCaller::new(reqwest::Client::new());
        let err = caller
            .verify("alice.example.com", &endpoint_for(&server))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::Malformed);
    }

    #[tokio::test]
    async fn test_error_status_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOLVE_HANDLE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "InvalidRequest",
                "message": "Unable to resolve handle"
            })))
            .mount(&server)
            .await;

        let caller = XrpcVerificationCaller::new(reqwest::Client::new());
        let err = caller
            .verify("alice.example.com", &endpoint_for(&server))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::Malformed);
    }

    #[tokio::test]
    async fn test_connection_failure_is_unreachable() {
        // Nothing listens on this port
        let endpoint = ServiceEndpoint {
            url: "http://127.0.0.1:9".to_string(),
            bsky_pds: false,
        };

        let caller = XrpcVerificationCaller::new(reqwest::Client::new());
        let err = caller
            .verify("alice.example.com", &endpoint)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::Unreachable);
    }
}
