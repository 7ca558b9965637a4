/// Service endpoint extraction from a DID document
use crate::error::StepError;
use crate::identity::{DidDocument, ServiceEndpoint};
use url::Url;

/// Service type tag identifying the account's data-hosting service
pub const PDS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";

/// Scans a DID document for the PDS service descriptor and derives the
/// reference-network flag
#[derive(Debug, Clone)]
pub struct EndpointExtractor {
    reference_network_suffix: String,
}

impl EndpointExtractor {
    pub fn new(reference_network_suffix: impl Into<String>) -> Self {
        Self {
            reference_network_suffix: reference_network_suffix.into(),
        }
    }

    /// Extract the PDS endpoint from the document.
    ///
    /// If more than one service matches, the first in document order wins;
    /// document order is the document's own priority signal.
    pub fn extract(&self, document: &DidDocument) -> Result<ServiceEndpoint, StepError> {
        let service = document
            .service
            .iter()
            .find(|service| service.service_type == PDS_SERVICE_TYPE)
            .ok_or_else(|| {
                StepError::not_found(format!("no {} service in document", PDS_SERVICE_TYPE))
            })?;

        Ok(ServiceEndpoint {
            url: service.service_endpoint.clone(),
            bsky_pds: self.is_reference_network(&service.service_endpoint),
        })
    }

    /// Hostname-suffix heuristic: true iff the endpoint hostname ends with
    /// the reference network's domain suffix. Not a cryptographic check.
    fn is_reference_network(&self, endpoint: &str) -> bool {
        Url::parse(endpoint)
            .ok()
            .and_then(|url| {
                url.host_str()
                    .map(|host| host.ends_with(&self.reference_network_suffix))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveErrorKind;
    use crate::identity::Service;

    fn extractor() -> EndpointExtractor {
        EndpointExtractor::new("bsky.network")
    }

    fn doc_with_services(services: Vec<Service>) -> DidDocument {
        DidDocument {
            id: "did:plc:abc123".to_string(),
            also_known_as: vec![],
            service: services,
        }
    }

    fn pds_service(id: &str, endpoint: &str) -> Service {
        Service {
            id: id.to_string(),
            service_type: PDS_SERVICE_TYPE.to_string(),
            service_endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn test_extracts_pds_service() {
        let doc = doc_with_services(vec![
            Service {
                id: "#labeler".to_string(),
                service_type: "AtprotoLabeler".to_string(),
                service_endpoint: "https://labeler.example.org".to_string(),
            },
            pds_service("#atproto_pds", "https://pds1.bsky.network"),
        ]);

        let endpoint = extractor().extract(&doc).unwrap();
        assert_eq!(endpoint.url, "https://pds1.bsky.network");
        assert!(endpoint.bsky_pds);
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let doc = doc_with_services(vec![
            pds_service("#first", "https://first.example.org"),
            pds_service("#second", "https://second.example.org"),
        ]);

        let endpoint = extractor().extract(&doc).unwrap();
        assert_eq!(endpoint.url, "https://first.example.org");
    }

    #[test]
    fn test_no_pds_service_is_not_found() {
        let doc = doc_with_services(vec![]);
        let err = extractor().extract(&doc).unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::NotFound);
    }

    #[test]
    fn test_reference_network_flag() {
        let extractor = extractor();
        assert!(extractor.is_reference_network("https://foo.bsky.network"));
        assert!(!extractor.is_reference_network("https://pds.example.org"));
    }

    #[test]
    fn test_reference_flag_uses_hostname_not_whole_url() {
        // Suffix elsewhere in the URL must not count
        let extractor = extractor();
        assert!(!extractor.is_reference_network("https://pds.example.org/bsky.network"));
        assert!(!extractor.is_reference_network("not a url"));
    }
}
