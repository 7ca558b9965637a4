/// PDS Locator - ATProto handle resolution service
///
/// Resolves a handle to a verified DID, locates the account's Personal Data
/// Server from the DID document, and confirms the mapping against the PDS
/// itself before reporting a result.
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod server;
