/// Handle resolution endpoint
///
/// Thin HTTP glue over the resolution pipeline: accepts a handle via query
/// parameter (GET) or JSON body (POST) and returns the verified result.
use crate::{
    context::AppContext,
    error::{LocatorError, LocatorResult},
    identity::ResolutionResult,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    /// Handle to resolve (e.g., "alice.example.com")
    pub handle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub handle: Option<String>,
}

/// GET / - handle comes from the query string
pub async fn resolve_get(
    State(ctx): State<AppContext>,
    Query(params): Query<ResolveParams>,
) -> LocatorResult<Json<ResolutionResult>> {
    resolve(&ctx, params.handle).await
}

/// POST / - handle comes from the request body
pub async fn resolve_post(
    State(ctx): State<AppContext>,
    Json(req): Json<ResolveRequest>,
) -> LocatorResult<Json<ResolutionResult>> {
    resolve(&ctx, req.handle).await
}

async fn resolve(ctx: &AppContext, handle: Option<String>) -> LocatorResult<Json<ResolutionResult>> {
    let handle = handle.unwrap_or_default();
    if handle.trim().is_empty() {
        return Err(LocatorError::Validation(
            "Handle parameter is required".to_string(),
        ));
    }

    let result = ctx.pipeline.resolve(&handle).await?;
    Ok(Json(result))
}

/// Build resolution routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/", get(resolve_get).post(resolve_post))
}
