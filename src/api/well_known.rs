/// Well-known endpoints
/// Handles /.well-known/webfinger resource discovery (RFC 7033)
use crate::{
    context::AppContext,
    error::{FingerError, FingerResult},
    jrd::{self, JRD_CONTENT_TYPE},
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{debug, error};

pub const WEBFINGER_PATH: &str = "/.well-known/webfinger";

/// Methods served on the WebFinger endpoint
const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build well-known routes
///
/// `get` also answers HEAD; every other method besides OPTIONS gets 405.
pub fn routes() -> Router<AppContext> {
    Router::new().route(WEBFINGER_PATH, get(webfinger).options(webfinger_options))
}

/// Query parameters for a WebFinger request
///
/// `rel` filters are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct WebFingerParams {
    pub resource: Option<String>,
}

/// /.well-known/webfinger?resource=<uri>
///
/// Returns the JRD for the account the resource identifies. Resources that
/// cannot be resolved, whatever the reason, are reported as 404.
pub async fn webfinger(
    State(ctx): State<AppContext>,
    Query(params): Query<WebFingerParams>,
) -> FingerResult<Response> {
    let resource = params
        .resource
        .ok_or_else(|| FingerError::Validation("Missing resource parameter".to_string()))?;

    let account = ctx.resolver.resolve(&resource).await.map_err(|e| {
        if e.is_resolution_error() {
            debug!("Unresolvable resource {}: {}", resource, e);
        } else {
            error!("Lookup of {} failed: {}", resource, e);
        }
        e
    })?;

    let jrd = jrd::assemble(account)
        .ok_or_else(|| FingerError::NotFound(format!("No account for {}", resource)))?;

    let body = serde_json::to_vec(&jrd)
        .map_err(|e| FingerError::Internal(format!("Failed to serialize JRD: {}", e)))?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JRD_CONTENT_TYPE)
        .body(body.into())
        .map_err(|e| FingerError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// OPTIONS /.well-known/webfinger
pub async fn webfinger_options() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(header::ALLOW, ALLOWED_METHODS)])
}
