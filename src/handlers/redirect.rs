use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::{error::AppError, AppState};

/// GET /{code}
///
/// Everything after the leading `/` of the request target is the short code,
/// query string included, so caller-chosen codes containing `?` resolve.
pub async fn resolve(state: &AppState, uri: &Uri) -> Result<Response, AppError> {
    let target = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    let code = target.strip_prefix('/').unwrap_or(target);

    let links = state.store.load().await?;
    let Some(target) = links.get(code) else {
        tracing::debug!("Unknown short code '{}'", code);
        return Err(AppError::NotFound);
    };

    let location = HeaderValue::from_str(target)
        .with_context(|| format!("stored URL for '{code}' is not a valid Location header"))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Fallback for every request not claimed by an explicit route.
///
/// Any GET is treated as a short-code lookup; every other method is a 404.
pub async fn fallback(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    if method == Method::GET {
        resolve(&state, &uri).await
    } else {
        Err(AppError::RouteNotFound)
    }
}
