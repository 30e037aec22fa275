use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use crate::{
    error::{AppError, StoreError},
    models::{Links, ShortenRequest, ShortenResponse},
    AppState,
};

/// POST /shorten
///
/// The body is fully buffered by the `Bytes` extractor before it is decoded.
/// Load, insert and save run under `AppState::write_lock`, so two concurrent
/// creates can never both start from the same snapshot.
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    tracing::debug!("Shorten request body: {}", String::from_utf8_lossy(&body));

    let req: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejecting malformed shorten body: {}", e);
        AppError::Validation("Invalid request body")
    })?;

    let url = req
        .url()
        .ok_or(AppError::Validation("URL is required"))?
        .to_owned();

    let short_code = req
        .short_code()
        .map(str::to_owned)
        .unwrap_or_else(state.generate_code);

    let _guard = state.write_lock.lock().await;

    let mut links = state.store.load().await?;
    if let Err(e) = links.insert(short_code.as_str(), url.as_str()) {
        if let StoreError::DuplicateCode(code) = &e {
            tracing::warn!("Short code '{}' already exists", code);
        }
        return Err(e.into());
    }
    state.store.save(&links).await?;

    tracing::info!("Created short link '{}' -> {}", short_code, url);

    Ok(Json(ShortenResponse {
        success: true,
        short_code,
    }))
}

/// GET /links
pub async fn list_links(State(state): State<Arc<AppState>>) -> Result<Json<Links>, AppError> {
    let links = state.store.load().await?;
    Ok(Json(links))
}
