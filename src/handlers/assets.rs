use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, http::header, response::IntoResponse};

use crate::{error::AppError, AppState};

async fn read_public(state: &AppState, name: &str) -> Result<Vec<u8>, AppError> {
    let path = state.config.public_dir.join(name);
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read static file {}", path.display()))?;
    Ok(data)
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let body = read_public(&state, "index.html").await?;
    Ok(([(header::CONTENT_TYPE, "text/html")], body))
}

/// GET /style.css
pub async fn stylesheet(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_public(&state, "style.css").await?;
    Ok(([(header::CONTENT_TYPE, "text/css")], body))
}
