use crate::error::{Error, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use ferroflake::{FlakeId, Parts, Sonyflake};
use std::sync::Arc;
use tracing::instrument;

/// Shared state holding the instance's single generator.
#[derive(Clone, Debug)]
pub struct AppState {
    generator: Arc<Sonyflake>,
}

impl AppState {
    pub fn new(generator: Sonyflake) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn generator(&self) -> &Sonyflake {
        &self.generator
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(next_id))
        .route("/decompose/{id}", get(decompose))
        .route("/health", get(health))
        .with_state(state)
}

/// Issues a new ID and returns its decomposition.
///
/// The generator may sleep for up to a time unit when its sequence is
/// exhausted, so it runs on the blocking pool.
#[instrument(level = "debug", skip(state))]
async fn next_id(State(state): State<AppState>) -> Result<Json<Parts>> {
    let generator = Arc::clone(&state.generator);
    let parts = tokio::task::spawn_blocking(move || {
        generator.next_id().map(|id| generator.decompose(id))
    })
    .await??;
    Ok(Json(parts))
}

#[instrument(level = "debug", skip(state))]
async fn decompose(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Parts>> {
    if id > i64::MAX as u64 {
        return Err(Error::InvalidId { id });
    }
    Ok(Json(state.generator.decompose(FlakeId::from_raw(id))))
}

async fn health() -> &'static str {
    "ok"
}
