//! Exercise endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /exercise/:id
/// Returns the exercise with the given ID.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>> {
    let exercise = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Exercise not found.".to_string()))?;

    tracing::debug!(exercise = %id, kind = %exercise.data.kind(), "serving exercise");

    Ok(Json(exercise))
}

/// GET /exercises
/// Lists the catalog, optionally filtered by `kind`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ExerciseListQuery>,
) -> Result<Json<ExerciseListResponse>> {
    let kind = query
        .kind()
        .map_err(|kind| ApiError::BadRequest(format!("Unknown exercise kind: {}", kind)))?;

    let exercises = match kind {
        Some(kind) => state.catalog.of_kind(kind).cloned().collect(),
        None => state.catalog.iter().cloned().collect(),
    };

    Ok(Json(ExerciseListResponse { exercises }))
}
