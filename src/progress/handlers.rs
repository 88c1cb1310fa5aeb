use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::progress::dto::{AnswerRequest, TrackWordRequest};
use crate::progress::repo_types::{UserWord, UserWordWithWord};
use crate::state::AppState;
use crate::words::dto::Pagination;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/progress", post(track_word).get(list_progress))
        .route("/progress/:id", get(get_progress).delete(reset_progress))
        .route("/progress/:id/answers", post(record_answer))
}

fn is_fk_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[instrument(skip(state, payload))]
pub async fn track_word(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<TrackWordRequest>,
) -> Result<(StatusCode, Json<UserWord>), ApiError> {
    let row = match UserWord::create(&state.db, user_id, payload.word_id).await {
        Ok(row) => row,
        // The FK tells us which id was bad only via constraint detail;
        // either way the referenced row does not exist.
        Err(e) if is_fk_violation(&e) => {
            warn!(user_id, word_id = payload.word_id, "tracking unknown user or word");
            return Err(ApiError::NotFound("user or word"));
        }
        Err(e) => return Err(e.into()),
    };
    info!(progress_id = row.id, user_id, word_id = payload.word_id, "word tracked");
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserWord>, ApiError> {
    let row = UserWord::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("progress record"))?;
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn list_progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<UserWordWithWord>>, ApiError> {
    let rows = UserWord::list_by_user(&state.db, user_id, p.limit, p.offset).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn record_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<UserWord>, ApiError> {
    let row = UserWord::record_answer(&state.db, id, payload.correct)
        .await?
        .ok_or(ApiError::NotFound("progress record"))?;
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn reset_progress(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !UserWord::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("progress record"));
    }
    info!(progress_id = id, "progress reset");
    Ok(StatusCode::NO_CONTENT)
}
