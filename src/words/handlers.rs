use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;
use crate::words::dto::{CreateWordRequest, Pagination};
use crate::words::repo_types::Word;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/words", post(create_word).get(list_words))
        .route("/words/:id", get(get_word).delete(delete_word))
}

pub(crate) fn validate_new_word(req: &mut CreateWordRequest) -> Result<(), ApiError> {
    req.english = req.english.trim().to_string();
    req.korean = req.korean.trim().to_string();

    if req.english.is_empty() {
        return Err(ApiError::Validation {
            field: "english",
            message: "english is required",
        });
    }
    if req.english.chars().count() > 100 {
        return Err(ApiError::Validation {
            field: "english",
            message: "english must be at most 100 characters",
        });
    }
    if req.korean.is_empty() {
        return Err(ApiError::Validation {
            field: "korean",
            message: "korean is required",
        });
    }
    if req.korean.chars().count() > 100 {
        return Err(ApiError::Validation {
            field: "korean",
            message: "korean must be at most 100 characters",
        });
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_word(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateWordRequest>,
) -> Result<(StatusCode, Json<Word>), ApiError> {
    validate_new_word(&mut payload)?;
    let word = Word::create(&state.db, &payload.english, &payload.korean).await?;
    info!(word_id = word.id, "word created");
    Ok((StatusCode::CREATED, Json(word)))
}

#[instrument(skip(state))]
pub async fn list_words(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Word>>, ApiError> {
    let words = Word::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(words))
}

#[instrument(skip(state))]
pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Word>, ApiError> {
    let word = Word::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("word"))?;
    Ok(Json(word))
}

#[instrument(skip(state))]
pub async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !Word::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("word"));
    }
    info!(word_id = id, "word deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts_a_valid_word() {
        let mut req = CreateWordRequest {
            english: "  apple ".into(),
            korean: "사과".into(),
        };
        validate_new_word(&mut req).unwrap();
        assert_eq!(req.english, "apple");
    }

    #[test]
    fn rejects_blank_term_or_meaning() {
        let mut req = CreateWordRequest {
            english: " ".into(),
            korean: "사과".into(),
        };
        assert!(matches!(
            validate_new_word(&mut req).unwrap_err(),
            ApiError::Validation { field: "english", .. }
        ));

        let mut req = CreateWordRequest {
            english: "apple".into(),
            korean: "".into(),
        };
        assert!(matches!(
            validate_new_word(&mut req).unwrap_err(),
            ApiError::Validation { field: "korean", .. }
        ));
    }

    #[test]
    fn rejects_overlong_term() {
        let mut req = CreateWordRequest {
            english: "e".repeat(101),
            korean: "뜻".into(),
        };
        assert!(matches!(
            validate_new_word(&mut req).unwrap_err(),
            ApiError::Validation { field: "english", .. }
        ));
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        // 100 hangul characters exceed 100 bytes but stay within the limit.
        let mut req = CreateWordRequest {
            english: "apple".into(),
            korean: "가".repeat(100),
        };
        assert!(validate_new_word(&mut req).is_ok());
    }
}
