use serde::Deserialize;

/// Request body to start tracking a word for a user.
#[derive(Debug, Deserialize)]
pub struct TrackWordRequest {
    pub word_id: i64,
}

/// One quiz/review outcome for a tracked word.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub correct: bool,
}
