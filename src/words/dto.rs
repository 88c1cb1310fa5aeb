use serde::Deserialize;

/// Request body for adding a vocabulary word.
#[derive(Debug, Deserialize)]
pub struct CreateWordRequest {
    pub english: String,
    pub korean: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
