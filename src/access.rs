use std::sync::Arc;

use axum::{
    async_trait,
    extract::{Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::config::AccessMode;
use crate::state::AppState;

/// Reason an inbound request was turned away at the gate.
#[derive(Debug)]
pub struct Denied(pub String);

/// Decides whether an inbound request may reach business logic.
///
/// Stateless by contract: implementations inspect the request head only and
/// never create or consult server-side sessions.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn authorize(&self, parts: &Parts) -> Result<(), Denied>;
}

/// Temporary policy that admits every request, registration included.
/// Stands in until a token-validating policy replaces it behind the same
/// trait.
pub struct AllowAll;

#[async_trait]
impl AccessPolicy for AllowAll {
    async fn authorize(&self, _parts: &Parts) -> Result<(), Denied> {
        Ok(())
    }
}

pub fn policy_for(mode: AccessMode) -> Arc<dyn AccessPolicy> {
    match mode {
        AccessMode::Open => Arc::new(AllowAll),
    }
}

/// Middleware consulting the configured policy before any handler runs.
pub async fn gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let (parts, body) = req.into_parts();
    if let Err(Denied(reason)) = state.access.authorize(&parts).await {
        warn!(uri = %parts.uri, %reason, "request denied");
        return Err((StatusCode::UNAUTHORIZED, reason));
    }
    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_parts() -> Parts {
        axum::http::Request::builder()
            .uri("/api/v1/auth/register")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn allow_all_admits_anything() {
        let policy = AllowAll;
        assert!(policy.authorize(&dummy_parts()).await.is_ok());
    }

    #[tokio::test]
    async fn open_mode_selects_allow_all() {
        let policy = policy_for(AccessMode::Open);
        assert!(policy.authorize(&dummy_parts()).await.is_ok());
    }
}
