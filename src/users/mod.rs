use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub(crate) mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::user_routes())
}
