use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{PublicUser, RegisterRequest, RegisterResponse, UpdateProfileRequest};
use crate::users::password::hash_password;
use crate::users::repo_types::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalize and validate a registration request in place.
///
/// Length rules are checked in characters, and the password window is
/// enforced before hashing so an over-long secret is rejected up front
/// rather than silently truncated by any hash scheme with a fixed input
/// limit.
pub(crate) fn validate_register(req: &mut RegisterRequest) -> Result<(), ApiError> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();
    req.username = req.username.trim().to_string();
    req.prompt = req
        .prompt
        .take()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    if req.name.is_empty() {
        return Err(ApiError::Validation {
            field: "name",
            message: "name is required",
        });
    }
    if req.name.chars().count() > 50 {
        return Err(ApiError::Validation {
            field: "name",
            message: "name must be at most 50 characters",
        });
    }

    if req.email.is_empty() {
        return Err(ApiError::Validation {
            field: "email",
            message: "email is required",
        });
    }
    if req.email.chars().count() > 100 {
        return Err(ApiError::Validation {
            field: "email",
            message: "email must be at most 100 characters",
        });
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation {
            field: "email",
            message: "email format is invalid",
        });
    }

    let password_len = req.password.chars().count();
    if password_len < 8 || password_len > 72 {
        return Err(ApiError::Validation {
            field: "password",
            message: "password must be 8-72 characters",
        });
    }

    if req.username.is_empty() {
        return Err(ApiError::Validation {
            field: "username",
            message: "username is required",
        });
    }
    if req.username.chars().count() > 50 {
        return Err(ApiError::Validation {
            field: "username",
            message: "username must be at most 50 characters",
        });
    }

    Ok(())
}

fn unique_violation_field(e: &sqlx::Error) -> Option<&'static str> {
    let db = match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => db,
        _ => return None,
    };
    // Postgres default constraint names for the three unique columns.
    Some(match db.constraint() {
        Some("users_email_key") => "email",
        Some("users_username_key") => "username",
        Some("users_name_key") => "name",
        _ => "account",
    })
}

/// Register a new user.
///
/// Pre-checks run in a fixed order (email, username, name) and fail fast
/// before any mutation. They are check-then-act: a concurrent registration
/// can still reach the insert first, in which case the unique constraint is
/// the arbiter and its violation is re-signalled as the same conflict kind
/// as the pre-checks. The single INSERT is the only mutation, so the
/// operation is all-or-nothing.
pub async fn register(
    state: &AppState,
    mut req: RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    validate_register(&mut req)?;

    if User::exists_by_email(&state.db, &req.email).await? {
        warn!(email = %req.email, "email already registered");
        return Err(ApiError::Conflict("email"));
    }
    if User::exists_by_username(&state.db, &req.username).await? {
        warn!(username = %req.username, "username already registered");
        return Err(ApiError::Conflict("username"));
    }
    if User::exists_by_name(&state.db, &req.name).await? {
        warn!(name = %req.name, "name already registered");
        return Err(ApiError::Conflict("name"));
    }

    let hash = hash_password(&req.password)?;

    let user = match User::create(
        &state.db,
        &req.name,
        &req.email,
        &hash,
        &req.username,
        req.prompt.as_deref(),
    )
    .await
    {
        Ok(u) => u,
        Err(e) => {
            if let Some(field) = unique_violation_field(&e) {
                // Lost the race between pre-check and insert.
                warn!(%field, "unique constraint hit on insert");
                return Err(ApiError::Conflict(field));
            }
            return Err(e.into());
        }
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(RegisterResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        name: user.name,
    })
}

/// Change a user's display name and/or prompt.
pub async fn update_profile(
    state: &AppState,
    id: i64,
    mut req: UpdateProfileRequest,
) -> Result<PublicUser, ApiError> {
    if let Some(name) = req.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation {
                field: "name",
                message: "name is required",
            });
        }
        if name.chars().count() > 50 {
            return Err(ApiError::Validation {
                field: "name",
                message: "name must be at most 50 characters",
            });
        }
    }
    req.prompt = req
        .prompt
        .take()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let current = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    if let Some(name) = req.name.as_deref() {
        if name != current.name && User::exists_by_name(&state.db, name).await? {
            return Err(ApiError::Conflict("name"));
        }
    }

    let updated = match User::update_profile(&state.db, id, req.name.as_deref(), req.prompt.as_deref())
        .await
    {
        Ok(row) => row.ok_or(ApiError::NotFound("user"))?,
        Err(e) => {
            if unique_violation_field(&e).is_some() {
                return Err(ApiError::Conflict("name"));
            }
            return Err(e.into());
        }
    };

    info!(user_id = updated.id, "profile updated");
    Ok(updated.into())
}

/// Remove a user and, through the cascade, every progress row they own.
pub async fn delete_user(state: &AppState, id: i64) -> Result<(), ApiError> {
    if !User::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("user"));
    }
    info!(user_id = id, "user deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: "Alice".into(),
            email: "alice@x.com".into(),
            password: "password123".into(),
            username: "alice_w".into(),
            prompt: None,
        }
    }

    #[test]
    fn accepts_a_valid_request() {
        let mut req = valid_request();
        assert!(validate_register(&mut req).is_ok());
    }

    #[test]
    fn normalizes_email_case_and_whitespace() {
        let mut req = valid_request();
        req.email = "  Alice@X.Com ".into();
        validate_register(&mut req).unwrap();
        assert_eq!(req.email, "alice@x.com");
    }

    #[test]
    fn blank_prompt_becomes_none() {
        let mut req = valid_request();
        req.prompt = Some("   ".into());
        validate_register(&mut req).unwrap();
        assert_eq!(req.prompt, None);
    }

    #[test]
    fn rejects_password_of_7_chars() {
        let mut req = valid_request();
        req.password = "1234567".into();
        let err = validate_register(&mut req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "password", .. }));
    }

    #[test]
    fn rejects_password_of_73_chars() {
        let mut req = valid_request();
        req.password = "x".repeat(73);
        let err = validate_register(&mut req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "password", .. }));
    }

    #[test]
    fn accepts_password_boundaries() {
        for len in [8usize, 72] {
            let mut req = valid_request();
            req.password = "x".repeat(len);
            assert!(validate_register(&mut req).is_ok(), "len {len}");
        }
    }

    #[test]
    fn rejects_bad_email_shape() {
        for email in ["not-an-email", "a@b", "a b@c.com", ""] {
            let mut req = valid_request();
            req.email = email.into();
            let err = validate_register(&mut req).unwrap_err();
            assert!(
                matches!(err, ApiError::Validation { field: "email", .. }),
                "email {email:?}"
            );
        }
    }

    #[test]
    fn rejects_overlong_fields() {
        let mut req = valid_request();
        req.name = "n".repeat(51);
        assert!(matches!(
            validate_register(&mut req).unwrap_err(),
            ApiError::Validation { field: "name", .. }
        ));

        let mut req = valid_request();
        req.username = "u".repeat(51);
        assert!(matches!(
            validate_register(&mut req).unwrap_err(),
            ApiError::Validation { field: "username", .. }
        ));

        let mut req = valid_request();
        req.email = format!("{}@x.com", "e".repeat(100));
        assert!(matches!(
            validate_register(&mut req).unwrap_err(),
            ApiError::Validation { field: "email", .. }
        ));
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut req = valid_request();
        req.name = "  ".into();
        assert!(matches!(
            validate_register(&mut req).unwrap_err(),
            ApiError::Validation { field: "name", .. }
        ));

        let mut req = valid_request();
        req.username = "".into();
        assert!(matches!(
            validate_register(&mut req).unwrap_err(),
            ApiError::Validation { field: "username", .. }
        ));
    }

    #[test]
    fn email_regex_accepts_common_shapes() {
        assert!(is_valid_email("dup@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("dup@example"));
    }
}
