//! # Identity Stub
//!
//! **Not authentication.** Login accepts whatever name and email the client sends, checks
//! only that the branch resolves, and signs those claims so the client can carry them
//! around. No password is checked and nothing on the server ever verifies the token.
//!
//! ## Cookie
//! - `pyq_token`: the signed claims, HttpOnly, SameSite=Lax, 12 hours
//! - `Secure` only when running in production
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const TOKEN_COOKIE: &str = "pyq_token";
pub const TOKEN_TTL_HOURS: i64 = 12;

const DEFAULT_NAME: &str = "Student";
const DEFAULT_EMAIL: &str = "student@example.com";

/// Unknown fields such as `password` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub branch: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub name: String,
    pub email: String,
    pub branch: String,
    pub branch_slug: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: AuthUser,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

impl AuthUser {
    pub fn new(request: LoginRequest, branch_code: &str, branch_slug: &str) -> Self {
        Self {
            name: request.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            email: request.email.unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            branch: branch_code.to_string(),
            branch_slug: branch_slug.to_string(),
        }
    }
}

pub fn issue_token(user: &AuthUser, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();

    let claims = Claims {
        user: user.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn token_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        TOKEN_TTL_HOURS * 60 * 60
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::{AuthUser, Claims, LoginRequest, issue_token, token_cookie};

    #[test]
    fn test_defaults() {
        let user = AuthUser::new(LoginRequest::default(), "CSE(AI&ML)", "cse-ai-and-ml");

        assert_eq!(user.name, "Student");
        assert_eq!(user.email, "student@example.com");
        assert_eq!(user.branch, "CSE(AI&ML)");
    }

    #[test]
    fn test_token_round_trip() {
        let request = LoginRequest {
            name: Some("Asha".to_string()),
            email: Some("asha@example.edu".to_string()),
            branch: Some("cse-ai-and-ml".to_string()),
        };
        let user = AuthUser::new(request, "CSE(AI&ML)", "cse-ai-and-ml");

        let token = issue_token(&user, "secret").unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.user, user);
        assert_eq!(claims.exp - claims.iat, 12 * 60 * 60);
    }

    #[test]
    fn test_cookie() {
        assert_eq!(
            token_cookie("abc", false),
            "pyq_token=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=43200"
        );
        assert!(token_cookie("abc", true).ends_with("; Secure"));
    }
}
