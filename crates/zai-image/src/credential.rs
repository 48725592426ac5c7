use std::sync::OnceLock;

use http::{HeaderMap, header::AUTHORIZATION};
use regex::Regex;
use secrecy::SecretString;

use crate::error::{ImageGenError, Result};

fn bearer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^Bearer\s+(.+)$").expect("must be valid regex"))
}

/// Pull the caller's upstream session token out of `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively; the token itself is passed
/// through untouched.
pub fn bearer_token(headers: &HeaderMap) -> Result<SecretString> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(ImageGenError::AuthenticationFailed(
            "Missing Authorization header".to_owned(),
        ));
    };

    let invalid = || ImageGenError::AuthenticationFailed("Invalid Authorization header format".to_owned());

    let value = value.to_str().map_err(|_| invalid())?;
    if value.is_empty() {
        return Err(ImageGenError::AuthenticationFailed(
            "Missing Authorization header".to_owned(),
        ));
    }

    bearer()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|token| SecretString::from(token.as_str()))
        .ok_or_else(invalid)
}
