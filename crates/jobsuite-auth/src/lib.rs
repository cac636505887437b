//! # jobsuite-auth
//!
//! Authentication plumbing for JobSuite: OS keychain token storage
//! (`keyring`) with env and file fallbacks, unverified JWT claims decoding,
//! and a cached password-grant service login against the backend.

pub mod claims;
pub mod error;
pub mod login;
pub mod token_store;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use login::ServiceLogin;
pub use token_store::TokenSource;

/// Resolve the stored access token, rejecting ones that are already dead.
///
/// # Errors
///
/// Returns [`AuthError::MissingToken`] when nothing is stored and
/// [`AuthError::TokenExpired`] when the stored token's claims say it expires
/// within the next minute. A token that does not decode as a JWT is returned
/// as-is — the backend is the authority on whether it works.
pub fn resolve_token() -> Result<String, AuthError> {
    let token = token_store::load().ok_or(AuthError::MissingToken)?;
    if let Ok(claims) = TokenClaims::decode_unverified(&token) {
        if claims.is_expired(60) {
            return Err(AuthError::TokenExpired);
        }
    }
    Ok(token)
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
