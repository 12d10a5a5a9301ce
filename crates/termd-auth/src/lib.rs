//! Authentication collaborator for Terminal-D.
//!
//! The terminal only consumes the contract in [`AuthService`]; the HTTP
//! implementation talks JSON to the backend and [`TokenStore`] keeps the
//! bearer token between runs.

mod client;
mod store;

use async_trait::async_trait;

pub use client::HttpAuthClient;
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Local part of the email, shown in the prompt prefix.
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        let username = email.split('@').next().unwrap_or_default().to_string();
        Self {
            id: id.into(),
            email,
            username,
        }
    }
}

/// Successful login: the user plus the bearer token to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

/// Failures reported by the auth collaborator. The message is meant for
/// display in the terminal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend answered and refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The response could not be understood.
    #[error("{0}")]
    Decode(String),
}

/// Convenience alias.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// The backend authentication endpoints.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. Returns the backend's confirmation message.
    async fn register(&self, email: &str, password: &str) -> AuthResult<String>;

    /// Exchange credentials for a user and bearer token.
    async fn login(&self, email: &str, password: &str) -> AuthResult<LoginData>;

    /// Look up the user owning a bearer token.
    async fn fetch_user(&self, token: &str) -> AuthResult<User>;

    /// Confirm an email address with the token from the verification mail.
    async fn verify(&self, token: &str) -> AuthResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_email_local_part() {
        let user = User::new("7", "ada@example.com");
        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn username_without_at_is_whole_email() {
        assert_eq!(User::new("1", "localonly").username, "localonly");
    }

    #[test]
    fn auth_error_displays_message() {
        assert_eq!(AuthError::Rejected("Invalid login".into()).to_string(), "Invalid login");
        assert_eq!(AuthError::Transport("timed out".into()).to_string(), "timed out");
    }
}
