//! Shared test utilities: an in-memory auth backend and an environment
//! fixture for driving commands directly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use termd_auth::{AuthError, AuthResult, AuthService, LoginData, MemoryTokenStore, User};
use termd_types::TerminalConfig;
use termd_vfs::{VirtualFs, demo_tree};

use crate::interpreter::Environment;
use crate::state::AppState;

/// Auth backend keeping accounts in memory. Tokens are `token-<email>`.
#[derive(Default)]
pub struct MockAuth {
    accounts: Mutex<HashMap<String, String>>,
    /// Never answer, to exercise timeouts.
    pub stall: bool,
    /// Fail every request as if the network were down.
    pub offline: bool,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(email: &str, password: &str) -> Self {
        let auth = Self::new();
        if let Ok(mut accounts) = auth.accounts.lock() {
            accounts.insert(email.to_string(), password.to_string());
        }
        auth
    }

    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    async fn gate(&self) -> AuthResult<()> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        if self.offline {
            return Err(AuthError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn register(&self, email: &str, password: &str) -> AuthResult<String> {
        self.gate().await?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::Rejected("Email already registered".into()));
        }
        accounts.insert(email.to_string(), password.to_string());
        Ok("Registration successful. Please verify your email.".into())
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<LoginData> {
        self.gate().await?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(stored) if stored == password => Ok(LoginData {
                user: User::new("1", email),
                token: format!("token-{email}"),
            }),
            _ => Err(AuthError::Rejected("Invalid login credentials".into())),
        }
    }

    async fn fetch_user(&self, token: &str) -> AuthResult<User> {
        self.gate().await?;
        let email = token
            .strip_prefix("token-")
            .filter(|e| self.accounts.lock().unwrap().contains_key(*e))
            .ok_or_else(|| AuthError::Rejected("Invalid token".into()))?;
        Ok(User::new("1", email))
    }

    async fn verify(&self, token: &str) -> AuthResult<String> {
        self.gate().await?;
        if token == "good" {
            Ok("Email verified successfully.".into())
        } else {
            Err(AuthError::Rejected("Invalid or expired token".into()))
        }
    }
}

/// Owns everything an [`Environment`] borrows.
pub struct Fixture {
    pub state: AppState,
    pub vfs: VirtualFs,
    pub auth: Arc<dyn AuthService>,
    pub tokens: MemoryTokenStore,
    pub config: TerminalConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_auth(MockAuth::new())
    }

    pub fn with_auth(auth: MockAuth) -> Self {
        Self {
            state: AppState::new(),
            vfs: demo_tree(),
            auth: Arc::new(auth),
            tokens: MemoryTokenStore::new(),
            config: TerminalConfig::default(),
        }
    }

    pub fn env(&mut self) -> Environment<'_> {
        Environment {
            state: &mut self.state,
            vfs: &self.vfs,
            auth: &self.auth,
            tokens: &mut self.tokens,
            config: &self.config,
        }
    }
}
