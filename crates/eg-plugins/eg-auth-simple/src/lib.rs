//! # eg-auth-simple
//!
//! Argon2-based implementation of `AuthProvider`.
//! Handles the configured admin account, self-registered users, and
//! bearer-token sessions. Everything lives in memory and resets on restart.
//!
//! Sessions expire after a configurable lifetime and the table is capped, so
//! tokens that are never logged out do not accumulate. Argon2 work runs on
//! the blocking pool.

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use eg_core::error::{AppError, Result};
use eg_core::models::{CurrentUser, Session};
use eg_core::traits::AuthProvider;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Sha256, Digest};
use std::collections::HashMap;
use tokio::sync::RwLock;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct StoredUser {
    user: CurrentUser,
    password_hash: String,
}

struct SessionEntry {
    user: CurrentUser,
    expires_at: DateTime<Utc>,
    /// Issue order, used to evict the oldest session when the table is full
    issued: u64,
}

#[derive(Default)]
struct AuthState {
    /// Registered (non-admin) users by normalized email
    users: HashMap<String, StoredUser>,
    /// Bearer token -> identity
    sessions: HashMap<String, SessionEntry>,
    next_issued: u64,
}

pub struct SimpleAuthProvider {
    admin_email: String,
    /// Argon2 PHC string. `None` disables admin login.
    admin_password_hash: Option<String>,
    /// Salt for deriving stable user ids from emails
    id_salt: String,
    session_ttl: Duration,
    max_sessions: usize,
    state: RwLock<AuthState>,
}

impl SimpleAuthProvider {
    pub fn new(admin_email: &str, admin_password_hash: Option<String>, id_salt: &str) -> Self {
        Self {
            admin_email: normalize_email(admin_email),
            admin_password_hash,
            id_salt: id_salt.to_string(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            max_sessions: DEFAULT_MAX_SESSIONS,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Derives a user id (e.g., 3f9a0c1e7b2d4a65) from the normalized email.
    /// The same person always lands on the same interaction records.
    pub fn derive_user_id(&self, email: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.id_salt.as_bytes());
        hasher.update(normalize_email(email).as_bytes());
        let hash = hex::encode(hasher.finalize());
        hash[..16].to_string()
    }

    fn identity(&self, name: &str, email: &str, is_admin: bool) -> CurrentUser {
        let email = normalize_email(email);
        let name = match name.trim() {
            "" => email.split('@').next().unwrap_or_default().to_string(),
            given => given.to_string(),
        };
        CurrentUser {
            id: self.derive_user_id(&email),
            email,
            name,
            is_admin,
        }
    }

    async fn open_session(&self, user: CurrentUser) -> Result<Session> {
        let token = new_token()?;
        let now = Utc::now();

        let mut state = self.state.write().await;
        state.sessions.retain(|_, s| s.expires_at > now);
        while state.sessions.len() >= self.max_sessions {
            let oldest = state
                .sessions
                .iter()
                .min_by_key(|(_, s)| s.issued)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(oldest) => {
                    log::debug!("Session table full, evicting oldest session");
                    state.sessions.remove(&oldest);
                }
                None => break,
            }
        }

        let issued = state.next_issued;
        state.next_issued += 1;
        state.sessions.insert(
            token.clone(),
            SessionEntry { user: user.clone(), expires_at: now + self.session_ttl, issued },
        );
        Ok(Session { token, user })
    }
}

#[async_trait]
impl AuthProvider for SimpleAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);

        if email == self.admin_email {
            let verified = match &self.admin_password_hash {
                Some(hash) => verify_password_blocking(password, hash.clone()).await,
                None => false,
            };
            if !verified {
                log::warn!("Rejected admin login for {}", email);
                return Err(AppError::Unauthorized("invalid email or password".into()));
            }
            log::info!("Admin {} logged in", email);
            return self.open_session(self.identity("", &email, true)).await;
        }

        let stored = {
            let state = self.state.read().await;
            state
                .users
                .get(&email)
                .map(|stored| (stored.user.clone(), stored.password_hash.clone()))
        };
        let verified = match stored {
            Some((user, hash)) => verify_password_blocking(password, hash).await.then_some(user),
            None => None,
        };
        match verified {
            Some(user) => self.open_session(user).await,
            None => {
                log::warn!("Rejected login for {}", email);
                Err(AppError::Unauthorized("invalid email or password".into()))
            }
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        if !email.contains('@') {
            return Err(AppError::ValidationError("email must contain '@'".into()));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }
        if email == self.admin_email {
            return Err(AppError::Conflict(format!("{} is already registered", email)));
        }

        let password_hash = hash_password_blocking(password).await?;
        let user = self.identity(name, &email, false);
        {
            let mut state = self.state.write().await;
            if state.users.contains_key(&email) {
                return Err(AppError::Conflict(format!("{} is already registered", email)));
            }
            state.users.insert(email.clone(), StoredUser { user: user.clone(), password_hash });
        }

        log::info!("Registered user {} ({})", user.id, email);
        self.open_session(user).await
    }

    async fn resolve(&self, token: &str) -> Option<CurrentUser> {
        let state = self.state.read().await;
        state
            .sessions
            .get(token)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user.clone())
    }

    async fn logout(&self, token: &str) {
        self.state.write().await.sessions.remove(token);
    }
}

/// Produces an Argon2 PHC string for storing (e.g., the admin password at startup).
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AppError::Internal(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Internal(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Runs [`hash_password`] on the blocking pool.
async fn hash_password_blocking(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

/// Runs [`verify_password`] on the blocking pool. A panicked task counts as a mismatch.
async fn verify_password_blocking(password: &str, hash: String) -> bool {
    let password = password.to_string();
    match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
        Ok(verified) => verified,
        Err(e) => {
            log::error!("Password verification task failed: {}", e);
            false
        }
    }
}

/// Verifies if a provided password matches a stored Argon2 hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 32 random bytes, URL-safe base64 without padding.
fn new_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
