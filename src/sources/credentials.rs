//! Session credentials for source and target collaborators.
//!
//! The sync core never touches credentials itself. Collaborators that talk to
//! an authenticated service hold a [`CredentialProvider`] and ask it for a
//! token before each request batch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::fmt;
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};

/// A session token and the header it is sent under.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub header: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(header: impl Into<String>, token: impl Into<String>) -> SyncResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SyncError::Credential(
                "authenticator returned an empty session token".to_string(),
            ));
        }
        Ok(Self {
            header: header.into(),
            token,
            issued_at: Utc::now(),
        })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("header", &self.header)
            .field("token", &"***")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Lifecycle of the credential a collaborator authenticates with.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// A usable credential, reusing a cached one while it stays valid.
    async fn acquire(&self) -> SyncResult<Credential>;

    /// Discard any cached credential and log in again.
    async fn refresh(&self) -> SyncResult<Credential>;

    /// Forget the cached credential.
    fn invalidate(&self);
}

/// The remote half of a session: logging in and checking a token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self) -> SyncResult<Credential>;

    /// Whether the service still accepts `credential`.
    async fn validate(&self, credential: &Credential) -> SyncResult<bool>;
}

/// Caches one session in memory, validating it before reuse.
pub struct SessionCredentialProvider<A> {
    authenticator: A,
    cached: RwLock<Option<Credential>>,
}

impl<A: Authenticator> SessionCredentialProvider<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            cached: RwLock::new(None),
        }
    }

    pub fn has_cached(&self) -> bool {
        self.cached.read().is_some()
    }

    async fn login(&self) -> SyncResult<Credential> {
        let credential = self.authenticator.login().await?;
        info!(header = %credential.header, "🔑 Acquired new session");
        *self.cached.write() = Some(credential.clone());
        Ok(credential)
    }
}

impl<A> fmt::Debug for SessionCredentialProvider<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentialProvider")
            .field("has_cached", &self.cached.read().is_some())
            .finish()
    }
}

#[async_trait]
impl<A: Authenticator> CredentialProvider for SessionCredentialProvider<A> {
    async fn acquire(&self) -> SyncResult<Credential> {
        let cached = self.cached.read().clone();
        if let Some(credential) = cached {
            if self.authenticator.validate(&credential).await? {
                debug!("Reusing cached session");
                return Ok(credential);
            }
            debug!("Cached session rejected, logging in again");
        }
        self.login().await
    }

    async fn refresh(&self) -> SyncResult<Credential> {
        self.invalidate();
        self.login().await
    }

    fn invalidate(&self) {
        self.cached.write().take();
    }
}
