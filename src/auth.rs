//! Login outcome and the gate in front of the catalog view.
//!
//! The network call itself lives behind [`Authenticator`]. Whatever it does,
//! the result is an explicit [`AuthOutcome`], and only `Authenticated` grants
//! [`CatalogAccess`]. A failed login never falls through to the catalog.

use crate::storage::KeyValueStore;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Storage key for the session token returned by a successful login.
pub const TOKEN_KEY: &str = "userToken";

#[derive(Clone, Debug, Default)]
/// Email and password as typed on the login form.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Opaque bearer token issued by the login service.
pub struct AuthToken(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Both Email and Password are required")]
    MissingCredentials,
    #[error("login rejected: {0}")]
    Rejected(String),
    #[error("login service unreachable: {0}")]
    Network(String),
    #[error("session token could not be saved: {0}")]
    TokenNotStored(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthToken),
    Failed(AuthFailure),
}

#[derive(Debug)]
/// Proof of a successful login; required to open the catalog view.
pub struct CatalogAccess {
    token: AuthToken,
}

/// Performs the login request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> AuthOutcome;
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Gate the catalog view on a successful login.
    pub fn into_access(self) -> Result<CatalogAccess, AuthFailure> {
        match self {
            AuthOutcome::Authenticated(token) => Ok(CatalogAccess { token }),
            AuthOutcome::Failed(reason) => Err(reason),
        }
    }
}

impl CatalogAccess {
    pub fn token(&self) -> &AuthToken {
        &self.token
    }
}

/// Run a login: check the form, call the authenticator, save the token.
///
/// Incomplete credentials fail without contacting the service. A token that
/// cannot be saved turns the outcome into `Failed(TokenNotStored)`.
pub async fn login<A, S>(authenticator: &A, storage: &S, credentials: &Credentials) -> AuthOutcome
where
    A: Authenticator + ?Sized,
    S: KeyValueStore + ?Sized,
{
    if !credentials.is_complete() {
        return AuthOutcome::Failed(AuthFailure::MissingCredentials);
    }

    match authenticator.authenticate(credentials).await {
        AuthOutcome::Authenticated(token) => {
            if let Err(err) = storage.set(TOKEN_KEY, token.0.clone()).await {
                warn!(error = %err, "could not persist session token");
                return AuthOutcome::Failed(AuthFailure::TokenNotStored(err.to_string()));
            }
            info!(email = %credentials.email, "login succeeded");
            AuthOutcome::Authenticated(token)
        }
        AuthOutcome::Failed(reason) => {
            warn!(email = %credentials.email, reason = %reason, "login failed");
            AuthOutcome::Failed(reason)
        }
    }
}
