use crate::{
    api::FinanceApi,
    entities::{AccessToken, User},
    errors::{Error, Result},
    store::RecordStore,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Fallback shown when a login is rejected without detail.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// One user's session against the finance API.
pub struct Session<A> {
    pub(super) api: A,
    pub(super) store: Arc<RwLock<RecordStore>>,
    credential: RwLock<Option<AccessToken>>,
}

impl<A: FinanceApi> Session<A> {
    /// Logged-out session with an empty store.
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: Arc::new(RwLock::new(RecordStore::new())),
            credential: RwLock::new(None),
        }
    }

    /// The backend this session talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Shared handle to the session's record store.
    #[must_use]
    pub fn store(&self) -> Arc<RwLock<RecordStore>> {
        Arc::clone(&self.store)
    }

    /// Whether a credential is held.
    pub async fn is_logged_in(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// The held credential, or [`Error::NotAuthenticated`].
    pub(super) async fn credential(&self) -> Result<AccessToken> {
        self.credential
            .read()
            .await
            .clone()
            .ok_or(Error::NotAuthenticated)
    }

    /// Passes `result` through, discarding the credential and the store's
    /// contents when it reports an expired credential.
    pub(super) async fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result
            && e.is_auth_expired()
        {
            warn!("Credential rejected by server; clearing session");
            self.credential.write().await.take();
            self.store.write().await.clear();
        }
        result
    }

    /// Exchanges email and password for a credential.
    ///
    /// Records from a previous user are dropped.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await.map_err(|e| match e {
            Error::Api {
                status,
                detail: None,
            } => Error::Api {
                status,
                detail: Some(INVALID_CREDENTIALS.to_string()),
            },
            other => other,
        })?;
        self.store.write().await.clear();
        *self.credential.write().await = Some(token);
        info!("Logged in as {}", email);
        Ok(())
    }

    /// Creates an account. Does not log in.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        if password != confirm_password {
            return Err(Error::InvalidInput {
                message: "Passwords do not match!".to_string(),
            });
        }
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::InvalidInput {
                message: "Email and password are required.".to_string(),
            });
        }
        let user = self.api.register(email.trim(), password).await?;
        info!("Registered account {}", user.email);
        Ok(user)
    }

    /// Discards the credential and every held record.
    pub async fn logout(&self) {
        self.credential.write().await.take();
        self.store.write().await.clear();
        info!("Logged out");
    }

    /// The logged-in user's profile.
    pub async fn profile(&self) -> Result<User> {
        let token = self.credential().await?;
        let result = self.api.current_user(&token).await;
        self.guard(result).await
    }

    /// Refetches budgets and expenses together and installs them.
    ///
    /// Returns `Ok(false)` when a newer load or a removal superseded this one
    /// while it was in flight; its response is then discarded. If either fetch
    /// fails the store is left as it was.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<bool> {
        let token = self.credential().await?;
        let ticket = self.store.write().await.begin_load();
        let fetched = tokio::try_join!(
            self.api.list_budgets(&token),
            self.api.list_expenses(&token)
        );
        let (budgets, expenses) = self
            .guard(fetched)
            .await
            .inspect_err(|e| warn!("Reload at epoch {} failed: {}", ticket.epoch(), e))?;
        Ok(self.store.write().await.apply_load(ticket, budgets, expenses))
    }
}
