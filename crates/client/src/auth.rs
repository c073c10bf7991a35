//! Application-scoped session: the stored bearer token and the user it
//! resolves to. Created once per command and passed by reference.

use crate::client::ApiClient;
use common::{InsightError, InsightResult};
use domain::User;
use infrastructure::session::TokenStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct AuthContext {
    client: Arc<ApiClient>,
    store: Arc<dyn TokenStore>,
    user: RwLock<Option<User>>,
}

impl AuthContext {
    pub fn new(client: Arc<ApiClient>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            user: RwLock::new(None),
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Resolve the current user from the stored token.
    ///
    /// A token the server rejects (401/403) is removed from the store and
    /// the context stays anonymous. Other failures are returned.
    pub async fn init(&self) -> InsightResult<Option<User>> {
        let Some(token) = self.store.load()? else {
            debug!("No stored session token");
            self.reset();
            return Ok(None);
        };
        self.client.set_token(Some(token));

        match self.client.me().await {
            Ok(user) => {
                info!(user = %user.email, "Session restored");
                *self.user.write() = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) if matches!(e.status(), Some(401) | Some(403)) => {
                warn!(error = %e, "Stored session token rejected, clearing it");
                self.store.clear()?;
                self.reset();
                Ok(None)
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    /// Persist `token` and resolve its user; a rejected token is not kept
    pub async fn sign_in_with_token(&self, token: &str) -> InsightResult<User> {
        self.store.save(token)?;
        self.init().await?.ok_or(InsightError::Unauthenticated)
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn require_user(&self) -> InsightResult<User> {
        self.current_user().ok_or(InsightError::Unauthenticated)
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.read().as_ref().map(|user| user.id.to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Tell the server, then forget the token locally even if that failed
    pub async fn logout(&self) -> InsightResult<()> {
        if self.client.token().is_some() {
            if let Err(e) = self.client.logout().await {
                warn!(error = %e, "Server-side logout failed");
            }
        }
        self.store.clear()?;
        self.reset();
        info!("Logged out");
        Ok(())
    }

    fn reset(&self) {
        self.client.set_token(None);
        *self.user.write() = None;
    }
}
