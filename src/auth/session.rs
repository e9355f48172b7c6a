//! Session state management.
//!
//! [`SessionManager`] is the single source of truth for "am I logged in":
//! it owns the credential bundle, the refresh/validate protocol, and the
//! durable store. It is explicitly constructed and cheaply cloneable rather
//! than a process-wide singleton, so it can be handed to the request gateway
//! and to background tasks and tested in isolation.
//!
//! Every failure path funnels through [`SessionManager::logout`], so the
//! session always lands in a single consistent unauthenticated state instead
//! of a partial credential combination.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::api::auth_api::{AuthApi, TokenPair};
use crate::auth::claims;
use crate::auth::credentials::Credentials;
use crate::error::AuthError;
use crate::models::User;
use crate::traits::TokenStore;

/// Interval between proactive background expiry checks.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Default)]
struct SessionState {
    credentials: Credentials,
    authenticated: bool,
}

type LogoutHook = Arc<dyn Fn() + Send + Sync>;

/// Owner of the credential lifecycle: login, logout, token retrieval, and
/// the refresh/validate protocol.
#[derive(Clone)]
pub struct SessionManager {
    state: Arc<RwLock<SessionState>>,
    api: AuthApi,
    store: Arc<dyn TokenStore>,
    /// Serializes refresh exchanges so concurrent 401s coalesce into one
    /// network round trip.
    refresh_gate: Arc<AsyncMutex<()>>,
    logout_hook: Option<LogoutHook>,
}

impl SessionManager {
    /// Create a session manager over the given auth endpoints and store.
    pub fn new(api: AuthApi, store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            api,
            store,
            refresh_gate: Arc::new(AsyncMutex::new(())),
            logout_hook: None,
        }
    }

    /// Register a hook invoked after every logout.
    ///
    /// This is the seam where an embedding UI navigates back to its login
    /// screen.
    pub fn with_logout_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.logout_hook = Some(Arc::new(hook));
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a freshly issued token pair and mark the session authenticated.
    ///
    /// Last write wins: logging in over an existing session replaces the
    /// previous credentials outright. The in-memory session is authenticated
    /// even if durable storage fails; the storage error is surfaced so the
    /// caller can warn the user that the session will not survive a restart.
    pub async fn login(&self, tokens: TokenPair) -> Result<(), AuthError> {
        let credentials = Credentials {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            user: tokens.user,
        };

        {
            let mut state = self.write_state();
            state.credentials = credentials.clone();
            state.authenticated = true;
        }
        info!("session authenticated");

        self.store.save(&credentials).await?;
        Ok(())
    }

    /// Tear the session down.
    ///
    /// Notifies the backend so the refresh token is invalidated server-side;
    /// that call is best effort and its failure never blocks local cleanup.
    /// Clears the credential bundle and the durable store together, then
    /// fires the logout hook. Idempotent.
    pub async fn logout(&self) {
        let refresh_token = self.read_state().credentials.refresh_token.clone();

        if let Some(token) = refresh_token {
            match self.api.logout(&token).await {
                Ok(()) => debug!("backend logout acknowledged"),
                Err(e) => warn!("backend logout notification failed: {}", e),
            }
        }

        if let Err(e) = self.store.clear().await {
            warn!("failed to clear credential store: {}", e);
        }

        {
            let mut state = self.write_state();
            state.credentials = Credentials::new();
            state.authenticated = false;
        }
        info!("session cleared");

        if let Some(hook) = &self.logout_hook {
            hook();
        }
    }

    /// The current access token, if any. Pure read, no side effects.
    pub fn get_access_token(&self) -> Option<String> {
        self.read_state().credentials.access_token.clone()
    }

    /// Whether the session currently holds validated credentials.
    pub fn is_authenticated(&self) -> bool {
        self.read_state().authenticated
    }

    /// Snapshot of the authenticated user, cached at login.
    pub fn current_user(&self) -> Option<User> {
        self.read_state().credentials.user.clone()
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Returns `true` when the session ends up holding a usable access
    /// token. A missing or expired refresh token logs the session out
    /// without touching the network; any exchange failure also logs out.
    ///
    /// Concurrent callers coalesce: the exchange is serialized behind a
    /// lock, and a caller that waited while another one completed a refresh
    /// observes the replaced token and succeeds without a second round trip.
    pub async fn refresh_access_token(&self) -> bool {
        let observed = self.get_access_token();
        let _gate = self.refresh_gate.lock().await;

        let current = self.get_access_token();
        if current.is_some() && current != observed {
            debug!("access token already refreshed by a concurrent caller");
            return true;
        }

        let refresh_token = self.read_state().credentials.refresh_token.clone();
        let refresh_token = match refresh_token {
            Some(token) => token,
            None => {
                warn!("no refresh token available, logging out");
                self.logout().await;
                return false;
            }
        };

        if claims::is_token_expired(&refresh_token) {
            warn!("refresh token expired, logging out");
            self.logout().await;
            return false;
        }

        debug!("exchanging refresh token for a new access token");
        match self.api.refresh(&refresh_token).await {
            Ok(response) => {
                let snapshot = {
                    let mut state = self.write_state();
                    state.credentials.access_token = Some(response.access_token);
                    state.authenticated = true;
                    state.credentials.clone()
                };
                if let Err(e) = self.store.save(&snapshot).await {
                    warn!("failed to persist refreshed credentials: {}", e);
                }
                info!("access token refreshed");
                true
            }
            Err(e) => {
                warn!("token refresh failed: {}", e);
                self.logout().await;
                false
            }
        }
    }

    /// Ask the backend whether an access token is still accepted.
    ///
    /// Used by startup re-hydration only, not on every request.
    pub async fn validate_token(&self, token: &str) -> bool {
        self.api.validate_token(token).await
    }

    /// Re-hydrate the session from durable storage.
    ///
    /// Returns whether the session ended up authenticated. An expired or
    /// rejected access token triggers a refresh attempt before giving up;
    /// refresh failure leaves the state unauthenticated via `logout`.
    pub async fn initialize(&self) -> Result<bool, AuthError> {
        let Some(credentials) = self.store.load().await? else {
            debug!("no stored credentials");
            return Ok(false);
        };

        if !credentials.is_complete() {
            warn!("stored credentials are incomplete, discarding");
            if let Err(e) = self.store.clear().await {
                warn!("failed to clear credential store: {}", e);
            }
            return Ok(false);
        }

        let access_token = match credentials.access_token.clone() {
            Some(token) => token,
            None => return Ok(false),
        };

        {
            let mut state = self.write_state();
            state.credentials = credentials;
            state.authenticated = false;
        }

        if claims::is_token_expired(&access_token) {
            debug!("stored access token expired, refreshing");
            return Ok(self.refresh_access_token().await);
        }

        if self.api.validate_token(&access_token).await {
            self.write_state().authenticated = true;
            debug!("stored access token validated");
            return Ok(true);
        }

        debug!("stored access token rejected, refreshing");
        Ok(self.refresh_access_token().await)
    }

    /// Spawn the background keep-alive loop.
    ///
    /// Every [`KEEPALIVE_INTERVAL`] the session proactively refreshes a
    /// near-expiry access token, keeping refresh latency off user-facing
    /// request paths. Abort the returned handle to stop the loop.
    pub fn spawn_keepalive(&self) -> tokio::task::JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(KEEPALIVE_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the loop
            // waits a full interval before the first check.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                session.poke().await;
            }
        })
    }

    /// Run one keep-alive check on demand.
    ///
    /// Embedding UIs call this when the window regains focus, so a token
    /// that aged out while the app was backgrounded is refreshed before the
    /// next user action.
    pub async fn poke(&self) {
        if !self.is_authenticated() {
            return;
        }
        let Some(token) = self.get_access_token() else {
            return;
        };
        if claims::is_token_expired(&token) {
            debug!("access token near expiry, refreshing proactively");
            if !self.refresh_access_token().await {
                debug!("periodic token refresh failed");
            }
        }
    }
}
