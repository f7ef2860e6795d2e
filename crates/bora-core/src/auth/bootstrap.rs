//! Session bootstrap state machine.
//!
//! On app start the bootstrapper reads the stored token pair, verifies the
//! access token, silently refreshes it at most once, fetches the user
//! profile, and resolves a terminal [`SessionState`]. Every step failure
//! follows that step's failure transition; nothing is ever left pending and
//! nothing here is fatal to the process.

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{ApiError, AuthApi, LoginRequest};
use crate::models::UserProfile;
use crate::store::{CredentialStore, StoreError, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

use super::{AuthError, SessionState};

/// Internal state of one bootstrap cycle. Terminal outcomes are returned
/// directly rather than modeled as variants.
enum Step {
    VerifyingAccess {
        access_token: String,
        refresh_token: String,
    },
    Refreshing {
        refresh_token: String,
    },
    FetchingProfile {
        access_token: String,
        /// Whether the token was just minted by a refresh. A freshly
        /// refreshed token is known-valid, so a profile-fetch failure keeps
        /// it persisted; a merely verified one is cleared with the rest.
        via_refresh: bool,
    },
}

pub struct SessionBootstrapper<S, A> {
    store: S,
    api: A,
    /// Serializes bootstrap/login/logout/update_biometric. Two operations
    /// must never interleave their store writes; callers queue here.
    gate: Mutex<()>,
}

impl<S, A> SessionBootstrapper<S, A>
where
    S: CredentialStore,
    A: AuthApi,
{
    pub fn new(store: S, api: A) -> Self {
        Self {
            store,
            api,
            gate: Mutex::new(()),
        }
    }

    /// Resolve the current session. Runs to a terminal state before
    /// returning; performs at most one silent token refresh and zero
    /// network calls when no credential is stored.
    ///
    /// A caller that may abandon the result (e.g. a dismissed splash
    /// screen) should drive this through `tokio::spawn` so the cycle still
    /// completes its store writes; the returned state can then be dropped.
    pub async fn bootstrap(&self) -> SessionState {
        let _guard = self.gate.lock().await;
        match self.run_cycle().await {
            Ok(state) => state,
            Err(e) => {
                // Store failures are fatal for the cycle, not the app.
                warn!(error = %e, "bootstrap cycle aborted, resolving unauthenticated");
                SessionState::Unauthenticated
            }
        }
    }

    async fn run_cycle(&self) -> Result<SessionState, StoreError> {
        let access = self.store.get(ACCESS_TOKEN_KEY)?;
        let refresh = self.store.get(REFRESH_TOKEN_KEY)?;

        let mut step = match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => Step::VerifyingAccess {
                access_token,
                refresh_token,
            },
            (None, None) => {
                debug!("no stored credential");
                return Ok(SessionState::Unauthenticated);
            }
            // A partial pair violates the both-or-neither invariant, most
            // likely an interrupted write. Discard the leftover; no point
            // asking the server about half a credential.
            _ => {
                debug!("partial token pair in store, discarding");
                self.store.remove(ACCESS_TOKEN_KEY)?;
                self.store.remove(REFRESH_TOKEN_KEY)?;
                return Ok(SessionState::Unauthenticated);
            }
        };

        loop {
            step = match step {
                Step::VerifyingAccess {
                    access_token,
                    refresh_token,
                } => match self.api.verify_access_token(&access_token).await {
                    Ok(()) => Step::FetchingProfile {
                        access_token,
                        via_refresh: false,
                    },
                    Err(e) => {
                        debug!(error = %e, "access token rejected, attempting refresh");
                        Step::Refreshing { refresh_token }
                    }
                },

                Step::Refreshing { refresh_token } => {
                    match self.api.refresh(&refresh_token).await {
                        Ok(access_token) => {
                            self.store.set(ACCESS_TOKEN_KEY, &access_token)?;
                            Step::FetchingProfile {
                                access_token,
                                via_refresh: true,
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, "refresh rejected, clearing stored session");
                            self.clear_session()?;
                            return Ok(SessionState::Unauthenticated);
                        }
                    }
                }

                Step::FetchingProfile {
                    access_token,
                    via_refresh,
                } => match self.api.get_user_data(&access_token).await {
                    Ok(user) => {
                        self.persist_profile(&user)?;
                        return Ok(SessionState::Authenticated(user));
                    }
                    Err(e) => {
                        debug!(error = %e, via_refresh, "profile fetch failed");
                        if via_refresh {
                            // Token validity and profile availability are
                            // tracked independently: the just-minted access
                            // token stays persisted, only the stale profile
                            // goes.
                            self.store.remove(USER_KEY)?;
                        } else {
                            self.clear_session()?;
                        }
                        return Ok(SessionState::Unauthenticated);
                    }
                },
            };
        }
    }

    /// Authenticate with a password or a federated provider token. On
    /// success the credential and profile are persisted; on rejection the
    /// store is left untouched and the server's reason is surfaced.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionState, AuthError> {
        let _guard = self.gate.lock().await;

        let outcome = self.api.login(request).await?;

        // Refresh token first: a write interrupted between the two must
        // never leave an access token without its refresh pair. A lone
        // refresh token is treated as absent on the next read.
        self.store.set(REFRESH_TOKEN_KEY, &outcome.refresh_token)?;
        self.store.set(ACCESS_TOKEN_KEY, &outcome.access_token)?;
        self.persist_profile(&outcome.user)?;

        debug!(user = %outcome.user.id, "login succeeded");
        Ok(SessionState::Authenticated(outcome.user))
    }

    /// Drop the session. Never fails: from the UI's perspective logout must
    /// always succeed, so store errors are swallowed and logged.
    pub async fn logout(&self) -> SessionState {
        let _guard = self.gate.lock().await;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear credential store during logout");
        }
        SessionState::Unauthenticated
    }

    /// Toggle the biometric-unlock setting as a reversible command: the
    /// stored profile is updated immediately, the server is told, and the
    /// previous profile is restored only if the server rejects the change.
    pub async fn update_biometric(&self, enabled: bool) -> Result<UserProfile, AuthError> {
        let _guard = self.gate.lock().await;

        let access_token = self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .ok_or(AuthError::NotAuthenticated)?;
        let previous_json = self
            .store
            .get(USER_KEY)?
            .ok_or(AuthError::NotAuthenticated)?;
        let previous: UserProfile = serde_json::from_str(&previous_json)
            .map_err(|e| ApiError::Malformed(format!("cached profile unreadable: {e}")))?;

        let mut updated = previous.clone();
        updated.biometric = enabled;
        self.persist_profile(&updated)?;

        match self.api.set_biometric(&access_token, &updated.id, enabled).await {
            Ok(()) => Ok(updated),
            Err(e) => {
                // Roll the optimistic write back; the caller keeps the error.
                if let Err(revert) = self.store.set(USER_KEY, &previous_json) {
                    warn!(error = %revert, "failed to roll back biometric setting");
                }
                Err(e.into())
            }
        }
    }

    fn persist_profile(&self, user: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(user).map_err(|e| StoreError::Write {
            key: USER_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(USER_KEY, &json)
    }

    fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}

// ============================================================================
// Tests
// ============================================================================
