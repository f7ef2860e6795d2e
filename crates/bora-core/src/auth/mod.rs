//! Session resolution for the app router.
//!
//! This module provides:
//! - `SessionState`: the resolved output of a bootstrap cycle
//! - `SessionBootstrapper`: token verify/refresh/persist state machine
//!
//! The bootstrapper sits between the credential store and the auth server;
//! the UI only ever sees a terminal `SessionState`.

use thiserror::Error;

pub mod bootstrap;
pub mod session;

pub use bootstrap::SessionBootstrapper;
pub use session::SessionState;

use crate::api::ApiError;
use crate::store::StoreError;

/// Errors surfaced by `login` and `update_biometric`. `bootstrap` and
/// `logout` never fail; their worst case is an `Unauthenticated` resolution.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The operation needs an active session and the store has none.
    #[error("no active session")]
    NotAuthenticated,
}
