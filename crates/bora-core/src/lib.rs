//! Session bootstrap and token lifecycle for the bora event app.
//!
//! The crate resolves one question for the UI router: is there a usable
//! session? It reads the persisted token pair, verifies the access token
//! against the auth server, silently refreshes it at most once, caches the
//! user profile, and hands back a terminal [`SessionState`]. Screens never
//! talk to the store or juggle tokens themselves.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod store;

pub use api::{AuthClient, LoginRequest};
pub use auth::{AuthError, SessionBootstrapper, SessionState};
pub use config::Config;
pub use models::UserProfile;
