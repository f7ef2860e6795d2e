//! User profile as returned by the auth server and cached in the
//! credential store under the `user` key.

use serde::{Deserialize, Serialize};

/// How the account was created. Immutable once set for a given user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email + password account.
    #[default]
    Credentials,
    /// Federated Google sign-in.
    Google,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// `providerType` is canonical. Older records carry a typo'd duplicate
    /// `provedorType`; it is accepted on read and never written back, so
    /// stored profiles migrate on their next persist.
    #[serde(rename = "providerType", alias = "provedorType", default)]
    pub provider: AuthProvider,
    #[serde(default)]
    pub biometric: bool,
}
