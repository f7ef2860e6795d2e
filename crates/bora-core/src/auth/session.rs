use crate::models::UserProfile;

/// Resolved session, consumed by the UI router to pick the authenticated or
/// unauthenticated screen stack. Held in memory only; recomputed on every
/// app start and on explicit login/logout.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Bootstrap still in progress. This is the router's initial value;
    /// `bootstrap()` itself always runs to one of the terminal variants.
    #[default]
    Unknown,
    /// No usable credential.
    Unauthenticated,
    /// Valid session with a freshly fetched profile.
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthProvider;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            profile_image: None,
            provider: AuthProvider::Credentials,
            biometric: false,
        }
    }

    #[test]
    fn test_session_state_accessors() {
        assert!(!SessionState::Unknown.is_authenticated());
        assert!(!SessionState::Unauthenticated.is_authenticated());
        assert!(SessionState::Unauthenticated.user().is_none());

        let state = SessionState::Authenticated(profile());
        assert!(state.is_authenticated());
        assert_eq!(state.user().map(|u| u.id.as_str()), Some("u1"));
    }
}
