use crate::shared::entity::ID;

/// A signed in user as reported by the external auth service.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: ID,
    pub email: String,
}

/// An authenticated session. The access token is an opaque string minted by
/// the auth service and is forwarded as the bearer credential on
/// user-scoped backend calls.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub access_token: Option<String>,
}

impl Session {
    pub fn new(identity: Identity, access_token: Option<String>) -> Self {
        Self {
            identity,
            access_token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// Where the application currently stands with respect to authentication.
/// `Unresolved` holds only until the auth subsystem has reported its first
/// state.
#[derive(Debug, Clone)]
pub enum AuthState {
    Unresolved,
    Anonymous,
    Authenticated { session: Session, is_admin: bool },
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            AuthState::Authenticated { is_admin: true, .. }
        )
    }
}
