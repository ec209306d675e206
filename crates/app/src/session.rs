use colorfest_domain::{AuthState, Session, ID};
use colorfest_infra::Context;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Tracks the current identity and its admin privilege for the lifetime of
/// the application. External sign-in/sign-out events are pushed in through
/// `handle_change`; everything else reads a projection of the state.
pub struct SessionResolver {
    ctx: Arc<Context>,
    state: RwLock<AuthState>,
}

impl SessionResolver {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self {
            ctx,
            state: RwLock::new(AuthState::Unresolved),
        }
    }

    /// Resolves the session handed over from a previous run. Persisting
    /// credentials is opt-in per login: when the last login asked not to be
    /// remembered and this is a fresh process, the stored session is
    /// discarded instead of resumed.
    pub async fn restore(&self, stored: Option<Session>) {
        let prefs = &self.ctx.prefs;
        if let Some(session) = stored {
            if prefs.no_remember() && !prefs.session_active() {
                info!(
                    "Discarding stored session for {}: last login opted out of being remembered",
                    session.identity.email
                );
                prefs.set_no_remember(false);
                *self.state.write().unwrap() = AuthState::Anonymous;
                return;
            }
            prefs.mark_session_active();
            self.handle_change(Some(session)).await;
        } else {
            self.handle_change(None).await;
        }
    }

    /// Applies a sign-in or sign-out reported by the auth subsystem.
    pub async fn handle_change(&self, session: Option<Session>) {
        let next = match session {
            Some(session) => {
                let is_admin = self.check_admin(&session.identity.id).await;
                AuthState::Authenticated { session, is_admin }
            }
            None => AuthState::Anonymous,
        };
        *self.state.write().unwrap() = next;
    }

    /// Privilege lookup is best effort: a failed query downgrades to a
    /// regular user rather than surfacing the error.
    async fn check_admin(&self, user_id: &ID) -> bool {
        match self.ctx.repos.roles.is_admin(user_id).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                warn!("Admin role lookup failed, assuming regular user: {:?}", e);
                false
            }
        }
    }

    pub async fn sign_out(&self) {
        self.handle_change(None).await;
    }

    pub fn current(&self) -> AuthState {
        self.state.read().unwrap().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.read().unwrap().session().cloned()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().unwrap().is_admin()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use colorfest_domain::Identity;
    use colorfest_infra::{IRoleRepo, InMemoryRoleRepo};

    struct FailingRoleRepo;

    #[async_trait::async_trait]
    impl IRoleRepo for FailingRoleRepo {
        async fn is_admin(&self, _user_id: &ID) -> anyhow::Result<bool> {
            Err(anyhow::anyhow!("Connection refused"))
        }
    }

    fn session() -> Session {
        Session::new(
            Identity {
                id: Default::default(),
                email: "ada@example.com".into(),
            },
            Some("user-token".into()),
        )
    }

    fn resolver(ctx: Context) -> SessionResolver {
        SessionResolver::new(Arc::new(ctx))
    }

    #[tokio::test]
    async fn starts_unresolved() {
        let resolver = resolver(Context::create_inmemory());
        assert!(matches!(resolver.current(), AuthState::Unresolved));
    }

    #[tokio::test]
    async fn resolves_admin_from_role_assignment() {
        let ctx = Context::create_inmemory();
        let roles = Arc::new(InMemoryRoleRepo::new());
        let session = session();
        roles.grant_admin(session.identity.id.clone());
        let mut ctx = ctx;
        ctx.repos.roles = roles;

        let resolver = resolver(ctx);
        resolver.handle_change(Some(session)).await;
        assert!(resolver.is_admin());
        assert!(resolver.session().is_some());
    }

    #[tokio::test]
    async fn user_without_role_assignment_is_not_admin() {
        let resolver = resolver(Context::create_inmemory());
        resolver.handle_change(Some(session())).await;
        assert!(resolver.current().is_authenticated());
        assert!(!resolver.is_admin());
    }

    #[tokio::test]
    async fn failed_role_lookup_downgrades_to_regular_user() {
        let mut ctx = Context::create_inmemory();
        ctx.repos.roles = Arc::new(FailingRoleRepo);

        let resolver = resolver(ctx);
        resolver.handle_change(Some(session())).await;
        assert!(resolver.current().is_authenticated());
        assert!(!resolver.is_admin());
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let resolver = resolver(Context::create_inmemory());
        resolver.handle_change(Some(session())).await;
        resolver.sign_out().await;
        assert!(matches!(resolver.current(), AuthState::Anonymous));
        assert!(resolver.session().is_none());
    }

    #[tokio::test]
    async fn opted_out_session_is_discarded_on_fresh_start() {
        let ctx = Context::create_inmemory();
        ctx.prefs.set_no_remember(true);

        let resolver = resolver(ctx.clone());
        resolver.restore(Some(session())).await;

        assert!(matches!(resolver.current(), AuthState::Anonymous));
        // The opt-out is consumed: the next login starts from a clean slate.
        assert!(!ctx.prefs.no_remember());
    }

    #[tokio::test]
    async fn opted_out_session_survives_within_the_same_process_session() {
        let ctx = Context::create_inmemory();
        ctx.prefs.set_no_remember(true);
        ctx.prefs.mark_session_active();

        let resolver = resolver(ctx);
        resolver.restore(Some(session())).await;
        assert!(resolver.current().is_authenticated());
    }

    #[tokio::test]
    async fn restore_without_stored_session_resolves_anonymous() {
        let resolver = resolver(Context::create_inmemory());
        resolver.restore(None).await;
        assert!(matches!(resolver.current(), AuthState::Anonymous));
    }

    #[tokio::test]
    async fn remembered_session_restores_and_marks_the_session_active() {
        let ctx = Context::create_inmemory();
        let resolver = resolver(ctx.clone());
        resolver.restore(Some(session())).await;
        assert!(resolver.current().is_authenticated());
        assert!(ctx.prefs.session_active());
    }
}
