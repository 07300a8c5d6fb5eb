//! Explicit session object: init on load, teardown on logout.

use std::sync::Arc;

use tokio::sync::watch;

use super::identity::{Identity, IdentityProvider, LoginError};
use crate::actor::Actor;
use crate::cache::QueryKey;
use crate::model::UserProfile;
use crate::query::{DataClient, QueryState};

/// Which top-level surface to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelView {
    /// Public landing page.
    Landing,
    /// Signed-in application shell.
    Authenticated,
}

/// Signed-in state shared by the controllers.
///
/// The identity is published on a watch channel so views can gate on it.
pub struct Session<P, A> {
    provider: P,
    client: Arc<DataClient<A>>,
    actor: Arc<A>,
    identity: watch::Sender<Option<Identity>>,
}

impl<P: IdentityProvider, A: Actor> Session<P, A> {
    /// Create a session. Nothing is attached until [`init`](Self::init).
    #[must_use]
    pub fn new(provider: P, client: Arc<DataClient<A>>, actor: Arc<A>) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            provider,
            client,
            actor,
            identity,
        }
    }

    /// Attach the actor and publish whoever is already signed in.
    pub fn init(&self) {
        self.client.attach(Arc::clone(&self.actor));
        let current = self.provider.current();
        tracing::info!(authenticated = current.is_some(), "Session initialized");
        self.identity.send_replace(current);
    }

    /// The data client.
    #[must_use]
    pub const fn client(&self) -> &Arc<DataClient<A>> {
        &self.client
    }

    /// The identity provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Current identity.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    /// Watch the identity.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Surface to show for the current identity.
    #[must_use]
    pub fn top_level_view(&self) -> TopLevelView {
        if self.is_authenticated() {
            TopLevelView::Authenticated
        } else {
            TopLevelView::Landing
        }
    }

    /// Whether the signed-in user still has to create a profile: the profile
    /// fetch finished and found nothing.
    #[must_use]
    pub fn needs_profile_setup(&self) -> bool {
        let key = QueryKey::CurrentUserProfile;
        self.is_authenticated()
            && self.client.cache().is_settled(key)
            && matches!(
                self.client.state::<Option<UserProfile>>(key),
                QueryState::Ready(None)
            )
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error. Logging in twice posts the
    /// "Already logged in" notice; other failures are only logged.
    pub async fn login(&self) -> Result<Identity, LoginError> {
        match self.provider.login().await {
            Ok(identity) => {
                tracing::info!(principal = %identity.principal, "Logged in");
                self.identity.send_replace(Some(identity.clone()));
                self.client.spawn_refetch(QueryKey::CurrentUserProfile);
                Ok(identity)
            }
            Err(LoginError::AlreadyAuthenticated) => {
                self.client.notices().error("Already logged in");
                Err(LoginError::AlreadyAuthenticated)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login error");
                Err(e)
            }
        }
    }

    /// Sign out and drop every cached record.
    pub async fn logout(&self) {
        self.provider.logout().await;
        self.client.cache().clear();
        self.identity.send_replace(None);
        tracing::info!("Logged out");
        self.client.notices().success("Logged out successfully");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::InMemoryActor;
    use crate::cache::QueryCache;
    use crate::notice::NoticeBoard;
    use crate::session::LocalIdentityProvider;

    fn session(
        provider: LocalIdentityProvider,
    ) -> (Arc<InMemoryActor>, Session<LocalIdentityProvider, InMemoryActor>) {
        let actor = Arc::new(InMemoryActor::new());
        let client = Arc::new(DataClient::new(
            Arc::new(QueryCache::new()),
            NoticeBoard::new(),
        ));
        let session = Session::new(provider, client, Arc::clone(&actor));
        session.init();
        (actor, session)
    }

    #[tokio::test]
    async fn test_init_attaches_actor_and_publishes_identity() {
        let (_actor, session) = session(LocalIdentityProvider::signed_in("p1"));

        assert!(session.client().is_ready());
        assert_eq!(session.top_level_view(), TopLevelView::Authenticated);
    }

    #[tokio::test]
    async fn test_login_twice_posts_notice() {
        let (_actor, session) = session(LocalIdentityProvider::new("p1"));
        let mut rx = session.subscribe();
        assert_eq!(session.top_level_view(), TopLevelView::Landing);

        session.login().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().principal, "p1");

        assert_eq!(
            session.login().await,
            Err(LoginError::AlreadyAuthenticated)
        );
        let notices = session.client().notices().drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].text, "Already logged in");
    }

    #[tokio::test]
    async fn test_other_login_failures_post_no_notice() {
        let provider = LocalIdentityProvider::new("p1");
        provider.set_unreachable(true);
        let (_actor, session) = session(provider);

        assert!(session.login().await.is_err());
        assert!(session.client().notices().is_empty());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_cache() {
        let (_actor, session) = session(LocalIdentityProvider::signed_in("p1"));
        session.client().emails().await.unwrap();
        assert!(session.client().cache().is_settled(QueryKey::Emails));

        session.logout().await;

        assert!(!session.client().cache().is_settled(QueryKey::Emails));
        assert_eq!(session.top_level_view(), TopLevelView::Landing);
        assert_eq!(
            session.client().notices().drain()[0].text,
            "Logged out successfully"
        );
    }

    #[tokio::test]
    async fn test_profile_setup_needed_only_after_fetch() {
        let (actor, session) = session(LocalIdentityProvider::signed_in("p1"));
        assert!(!session.needs_profile_setup());

        session.client().caller_user_profile().await.unwrap();
        assert!(session.needs_profile_setup());

        actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
        session
            .client()
            .invalidate_and_refetch(QueryKey::CurrentUserProfile)
            .await
            .unwrap();
        assert!(!session.needs_profile_setup());
    }
}
