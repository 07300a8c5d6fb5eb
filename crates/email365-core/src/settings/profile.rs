//! Profile form with auto-save.
//!
//! Text fields are saved after the user stops typing; notification switches
//! are saved immediately. Every save sends the whole profile, assembled from
//! the latest local values when the save actually starts.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use super::debounce::Debouncer;
use crate::actor::Actor;
use crate::model::{NotificationSettings, UserProfile};
use crate::query::DataClient;
use crate::Result;

/// Local values of the editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Notification switches.
    pub notifications: NotificationSettings,
}

impl ProfileDraft {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            notifications: profile.preferences.notification_settings,
        }
    }

    /// Full profile to send: `base` with the draft fields applied.
    fn apply_to(&self, base: &UserProfile) -> UserProfile {
        let mut profile = base.clone();
        profile.name.clone_from(&self.name);
        profile.email.clone_from(&self.email);
        profile.preferences.notification_settings = self.notifications;
        profile
    }
}

#[derive(Debug, Default)]
struct Form {
    draft: ProfileDraft,
    /// Last profile known to be on the server.
    base: Option<UserProfile>,
    saving: usize,
}

fn lock(form: &Mutex<Form>) -> MutexGuard<'_, Form> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Editor for the general and notification settings.
///
/// Name and email each have their own timer. Dropping the editor (or calling
/// [`close`](Self::close)) cancels both; saves already running finish but no
/// longer touch the form.
pub struct ProfileEditor<A> {
    client: Arc<DataClient<A>>,
    form: Arc<Mutex<Form>>,
    name_timer: Debouncer,
    email_timer: Debouncer,
}

impl<A: Actor> ProfileEditor<A> {
    /// Create an editor that waits `quiet` after the last keystroke.
    #[must_use]
    pub fn new(client: Arc<DataClient<A>>, quiet: Duration) -> Self {
        Self {
            client,
            form: Arc::new(Mutex::new(Form::default())),
            name_timer: Debouncer::new(quiet),
            email_timer: Debouncer::new(quiet),
        }
    }

    /// Current local values.
    #[must_use]
    pub fn draft(&self) -> ProfileDraft {
        lock(&self.form).draft.clone()
    }

    /// Last profile known to be on the server.
    #[must_use]
    pub fn base(&self) -> Option<UserProfile> {
        lock(&self.form).base.clone()
    }

    /// Whether a save is running.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        lock(&self.form).saving > 0
    }

    /// Whether the name differs from the server and a save is running.
    #[must_use]
    pub fn is_saving_name(&self) -> bool {
        let form = lock(&self.form);
        form.saving > 0 && form.base.as_ref().is_some_and(|b| b.name != form.draft.name)
    }

    /// Whether the email differs from the server and a save is running.
    #[must_use]
    pub fn is_saving_email(&self) -> bool {
        let form = lock(&self.form);
        form.saving > 0 && form.base.as_ref().is_some_and(|b| b.email != form.draft.email)
    }

    /// Whether a field edit is waiting for the quiet period.
    #[must_use]
    pub fn has_pending_edits(&self) -> bool {
        self.name_timer.is_pending() || self.email_timer.is_pending()
    }

    /// Take in the profile as fetched from the server.
    ///
    /// Fields the user has changed locally and not yet saved keep their
    /// local value.
    pub fn sync_from_server(&self, profile: Option<&UserProfile>) {
        let mut form = lock(&self.form);
        let Some(profile) = profile else {
            form.base = None;
            return;
        };

        match form.base.take() {
            None => form.draft = ProfileDraft::from_profile(profile),
            Some(old) => {
                let clean = ProfileDraft::from_profile(&old);
                let incoming = ProfileDraft::from_profile(profile);
                if form.draft.name == clean.name && !self.name_timer.is_pending() {
                    form.draft.name = incoming.name;
                }
                if form.draft.email == clean.email && !self.email_timer.is_pending() {
                    form.draft.email = incoming.email;
                }
                if form.draft.notifications == clean.notifications {
                    form.draft.notifications = incoming.notifications;
                }
            }
        }
        form.base = Some(profile.clone());
    }

    /// Update the name. Every edit restarts the quiet period; the save is
    /// skipped if the form matches the server once it ends.
    pub fn set_name(&mut self, name: impl Into<String>) {
        lock(&self.form).draft.name = name.into();
        let commit = self.commit();
        self.name_timer.arm(move || async move {
            let _ = commit.await;
        });
    }

    /// Update the email. See [`set_name`](Self::set_name).
    pub fn set_email(&mut self, email: impl Into<String>) {
        lock(&self.form).draft.email = email.into();
        let commit = self.commit();
        self.email_timer.arm(move || async move {
            let _ = commit.await;
        });
    }

    /// Flip the email notification switch. The returned save must be awaited
    /// or spawned; it sends nothing when the form matches the server.
    #[must_use = "the returned future performs the save"]
    pub fn set_email_notifications(
        &self,
        enabled: bool,
    ) -> impl Future<Output = Result<()>> + Send + use<A> {
        lock(&self.form).draft.notifications.email_notifications = enabled;
        self.commit()
    }

    /// Flip the push notification switch. See
    /// [`set_email_notifications`](Self::set_email_notifications).
    #[must_use = "the returned future performs the save"]
    pub fn set_push_notifications(
        &self,
        enabled: bool,
    ) -> impl Future<Output = Result<()>> + Send + use<A> {
        lock(&self.form).draft.notifications.push_notifications = enabled;
        self.commit()
    }

    /// Cancel pending saves. Edits that never reached the quiet period are
    /// not sent.
    pub fn close(&mut self) {
        let cancelled = self.name_timer.cancel() | self.email_timer.cancel();
        if cancelled {
            tracing::debug!("Discarded unsaved profile edits");
        }
    }

    /// A save of the whole profile, built from the draft when it starts.
    /// Nothing is sent if the draft matches the server at that point.
    fn commit(&self) -> impl Future<Output = Result<()>> + Send + use<A> {
        save_profile(Arc::clone(&self.client), Arc::downgrade(&self.form))
    }
}

async fn save_profile<A: Actor>(
    client: Arc<DataClient<A>>,
    form: Weak<Mutex<Form>>,
) -> Result<()> {
    let profile = {
        let Some(form) = form.upgrade() else {
            tracing::debug!("Profile editor gone, skipping save");
            return Ok(());
        };
        let mut form = lock(&form);
        let Some(base) = form.base.as_ref() else {
            return Ok(());
        };
        let profile = form.draft.apply_to(base);
        if profile == *base {
            tracing::debug!("Profile unchanged, skipping save");
            return Ok(());
        }
        form.saving += 1;
        profile
    };

    tracing::debug!(name = %profile.name, email = %profile.email, "Saving profile");
    let result = client.save_caller_user_profile(profile.clone()).await;

    if let Some(form) = form.upgrade() {
        let mut form = lock(&form);
        form.saving = form.saving.saturating_sub(1);
        if result.is_ok() {
            form.base = Some(profile);
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::{InMemoryActor, Operation};
    use crate::cache::QueryCache;
    use crate::notice::NoticeBoard;

    const QUIET: Duration = Duration::from_millis(1000);

    async fn editor() -> (Arc<InMemoryActor>, ProfileEditor<InMemoryActor>) {
        let actor = Arc::new(InMemoryActor::new());
        actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
        let client = Arc::new(DataClient::with_actor(
            Arc::clone(&actor),
            Arc::new(QueryCache::new()),
            NoticeBoard::new(),
        ));
        let profile = client.caller_user_profile().await.unwrap();
        let editor = ProfileEditor::new(client, QUIET);
        editor.sync_from_server(profile.as_ref());
        (actor, editor)
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_save_when_value_matches_server() {
        let (actor, mut editor) = editor().await;

        editor.set_name("Ada Lovelace");
        editor.set_name("Ada");
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_save_without_loaded_profile() {
        let actor = Arc::new(InMemoryActor::new());
        let client = Arc::new(DataClient::with_actor(
            Arc::clone(&actor),
            Arc::new(QueryCache::new()),
            NoticeBoard::new(),
        ));
        let mut editor = ProfileEditor::new(client, QUIET);

        editor.set_name("Nobody");
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(editor.draft().name, "Nobody");
        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_and_email_each_flush_once() {
        let (actor, mut editor) = editor().await;

        editor.set_name("Ada L.");
        tokio::time::sleep(Duration::from_millis(300)).await;
        editor.set_email("ada@lovelace.dev");
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 2);
        let saved = actor.profile().unwrap();
        assert_eq!(saved.name, "Ada L.");
        assert_eq!(saved.email, "ada@lovelace.dev");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_keeps_typed_text() {
        let (actor, mut editor) = editor().await;
        actor.fail(Operation::SaveCallerUserProfile);

        editor.set_name("Countess");
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 1);
        assert_eq!(editor.draft().name, "Countess");
        assert_eq!(actor.profile().unwrap().name, "Ada");

        // A later server sync does not wipe the unsaved edit.
        let server = actor.profile();
        editor.sync_from_server(server.as_ref());
        assert_eq!(editor.draft().name, "Countess");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_keeps_field_being_typed() {
        let (_actor, mut editor) = editor().await;
        editor.set_email("typing@exam");

        let mut server = UserProfile::new("Ada King", "ada@example.com");
        server.preferences.notification_settings.push_notifications = true;
        editor.sync_from_server(Some(&server));

        let draft = editor.draft();
        assert_eq!(draft.name, "Ada King");
        assert_eq!(draft.email, "typing@exam");
        assert!(draft.notifications.push_notifications);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_edit() {
        let (actor, mut editor) = editor().await;

        editor.set_name("Never sent");
        assert!(editor.has_pending_edits());
        editor.close();
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_edit() {
        let (actor, mut editor) = editor().await;

        editor.set_email("gone@example.com");
        drop(editor);
        tokio::time::sleep(QUIET * 2).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test]
    async fn test_notification_switch_saves_immediately() {
        let (actor, editor) = editor().await;

        editor.set_push_notifications(true).await.unwrap();

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 1);
        let saved = actor.profile().unwrap();
        assert!(saved.preferences.notification_settings.push_notifications);
        assert!(saved.preferences.notification_settings.email_notifications);
        assert!(!editor.is_saving());
    }

    #[tokio::test]
    async fn test_unchanged_switch_does_not_save() {
        let (actor, editor) = editor().await;

        editor.set_email_notifications(true).await.unwrap();

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test]
    async fn test_save_after_teardown_is_a_no_op() {
        let (actor, editor) = editor().await;

        let save = editor.set_push_notifications(true);
        drop(editor);
        save.await.unwrap();

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revert_during_running_save_is_sent() {
        let (actor, mut editor) = editor().await;
        actor.set_latency(Duration::from_millis(150));

        editor.set_name("Ada L");
        tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
        assert!(editor.is_saving());
        editor.set_name("Ada");
        tokio::time::sleep(QUIET * 5).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 2);
        assert_eq!(actor.profile().unwrap().name, "Ada");
        let server = editor.client.cache().get::<Option<UserProfile>>(
            crate::cache::QueryKey::CurrentUserProfile,
        );
        editor.sync_from_server(server.flatten().as_ref());
        assert_eq!(editor.draft().name, "Ada");
        assert_eq!(editor.base().unwrap().name, "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_finishing_after_replacement_leaves_new_editor_alone() {
        let (actor, mut editor) = editor().await;
        actor.set_latency(Duration::from_millis(150));
        let client = Arc::clone(&editor.client);

        editor.set_name("Ada L");
        tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
        assert!(editor.is_saving());
        drop(editor);

        let replacement = ProfileEditor::new(client, QUIET);
        let stale = UserProfile::new("Ada", "ada@example.com");
        replacement.sync_from_server(Some(&stale));
        tokio::time::sleep(QUIET * 3).await;

        assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 1);
        assert_eq!(actor.profile().unwrap().name, "Ada L");
        assert_eq!(replacement.base().unwrap().name, "Ada");
        assert_eq!(replacement.draft().name, "Ada");
        assert!(!replacement.is_saving());
    }
}
