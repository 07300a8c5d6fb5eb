//! Settings synchronization timing and rollback behavior.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use email365_core::{
    CategoryEditor, DataClient, Error, InMemoryActor, NoticeBoard, NoticeLevel, Operation,
    OptimisticToggle, ProfileEditor, QueryCache, QueryKey, QueryState, ToggleFlag, UserProfile,
};
use tokio::time::{Instant, sleep, sleep_until};

const WINDOW: Duration = Duration::from_millis(1000);

fn client(actor: &Arc<InMemoryActor>) -> Arc<DataClient<InMemoryActor>> {
    Arc::new(DataClient::with_actor(
        Arc::clone(actor),
        Arc::new(QueryCache::new()),
        NoticeBoard::new(),
    ))
}

#[tokio::test(start_paused = true)]
async fn two_edits_within_window_write_once_with_second_value() {
    let actor = Arc::new(InMemoryActor::new());
    actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
    let client = client(&actor);
    let profile = client.caller_user_profile().await.unwrap();
    let mut editor = ProfileEditor::new(Arc::clone(&client), WINDOW);
    editor.sync_from_server(profile.as_ref());

    let start = Instant::now();
    editor.set_name("Ada B");
    sleep_until(start + Duration::from_millis(500)).await;
    editor.set_name("Ada Byron");

    sleep_until(start + Duration::from_millis(1490)).await;
    assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 0);

    sleep_until(start + Duration::from_millis(1600)).await;
    assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 1);

    let saved = actor.profile().unwrap();
    assert_eq!(saved.name, "Ada Byron");
    assert_eq!(saved.email, "ada@example.com");

    sleep(WINDOW * 3).await;
    assert_eq!(actor.calls(Operation::SaveCallerUserProfile), 1);
}

#[tokio::test(start_paused = true)]
async fn save_carries_latest_state_at_fire_time() {
    let actor = Arc::new(InMemoryActor::new());
    actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
    let client = client(&actor);
    let profile = client.caller_user_profile().await.unwrap();
    let mut editor = ProfileEditor::new(Arc::clone(&client), WINDOW);
    editor.sync_from_server(profile.as_ref());

    editor.set_name("Ada Byron");
    sleep(Duration::from_millis(100)).await;
    let switch = editor.set_push_notifications(true);
    switch.await.unwrap();
    sleep(WINDOW * 2).await;

    let saved = actor.profile().unwrap();
    assert_eq!(saved.name, "Ada Byron");
    assert!(saved.preferences.notification_settings.push_notifications);
}

#[tokio::test(start_paused = true)]
async fn optimistic_toggle_rolls_back_on_failure() {
    let actor = Arc::new(InMemoryActor::new().with_latency(Duration::from_millis(200)));
    let client = client(&actor);
    assert!(!client.toggle_state(ToggleFlag::SortingActive).await.unwrap());
    actor.fail(Operation::ToggleSortingActive);
    let toggle = OptimisticToggle::new(Arc::clone(&client), ToggleFlag::SortingActive);

    let pending = tokio::spawn({
        let toggle = toggle.clone();
        async move { toggle.toggle().await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_eq!(toggle.displayed(), QueryState::Ready(true));

    assert!(pending.await.unwrap().is_err());
    assert_eq!(toggle.displayed(), QueryState::Ready(false));

    let notices = client.notices().drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].text.starts_with("Failed to update toggle state: "));
}

#[tokio::test(start_paused = true)]
async fn optimistic_toggle_keeps_confirmed_value() {
    let actor = Arc::new(InMemoryActor::new().with_latency(Duration::from_millis(200)));
    let client = client(&actor);
    let toggle = OptimisticToggle::new(Arc::clone(&client), ToggleFlag::SortingActive);

    let pending = tokio::spawn({
        let toggle = toggle.clone();
        async move { toggle.toggle().await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_eq!(toggle.displayed(), QueryState::Ready(true));

    assert!(pending.await.unwrap().unwrap());
    assert_eq!(toggle.displayed(), QueryState::Ready(true));

    // The background refetch agrees with the server.
    sleep(Duration::from_millis(500)).await;
    assert_eq!(toggle.displayed(), QueryState::Ready(true));
    assert!(!client.cache().is_stale(QueryKey::SortingActive));
}

#[tokio::test]
async fn server_reply_wins_over_optimistic_guess() {
    let actor = Arc::new(InMemoryActor::new());
    let client = client(&actor);
    assert!(!client.toggle_state(ToggleFlag::AccountLinked).await.unwrap());

    // Someone else linked the account since our last read.
    actor.set_account_linked(true);
    let toggle = OptimisticToggle::new(Arc::clone(&client), ToggleFlag::AccountLinked);

    let confirmed = toggle.toggle().await.unwrap();

    assert!(!confirmed);
    assert_eq!(toggle.displayed(), QueryState::Ready(false));
    assert_eq!(
        client.notices().drain()[0].text,
        "Google account unlinked successfully"
    );
}

#[tokio::test]
async fn toggle_without_actor_rolls_back() {
    let client: Arc<DataClient<InMemoryActor>> =
        Arc::new(DataClient::new(Arc::new(QueryCache::new()), NoticeBoard::new()));
    let toggle = OptimisticToggle::new(Arc::clone(&client), ToggleFlag::SortingActive);

    assert!(matches!(toggle.toggle().await, Err(Error::ActorUnavailable)));
    assert_eq!(toggle.displayed(), QueryState::Ready(false));
    assert_eq!(
        client.notices().drain()[0].text,
        "Failed to update toggle state: Actor not available"
    );
}

#[tokio::test]
async fn duplicate_category_add_makes_no_remote_call() {
    let actor = Arc::new(InMemoryActor::new());
    actor.set_preferred(vec!["Finance".into()]);
    let client = client(&actor);
    let editor = CategoryEditor::new(Arc::clone(&client));
    editor.sync_from_server(&client.preferred_categories().await.unwrap());
    actor.reset_calls();

    let result = editor.add("Finance");

    assert!(matches!(result, Err(Error::DuplicateCategory(_))));
    assert_eq!(actor.total_calls(), 0);
    let notices = client.notices().drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Category already exists");
}

#[tokio::test]
async fn category_change_refreshes_both_views_of_the_list() {
    let actor = Arc::new(InMemoryActor::new());
    actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
    let client = client(&actor);
    client.caller_user_profile().await.unwrap();
    let editor = CategoryEditor::new(Arc::clone(&client));
    editor.sync_from_server(&client.preferred_categories().await.unwrap());

    editor.add("Travel").unwrap().unwrap().send().await.unwrap();

    let preferred: Vec<String> = client.cache().get(QueryKey::PreferredCategories).unwrap();
    let profile: Option<UserProfile> = client.cache().get(QueryKey::CurrentUserProfile).unwrap();
    assert_eq!(preferred, vec!["Travel"]);
    assert_eq!(
        profile.unwrap().preferences.preferred_categories,
        vec!["Travel"]
    );
}
