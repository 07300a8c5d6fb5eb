//! Preferred-category set editing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::actor::Actor;
use crate::query::DataClient;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Selection {
    names: Vec<String>,
    writes: usize,
}

fn lock(selection: &Mutex<Selection>) -> MutexGuard<'_, Selection> {
    selection.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Local copy of the preferred categories.
///
/// Adds and removes update the local list at once and hand back a
/// [`CategoryWrite`] that sends the whole new list. Duplicate adds are
/// rejected here and never reach the server.
pub struct CategoryEditor<A> {
    client: Arc<DataClient<A>>,
    selection: Arc<Mutex<Selection>>,
}

impl<A: Actor> CategoryEditor<A> {
    /// Create an editor with an empty list.
    #[must_use]
    pub fn new(client: Arc<DataClient<A>>) -> Self {
        Self {
            client,
            selection: Arc::new(Mutex::new(Selection::default())),
        }
    }

    /// Current local list.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        lock(&self.selection).names.clone()
    }

    /// Whether `name` is in the local list (exact match).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        lock(&self.selection).names.iter().any(|n| n == name)
    }

    /// Whether a write is running.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        lock(&self.selection).writes > 0
    }

    /// Take in the list as fetched from the server. Ignored while a write is
    /// running so the local edit is not replaced by an older list.
    pub fn sync_from_server(&self, names: &[String]) {
        let mut selection = lock(&self.selection);
        if selection.writes == 0 {
            selection.names = names.to_vec();
        }
    }

    /// Add a custom name typed by the user. Surrounding whitespace is
    /// trimmed; blank input does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCategory`] and posts a notice if the name
    /// is already present.
    pub fn add(&self, input: &str) -> Result<Option<CategoryWrite<A>>> {
        let name = input.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.insert(name).map(Some)
    }

    /// Add one of the backend's suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCategory`] and posts a notice if the name
    /// is already present.
    pub fn add_suggested(&self, name: &str) -> Result<CategoryWrite<A>> {
        self.insert(name)
    }

    /// Remove `name`. The full remaining list is always sent.
    pub fn remove(&self, name: &str) -> CategoryWrite<A> {
        let mut selection = lock(&self.selection);
        let previous = selection.names.clone();
        selection.names.retain(|n| n != name);
        self.write(previous, selection.names.clone())
    }

    fn insert(&self, name: &str) -> Result<CategoryWrite<A>> {
        let mut selection = lock(&self.selection);
        if selection.names.iter().any(|n| n == name) {
            drop(selection);
            self.client.notices().error("Category already exists");
            return Err(Error::DuplicateCategory(name.to_string()));
        }
        let previous = selection.names.clone();
        selection.names.push(name.to_string());
        Ok(self.write(previous, selection.names.clone()))
    }

    fn write(&self, previous: Vec<String>, next: Vec<String>) -> CategoryWrite<A> {
        CategoryWrite {
            client: Arc::clone(&self.client),
            selection: Arc::downgrade(&self.selection),
            previous,
            next,
        }
    }
}

/// A pending replacement of the preferred-category list.
#[must_use = "a category change is not saved until `send` is awaited"]
pub struct CategoryWrite<A> {
    client: Arc<DataClient<A>>,
    selection: Weak<Mutex<Selection>>,
    previous: Vec<String>,
    next: Vec<String>,
}

impl<A> std::fmt::Debug for CategoryWrite<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryWrite")
            .field("previous", &self.previous)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<A: Actor> CategoryWrite<A> {
    /// The list that will be sent.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.next
    }

    /// Send the list.
    ///
    /// On failure the local list goes back to what it was, unless it has been
    /// edited again since or the editor is gone.
    ///
    /// # Errors
    ///
    /// Returns the remote error; a notice has already been posted.
    pub async fn send(self) -> Result<()> {
        if let Some(selection) = self.selection.upgrade() {
            lock(&selection).writes += 1;
        }

        let result = self
            .client
            .update_preferred_categories(self.next.clone())
            .await;

        if let Some(selection) = self.selection.upgrade() {
            let mut selection = lock(&selection);
            selection.writes = selection.writes.saturating_sub(1);
            if result.is_err() && selection.names == self.next {
                tracing::debug!("Restoring categories after failed update");
                selection.names = self.previous;
            }
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::{InMemoryActor, Operation};
    use crate::cache::QueryCache;
    use crate::notice::NoticeBoard;

    fn setup(initial: &[&str]) -> (Arc<InMemoryActor>, CategoryEditor<InMemoryActor>) {
        let actor = Arc::new(InMemoryActor::new());
        let initial: Vec<String> = initial.iter().map(ToString::to_string).collect();
        actor.set_preferred(initial.clone());
        let client = Arc::new(DataClient::with_actor(
            Arc::clone(&actor),
            Arc::new(QueryCache::new()),
            NoticeBoard::new(),
        ));
        let editor = CategoryEditor::new(client);
        editor.sync_from_server(&initial);
        (actor, editor)
    }

    #[tokio::test]
    async fn test_add_custom_trims_and_sends_full_list() {
        let (actor, editor) = setup(&["Work"]);

        let write = editor.add("  Travel ").unwrap().unwrap();
        assert_eq!(write.categories(), ["Work", "Travel"]);
        assert_eq!(editor.selected(), vec!["Work", "Travel"]);

        write.send().await.unwrap();
        assert_eq!(actor.preferred(), vec!["Work", "Travel"]);
    }

    #[tokio::test]
    async fn test_blank_add_is_a_no_op() {
        let (actor, editor) = setup(&[]);

        assert!(editor.add("   ").unwrap().is_none());
        assert_eq!(actor.total_calls(), 0);
        assert!(editor.client.notices().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_suggestion_rejected() {
        let (actor, editor) = setup(&["Finance"]);

        let result = editor.add_suggested("Finance");

        assert!(matches!(result, Err(Error::DuplicateCategory(_))));
        assert_eq!(actor.calls(Operation::UpdatePreferredCategories), 0);
        assert_eq!(editor.client.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_check_is_case_sensitive() {
        let (_actor, editor) = setup(&["Finance"]);
        assert!(editor.add("finance").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove_sends_remaining() {
        let (actor, editor) = setup(&["Work", "Travel"]);

        editor.remove("Work").send().await.unwrap();

        assert_eq!(actor.preferred(), vec!["Travel"]);
        assert_eq!(editor.selected(), vec!["Travel"]);
    }

    #[tokio::test]
    async fn test_failed_write_restores_previous_list() {
        let (actor, editor) = setup(&["Work"]);
        actor.fail(Operation::UpdatePreferredCategories);

        let result = editor.add("Travel").unwrap().unwrap().send().await;

        assert!(result.is_err());
        assert_eq!(editor.selected(), vec!["Work"]);
        let notices = editor.client.notices().drain();
        assert!(notices[0].text.starts_with("Failed to update categories: "));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_newer_local_edit() {
        let (actor, editor) = setup(&["Work"]);
        actor.fail(Operation::UpdatePreferredCategories);

        let first = editor.add("Travel").unwrap().unwrap();
        let _second = editor.add("Family").unwrap().unwrap();
        assert!(first.send().await.is_err());

        assert_eq!(editor.selected(), vec!["Work", "Travel", "Family"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_after_replacement_does_not_restore() {
        let (actor, editor) = setup(&["Work"]);
        actor.set_latency(std::time::Duration::from_millis(150));
        actor.fail(Operation::UpdatePreferredCategories);
        let client = Arc::clone(&editor.client);

        let write = editor.add("Travel").unwrap().unwrap();
        let running = tokio::spawn(write.send());
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(editor.is_saving());
        drop(editor);

        let replacement = CategoryEditor::new(client);
        replacement.sync_from_server(&["Work".to_string(), "Travel".to_string()]);

        assert!(running.await.unwrap().is_err());
        assert_eq!(actor.calls(Operation::UpdatePreferredCategories), 1);
        assert_eq!(replacement.selected(), vec!["Work", "Travel"]);
        assert!(!replacement.is_saving());
    }
}
