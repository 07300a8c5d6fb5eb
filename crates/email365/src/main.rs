//! `Email365` - desktop inbox organizer
//!
//! Built with Rust and the iced GUI framework on top of `email365-core`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use email365_core::{
    AppConfig, CacheEvent, CategoryEditor, CategoryWrite, DataClient, DemoData, EmailCategory,
    HelpQuestion, InMemoryActor, InboxSnapshot, InboxView, LocalIdentityProvider,
    Message as Email, NoticeBoard, OptimisticToggle, ProfileEditor, QueryCache, QueryKey,
    QueryState, Session, SuggestedCategory, ToggleFlag, TopLevelView, UserProfile,
};
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{column, container, row, stack};
use iced::{Element, Length, Subscription, Task};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{KeyboardAction, Message, Page, ProfileSetupMessage, SettingsMessage};
use model::{ProfileSetupState, SettingsState, SettingsTab, Toasts};
use style::widgets::{page_style, palette};

type Backend = InMemoryActor;
type AppSession = Session<LocalIdentityProvider, Backend>;

/// Principal the local identity provider signs in.
const LOCAL_PRINCIPAL: &str = "local-user";

/// How often notices and cache changes are picked up.
const TICK: Duration = Duration::from_millis(200);

/// Keys read right after sign-in.
const SIGNED_IN_KEYS: [QueryKey; 5] = [
    QueryKey::CurrentUserProfile,
    QueryKey::Emails,
    QueryKey::PreferredCategories,
    QueryKey::SortingActive,
    QueryKey::AccountLinked,
];

fn main() -> anyhow::Result<()> {
    // Backend tasks (debounce timers, refetches) run on this runtime.
    let runtime = tokio::runtime::Runtime::new()?;
    let (config, config_error) = match runtime.block_on(AppConfig::load()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "email365=debug,email365_core=debug".into());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load settings, using defaults: {}", e);
    }
    info!("Starting Email365");

    let _backend = runtime.enter();
    iced::application(
        move || Email365::new(config.clone()),
        Email365::update,
        Email365::view,
    )
    .title("Email365")
    .subscription(Email365::subscription)
    .run()?;

    Ok(())
}

/// Main application state.
struct Email365 {
    /// Persisted settings.
    config: AppConfig,
    /// Identity and data access.
    session: Arc<AppSession>,
    client: Arc<DataClient<Backend>>,
    /// Cache change feed used to resync the settings editors.
    cache_events: broadcast::Receiver<CacheEvent>,
    /// Current page of the signed-in shell.
    page: Page,
    /// Whether the anonymous demo inbox is open.
    in_demo: bool,
    /// Signed-in inbox state and what it currently shows.
    inbox: InboxView,
    inbox_snapshot: InboxSnapshot,
    /// Demo inbox state and what it currently shows.
    demo_inbox: InboxView,
    demo_snapshot: InboxSnapshot,
    /// Automatic sorting switch.
    sorting: OptimisticToggle<Backend>,
    /// Google account link switch.
    account_link: OptimisticToggle<Backend>,
    /// General and notification settings.
    profile: ProfileEditor<Backend>,
    /// Preferred categories.
    categories: CategoryEditor<Backend>,
    settings: SettingsState,
    setup: ProfileSetupState,
    help_query: String,
    toasts: Toasts,
}

impl Email365 {
    /// Create new application instance.
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        palette::set_theme(config.theme);

        let actor = Arc::new(Backend::seeded(now_nanos()).with_latency(config.demo_latency()));
        let cache = Arc::new(QueryCache::new());
        let cache_events = cache.subscribe();
        let client = Arc::new(DataClient::new(cache, NoticeBoard::new()));
        let session = Arc::new(Session::new(
            LocalIdentityProvider::new(LOCAL_PRINCIPAL),
            Arc::clone(&client),
            actor,
        ));
        session.init();

        let app = Self {
            sorting: OptimisticToggle::new(Arc::clone(&client), ToggleFlag::SortingActive),
            account_link: OptimisticToggle::new(Arc::clone(&client), ToggleFlag::AccountLinked),
            profile: ProfileEditor::new(Arc::clone(&client), config.debounce_window()),
            categories: CategoryEditor::new(Arc::clone(&client)),
            config,
            session,
            client,
            cache_events,
            page: Page::Inbox,
            in_demo: false,
            inbox: InboxView::new(EmailCategory::Priority),
            inbox_snapshot: InboxSnapshot::Loading,
            demo_inbox: InboxView::new(EmailCategory::Priority),
            demo_snapshot: InboxSnapshot::Loading,
            settings: SettingsState::default(),
            setup: ProfileSetupState::default(),
            help_query: String::new(),
            toasts: Toasts::default(),
        };

        let task = if app.session.is_authenticated() {
            app.load_signed_in()
        } else {
            Task::none()
        };
        (app, task)
    }

    /// Update state based on message, then re-derive what the views show.
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.dispatch(message);
        self.absorb_cache_events();
        self.present();
        task
    }

    #[allow(clippy::too_many_lines)] // Large match is idiomatic for Elm architecture
    fn dispatch(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NavigateTo(page) => {
                self.page = page;
                match page {
                    Page::Help => return self.fetch(QueryKey::HelpQuestions),
                    Page::Settings if self.settings.tab == SettingsTab::Categories => {
                        return self.fetch(QueryKey::SuggestedCategories);
                    }
                    _ => {}
                }
            }
            Message::SelectCategory(category) => {
                self.page = Page::Inbox;
                self.active_inbox_mut().set_category(category);
            }
            Message::Login => {
                let session = Arc::clone(&self.session);
                return Task::perform(
                    async move { session.login().await.map(drop).map_err(|e| e.to_string()) },
                    Message::LoggedIn,
                );
            }
            Message::LoggedIn(result) => match result {
                Ok(()) => {
                    self.in_demo = false;
                    return self.load_signed_in();
                }
                Err(e) => tracing::warn!("Login failed: {}", e),
            },
            Message::Logout => {
                let session = Arc::clone(&self.session);
                return Task::perform(async move { session.logout().await }, |()| {
                    Message::LoggedOut
                });
            }
            Message::LoggedOut => self.reset_signed_in_state(),
            Message::OpenDemo => {
                self.in_demo = true;
                return self.fetch(QueryKey::DemoData);
            }
            Message::CloseDemo => {
                self.in_demo = false;
                self.demo_inbox = InboxView::new(EmailCategory::Priority);
            }
            Message::Fetched(key, result) => {
                if let Err(e) = result {
                    tracing::warn!(%key, "Fetch failed: {}", e);
                }
            }
            Message::Saved(result) => {
                if let Err(e) = result {
                    tracing::debug!("Write failed: {}", e);
                }
            }
            Message::SearchChanged(search) => self.active_inbox_mut().set_search(search),
            Message::SortChanged(sort) => self.active_inbox_mut().set_sort(sort),
            Message::ToggleUnreadOnly => self.active_inbox_mut().toggle_unread_only(),
            Message::SelectMessage(id) => self.active_inbox_mut().select(Some(id)),
            Message::ClearSelection => self.active_inbox_mut().select(None),
            Message::MoveMessage(id, category) => {
                let client = Arc::clone(&self.client);
                return Task::perform(
                    async move { client.update_email_category(id, category).await },
                    |r| Message::Saved(r.map_err(|e| e.to_string())),
                );
            }
            Message::PreviewAction(action) => {
                tracing::debug!(?action, "Preview action");
                self.client.notices().success(action.notice_text());
            }
            Message::ToggleSorting => return toggle(&self.sorting),
            Message::Toggled(result) => {
                if let Err(e) = result {
                    tracing::debug!("Toggle failed: {}", e);
                }
            }
            Message::ProfileSetup(msg) => return self.handle_profile_setup(msg),
            Message::Settings(msg) => return self.handle_settings(msg),
            Message::HelpSearchChanged(query) => self.help_query = query,
            Message::Tick => {
                let now = Instant::now();
                self.toasts.push_all(self.client.notices().drain(), now);
                self.toasts.expire(now);
            }
            Message::DismissToast(index) => self.toasts.dismiss(index),
            Message::ConfigSaved(result) => {
                if let Err(e) = result {
                    self.client
                        .notices()
                        .error(format!("Failed to save settings: {e}"));
                }
            }
            Message::KeyPressed(action) => return self.handle_keyboard_action(action),
        }
        Task::none()
    }

    /// Handle keyboard shortcut actions.
    fn handle_keyboard_action(&mut self, action: KeyboardAction) -> Task<Message> {
        let signed_in = self.session.is_authenticated();
        match action {
            KeyboardAction::Cancel => {
                if self.page == Page::Inbox {
                    self.active_inbox_mut().select(None);
                } else {
                    self.page = Page::Inbox;
                }
            }
            KeyboardAction::Settings if signed_in => {
                return Task::done(Message::NavigateTo(Page::Settings));
            }
            KeyboardAction::Help if signed_in => {
                return Task::done(Message::NavigateTo(Page::Help));
            }
            KeyboardAction::Refresh if signed_in => {
                let client = Arc::clone(&self.client);
                return Task::perform(
                    async move { client.invalidate_and_refetch(QueryKey::Emails).await },
                    |r| Message::Fetched(QueryKey::Emails, r.map_err(|e| e.to_string())),
                );
            }
            KeyboardAction::Settings | KeyboardAction::Help | KeyboardAction::Refresh => {}
        }
        Task::none()
    }

    /// Handle first-run profile form messages.
    fn handle_profile_setup(&mut self, msg: ProfileSetupMessage) -> Task<Message> {
        match msg {
            ProfileSetupMessage::NameChanged(name) => self.setup.name = name,
            ProfileSetupMessage::EmailChanged(email) => self.setup.email = email,
            ProfileSetupMessage::Submit => {
                if let Some(error) = self.setup.validate() {
                    self.setup.error = Some(error.to_string());
                } else {
                    self.setup.is_saving = true;
                    self.setup.error = None;
                    let profile = UserProfile::new(self.setup.name.trim(), self.setup.email.trim());
                    let client = Arc::clone(&self.client);
                    return Task::perform(
                        async move { client.save_caller_user_profile(profile).await },
                        |r| {
                            Message::ProfileSetup(ProfileSetupMessage::Saved(
                                r.map_err(|e| e.to_string()),
                            ))
                        },
                    );
                }
            }
            ProfileSetupMessage::Saved(result) => {
                self.setup.is_saving = false;
                match result {
                    Ok(()) => {
                        info!("Profile created");
                        self.setup = ProfileSetupState::default();
                    }
                    Err(e) => self.setup.error = Some(e),
                }
            }
        }
        Task::none()
    }

    /// Handle settings messages.
    fn handle_settings(&mut self, msg: SettingsMessage) -> Task<Message> {
        match msg {
            SettingsMessage::SelectTab(tab) => {
                self.settings.tab = tab;
                if tab == SettingsTab::Categories {
                    return self.fetch(QueryKey::SuggestedCategories);
                }
            }
            SettingsMessage::NameChanged(name) => self.profile.set_name(name),
            SettingsMessage::EmailChanged(email) => self.profile.set_email(email),
            SettingsMessage::EmailNotifications(enabled) => {
                return Task::perform(self.profile.set_email_notifications(enabled), |r| {
                    Message::Saved(r.map_err(|e| e.to_string()))
                });
            }
            SettingsMessage::PushNotifications(enabled) => {
                return Task::perform(self.profile.set_push_notifications(enabled), |r| {
                    Message::Saved(r.map_err(|e| e.to_string()))
                });
            }
            SettingsMessage::CategoryInputChanged(input) => self.settings.category_input = input,
            SettingsMessage::AddCategory => match self.categories.add(&self.settings.category_input)
            {
                Ok(Some(write)) => {
                    self.settings.category_input.clear();
                    return send(write);
                }
                Ok(None) => {}
                Err(e) => tracing::debug!("Category not added: {}", e),
            },
            SettingsMessage::AddSuggested(name) => match self.categories.add_suggested(&name) {
                Ok(write) => return send(write),
                Err(e) => tracing::debug!("Category not added: {}", e),
            },
            SettingsMessage::RemoveCategory(name) => return send(self.categories.remove(&name)),
            SettingsMessage::ToggleTheme => {
                self.config.theme = self.config.theme.toggled();
                palette::set_theme(self.config.theme);
                info!("Theme changed to {:?}", self.config.theme);
                let config = self.config.clone();
                return Task::perform(
                    async move { config.save().await.map_err(|e| e.to_string()) },
                    Message::ConfigSaved,
                );
            }
            SettingsMessage::ToggleAccountLink => return toggle(&self.account_link),
            SettingsMessage::DeleteAccount => {
                self.client.notices().info("Account deletion coming soon");
            }
        }
        Task::none()
    }

    /// Read every key the signed-in shell shows.
    fn load_signed_in(&self) -> Task<Message> {
        Task::batch(SIGNED_IN_KEYS.map(|key| self.fetch(key)))
    }

    /// Read `key` in the background.
    fn fetch(&self, key: QueryKey) -> Task<Message> {
        let client = Arc::clone(&self.client);
        Task::perform(
            async move { client.refresh(key).await.map_err(|e| e.to_string()) },
            move |result| Message::Fetched(key, result),
        )
    }

    /// Drop per-user UI state after sign-out.
    fn reset_signed_in_state(&mut self) {
        self.profile.close();
        self.profile = ProfileEditor::new(Arc::clone(&self.client), self.config.debounce_window());
        self.categories = CategoryEditor::new(Arc::clone(&self.client));
        self.inbox = InboxView::new(EmailCategory::Priority);
        self.page = Page::Inbox;
        self.settings = SettingsState::default();
        self.setup = ProfileSetupState::default();
        self.help_query.clear();
    }

    /// Push server changes into the settings editors.
    fn absorb_cache_events(&mut self) {
        let mut profile_changed = false;
        let mut categories_changed = false;
        loop {
            match self.cache_events.try_recv() {
                Ok(event) => {
                    profile_changed |= event.affects(QueryKey::CurrentUserProfile);
                    categories_changed |= event.affects(QueryKey::PreferredCategories);
                }
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "Cache events lagged, resyncing");
                    profile_changed = true;
                    categories_changed = true;
                }
                Err(_) => break,
            }
        }

        let cache = self.client.cache();
        if profile_changed
            && let Some(profile) = cache.get::<Option<UserProfile>>(QueryKey::CurrentUserProfile)
        {
            self.profile.sync_from_server(profile.as_ref());
        }
        if categories_changed
            && let Some(names) = cache.get::<Vec<String>>(QueryKey::PreferredCategories)
        {
            self.categories.sync_from_server(&names);
        }
    }

    /// Re-derive both inbox snapshots from the cache.
    fn present(&mut self) {
        let emails = self.client.state::<Vec<Email>>(QueryKey::Emails);
        self.inbox_snapshot = self.inbox.present(&emails);

        let demo = self
            .client
            .state::<DemoData>(QueryKey::DemoData)
            .map(|d| d.emails);
        self.demo_snapshot = self.demo_inbox.present(&demo);
    }

    fn showing_demo(&self) -> bool {
        self.in_demo && !self.session.is_authenticated()
    }

    fn active_inbox_mut(&mut self) -> &mut InboxView {
        if self.showing_demo() {
            &mut self.demo_inbox
        } else {
            &mut self.inbox
        }
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        let base = match self.session.top_level_view() {
            TopLevelView::Landing if self.in_demo => self.view_demo(),
            TopLevelView::Landing => view::view_landing(),
            TopLevelView::Authenticated if self.session.needs_profile_setup() => {
                view::view_profile_setup(&self.setup)
            }
            TopLevelView::Authenticated => self.view_shell(),
        };

        if self.toasts.is_empty() {
            base
        } else {
            stack![base, view::view_toasts(&self.toasts)].into()
        }
    }

    /// Anonymous demo inbox: same layout, no account actions.
    fn view_demo(&self) -> Element<'_, Message> {
        let emails = self
            .client
            .state::<DemoData>(QueryKey::DemoData)
            .map(|d| d.emails)
            .unwrap_or_default();
        let header = view::view_header(self.demo_inbox.filter(), &view::HeaderMode::Demo);
        let body = row![
            view::view_sidebar(self.demo_inbox.filter().category, &unread_counts(&emails)),
            view::view_message_list(
                &self.demo_snapshot,
                self.demo_inbox.filter(),
                &chrono::Local::now()
            ),
            view::view_preview(self.demo_snapshot.selected(), false),
        ];

        frame(column![header, body.height(Length::Fill)].into())
    }

    /// Signed-in shell: header, sidebar and the current page.
    fn view_shell(&self) -> Element<'_, Message> {
        let principal = self
            .session
            .identity()
            .map(|identity| identity.principal)
            .unwrap_or_default();
        let header = view::view_header(self.inbox.filter(), &view::HeaderMode::Signed(&principal));

        let emails = self
            .client
            .state::<Vec<Email>>(QueryKey::Emails)
            .unwrap_or_default();
        let sidebar = view::view_sidebar(self.inbox.filter().category, &unread_counts(&emails));

        let content: Element<'_, Message> = match self.page {
            Page::Inbox => column![
                container(view::view_sorting_banner(
                    &self.sorting.displayed(),
                    self.sorting.is_pending()
                ))
                .padding(12),
                row![
                    view::view_message_list(
                        &self.inbox_snapshot,
                        self.inbox.filter(),
                        &chrono::Local::now()
                    ),
                    view::view_preview(self.inbox_snapshot.selected(), true),
                ]
                .height(Length::Fill),
            ]
            .into(),
            Page::Settings => view::view_settings(&self.settings, &self.settings_context()),
            Page::Help => view::view_help(
                &self
                    .client
                    .state::<Vec<HelpQuestion>>(QueryKey::HelpQuestions),
                &self.help_query,
            ),
        };

        frame(column![header, row![sidebar, content].height(Length::Fill)].into())
    }

    fn settings_context(&self) -> view::SettingsContext {
        view::SettingsContext {
            draft: self.profile.draft(),
            saving_name: self.profile.is_saving_name(),
            saving_email: self.profile.is_saving_email(),
            has_profile: self.profile.base().is_some(),
            preferred: self.categories.selected(),
            categories_saving: self.categories.is_saving(),
            suggested: self
                .client
                .state::<Vec<SuggestedCategory>>(QueryKey::SuggestedCategories),
            theme: self.config.theme,
            account_linked: self.account_link.displayed(),
            link_pending: self.account_link.is_pending(),
        }
    }

    /// Tick for notices and cache changes, plus keyboard shortcuts.
    #[allow(clippy::unused_self)] // Required signature for iced subscription
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(TICK).map(|_| Message::Tick),
            keyboard::listen().map(|event| {
                if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                    handle_key_press(key, modifiers).unwrap_or(Message::Tick)
                } else {
                    Message::Tick
                }
            }),
        ])
    }
}

/// Fill the window with the page background.
fn frame(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(page_style)
        .into()
}

/// Flip a switch in the background.
fn toggle(switch: &OptimisticToggle<Backend>) -> Task<Message> {
    let switch = switch.clone();
    Task::perform(
        async move { switch.toggle().await.map_err(|e| e.to_string()) },
        Message::Toggled,
    )
}

/// Send a category change in the background.
fn send(write: CategoryWrite<Backend>) -> Task<Message> {
    Task::perform(write.send(), |r| Message::Saved(r.map_err(|e| e.to_string())))
}

/// Unread messages per category.
fn unread_counts(messages: &[Email]) -> Vec<(EmailCategory, usize)> {
    EmailCategory::ALL
        .iter()
        .map(|&category| {
            let count = messages
                .iter()
                .filter(|m| m.category == category && !m.is_read)
                .count();
            (category, count)
        })
        .collect()
}

/// Current time in nanoseconds since the epoch.
fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

/// Handle keyboard shortcuts and return appropriate message.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<Message> {
    let ctrl = modifiers.command(); // Ctrl on Linux/Windows, Cmd on macOS

    match key {
        Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::KeyPressed(KeyboardAction::Cancel))
        }
        Key::Named(keyboard::key::Named::F1) => Some(Message::KeyPressed(KeyboardAction::Help)),
        Key::Named(keyboard::key::Named::F5) => {
            Some(Message::KeyPressed(KeyboardAction::Refresh))
        }
        Key::Character(c) if ctrl && c.as_str() == "," => {
            Some(Message::KeyPressed(KeyboardAction::Settings))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_counts_per_category() {
        let messages = vec![
            Email::new("1", "a@example.com", "One", EmailCategory::Priority, 1),
            Email::new("2", "b@example.com", "Two", EmailCategory::Priority, 2).read(),
            Email::new("3", "c@example.com", "Three", EmailCategory::Social, 3),
        ];

        let counts = unread_counts(&messages);

        assert_eq!(counts.len(), EmailCategory::ALL.len());
        assert!(counts.contains(&(EmailCategory::Priority, 1)));
        assert!(counts.contains(&(EmailCategory::Social, 1)));
        assert!(counts.contains(&(EmailCategory::Spam, 0)));
    }

    #[test]
    fn test_shortcuts() {
        assert!(matches!(
            handle_key_press(Key::Named(keyboard::key::Named::Escape), Modifiers::empty()),
            Some(Message::KeyPressed(KeyboardAction::Cancel))
        ));
        assert!(handle_key_press(Key::Character(",".into()), Modifiers::empty()).is_none());
    }

    #[tokio::test]
    async fn test_preview_action_only_posts_notice() {
        let (mut app, _) = Email365::new(AppConfig::default());
        let id = email365_core::MessageId::new("demo-1");
        let _ = app.update(Message::SelectMessage(id.clone()));

        let _ = app.update(Message::PreviewAction(model::PreviewAction::Archive));

        assert_eq!(app.inbox.selected(), Some(&id));
        let notices = app.client.notices().drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, email365_core::NoticeLevel::Success);
        assert_eq!(notices[0].text, "Archive action triggered");
    }

    #[tokio::test]
    async fn test_delete_account_is_announced() {
        let (mut app, _) = Email365::new(AppConfig::default());

        let _ = app.update(Message::Settings(SettingsMessage::DeleteAccount));

        let notices = app.client.notices().drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, email365_core::NoticeLevel::Info);
        assert_eq!(notices[0].text, "Account deletion coming soon");
    }
}
