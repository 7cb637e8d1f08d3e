//! Core application state and the actions that talk to the API
//!
//! The lists are a disposable copy of server state: every successful
//! mutation is followed by a full reload, never a local edit.

use super::client::{ClientError, ContactItem, TaskApi, TodoItem};

/// Which widget receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// New todo title input
    #[default]
    TitleInput,
    /// Todo list (toggle / delete)
    TodoList,
    /// Contact name input
    NameInput,
    /// Contact email input
    EmailInput,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::TitleInput => Self::TodoList,
            Self::TodoList => Self::NameInput,
            Self::NameInput => Self::EmailInput,
            Self::EmailInput => Self::TitleInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::TitleInput => Self::EmailInput,
            Self::TodoList => Self::TitleInput,
            Self::NameInput => Self::TodoList,
            Self::EmailInput => Self::NameInput,
        }
    }

    pub fn is_input(self) -> bool {
        !matches!(self, Self::TodoList)
    }
}

/// User intent produced by the key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddTodo,
    /// Flip `completed` on the selected todo
    ToggleSelected,
    DeleteSelected,
    AddContact,
    Quit,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub todos: Vec<TodoItem>,
    pub contacts: Vec<ContactItem>,
    /// Todo title being typed
    pub title: String,
    pub name: String,
    pub email: String,
    /// Banner under the heading (backend health, todo load failures)
    pub status: String,
    /// Blocking alert; dismissed by the next key press
    pub alert: Option<String>,
    pub focus: Focus,
    /// Selected row in the todo list
    pub selected: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            contacts: Vec::new(),
            title: String::new(),
            name: String::new(),
            email: String::new(),
            status: "Loading...".to_owned(),
            alert: None,
            focus: Focus::default(),
            selected: 0,
            should_quit: false,
        }
    }

    /// Initial load: health probe, then both lists independently.
    pub async fn mount(&mut self, api: &dyn TaskApi) {
        self.status = match api.health().await {
            Ok(health) => format!("Backend: OK ({})", health.env),
            Err(e) => {
                tracing::debug!(error = %e, "Health probe failed");
                "Backend unreachable".to_owned()
            }
        };
        self.load_todos(api).await;
        self.load_contacts(api).await;
    }

    /// Reload todos; failures replace the status banner.
    pub async fn load_todos(&mut self, api: &dyn TaskApi) {
        match api.list_todos().await {
            Ok(todos) => {
                self.todos = todos;
                self.clamp_selection();
            }
            Err(ClientError::Status { message, .. }) => {
                self.status = message.unwrap_or_else(|| "Error".to_owned());
            }
            Err(e @ ClientError::Transport(_)) => {
                tracing::debug!(error = %e, "Loading todos failed");
                self.status = "Failed to load todos".to_owned();
            }
        }
    }

    /// Reload contacts; failures are ignored and the old list stays.
    pub async fn load_contacts(&mut self, api: &dyn TaskApi) {
        match api.list_contacts().await {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => tracing::debug!(error = %e, "Loading contacts failed"),
        }
    }

    pub async fn add_todo(&mut self, api: &dyn TaskApi) {
        if self.title.trim().is_empty() {
            return;
        }
        match api.create_todo(&self.title).await {
            Ok(_) => {
                self.title.clear();
                self.load_todos(api).await;
            }
            Err(e) => {
                self.alert = Some(e.server_message().unwrap_or("Failed to add").to_owned());
            }
        }
    }

    /// Send the negation of `completed`; reload on success only.
    pub async fn toggle_todo(&mut self, api: &dyn TaskApi, id: i32, completed: bool) {
        match api.set_completed(id, !completed).await {
            Ok(_) => self.load_todos(api).await,
            Err(e) => tracing::debug!(error = %e, id, "Toggling todo failed"),
        }
    }

    pub async fn delete_todo(&mut self, api: &dyn TaskApi, id: i32) {
        match api.delete_todo(id).await {
            Ok(()) => self.load_todos(api).await,
            Err(e) => tracing::debug!(error = %e, id, "Deleting todo failed"),
        }
    }

    pub async fn add_contact(&mut self, api: &dyn TaskApi) {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return;
        }
        match api.create_contact(&self.name, &self.email).await {
            Ok(_) => {
                self.name.clear();
                self.email.clear();
                self.load_contacts(api).await;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Saving contact failed");
                self.alert = Some("Failed to save contact".to_owned());
            }
        }
    }

    /// Run an action produced by the key handler
    pub async fn perform(&mut self, action: Action, api: &dyn TaskApi) {
        match action {
            Action::AddTodo => self.add_todo(api).await,
            Action::ToggleSelected => {
                if let Some(todo) = self.selected_todo() {
                    let (id, completed) = (todo.id, todo.completed);
                    self.toggle_todo(api, id, completed).await;
                }
            }
            Action::DeleteSelected => {
                if let Some(id) = self.selected_todo().map(|t| t.id) {
                    self.delete_todo(api, id).await;
                }
            }
            Action::AddContact => self.add_contact(api).await,
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn selected_todo(&self) -> Option<&TodoItem> {
        self.todos.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.todos.len().saturating_sub(1));
    }

    /// Text input that currently has focus, if any
    pub fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::TitleInput => Some(&mut self.title),
            Focus::NameInput => Some(&mut self.name),
            Focus::EmailInput => Some(&mut self.email),
            Focus::TodoList => None,
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::tui::client::Health;

    /// In-process API double with switchable failures
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub todos: Mutex<Vec<TodoItem>>,
        pub contacts: Mutex<Vec<ContactItem>>,
        pub calls: Mutex<Vec<&'static str>>,
        pub health_down: bool,
        /// Fail list_todos with this status and message
        pub todos_error: Option<(u16, Option<&'static str>)>,
        pub todos_unreachable: bool,
        pub contacts_down: bool,
        pub reject_writes: Option<&'static str>,
    }

    impl FakeApi {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn rejected(&self) -> Option<ClientError> {
            self.reject_writes.map(|message| ClientError::Status {
                status: 400,
                message: Some(message.to_owned()),
            })
        }

        fn server_down() -> ClientError {
            ClientError::Status {
                status: 500,
                message: None,
            }
        }
    }

    /// A genuine transport error from a port nobody listens on
    async fn refused() -> ClientError {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        reqwest::get(format!("http://127.0.0.1:{port}/"))
            .await
            .map(|_| ())
            .map_err(ClientError::from)
            .unwrap_err()
    }

    #[async_trait]
    impl TaskApi for FakeApi {
        async fn health(&self) -> Result<Health, ClientError> {
            self.record("health");
            if self.health_down {
                return Err(Self::server_down());
            }
            Ok(Health {
                ok: true,
                env: "development".into(),
            })
        }

        async fn list_todos(&self) -> Result<Vec<TodoItem>, ClientError> {
            self.record("list_todos");
            if let Some((status, message)) = self.todos_error {
                return Err(ClientError::Status {
                    status,
                    message: message.map(str::to_owned),
                });
            }
            if self.todos_unreachable {
                return Err(refused().await);
            }
            Ok(self.todos.lock().unwrap().iter().rev().cloned().collect())
        }

        async fn create_todo(&self, title: &str) -> Result<TodoItem, ClientError> {
            self.record("create_todo");
            if let Some(err) = self.rejected() {
                return Err(err);
            }
            let mut todos = self.todos.lock().unwrap();
            let todo = TodoItem {
                id: todos.len() as i32 + 1,
                title: title.to_owned(),
                completed: false,
                created_at: Some(Utc::now()),
            };
            todos.push(todo.clone());
            Ok(todo)
        }

        async fn set_completed(&self, id: i32, completed: bool) -> Result<TodoItem, ClientError> {
            self.record("set_completed");
            let mut todos = self.todos.lock().unwrap();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(ClientError::Status {
                    status: 404,
                    message: Some("Not found".into()),
                })?;
            todo.completed = completed;
            Ok(todo.clone())
        }

        async fn delete_todo(&self, id: i32) -> Result<(), ClientError> {
            self.record("delete_todo");
            let mut todos = self.todos.lock().unwrap();
            let before = todos.len();
            todos.retain(|t| t.id != id);
            if todos.len() == before {
                return Err(ClientError::Status {
                    status: 404,
                    message: Some("Not found".into()),
                });
            }
            Ok(())
        }

        async fn list_contacts(&self) -> Result<Vec<ContactItem>, ClientError> {
            self.record("list_contacts");
            if self.contacts_down {
                return Err(Self::server_down());
            }
            Ok(self.contacts.lock().unwrap().iter().rev().cloned().collect())
        }

        async fn create_contact(&self, name: &str, email: &str) -> Result<ContactItem, ClientError> {
            self.record("create_contact");
            if let Some(err) = self.rejected() {
                return Err(err);
            }
            let mut contacts = self.contacts.lock().unwrap();
            let contact = ContactItem {
                id: contacts.len() as i32 + 1,
                name: name.to_owned(),
                email: email.to_owned(),
                created_at: Some(Utc::now()),
            };
            contacts.push(contact.clone());
            Ok(contact)
        }
    }

    #[tokio::test]
    async fn mount_probes_health_and_loads_both_lists() {
        let api = FakeApi::default();
        let mut app = App::new();
        assert_eq!(app.status, "Loading...");

        app.mount(&api).await;

        assert_eq!(app.status, "Backend: OK (development)");
        assert_eq!(api.calls(), vec!["health", "list_todos", "list_contacts"]);
    }

    #[tokio::test]
    async fn unreachable_backend_still_loads_lists() {
        let api = FakeApi {
            health_down: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.mount(&api).await;

        assert_eq!(app.status, "Backend unreachable");
        assert!(api.calls().contains(&"list_todos"));
        assert!(api.calls().contains(&"list_contacts"));
    }

    #[tokio::test]
    async fn todo_load_failure_shows_server_message() {
        let api = FakeApi {
            todos_error: Some((503, Some("Database not configured. Set DATABASE_URL."))),
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.mount(&api).await;
        assert_eq!(app.status, "Database not configured. Set DATABASE_URL.");

        let api = FakeApi {
            todos_error: Some((500, None)),
            ..FakeApi::default()
        };
        app.load_todos(&api).await;
        assert_eq!(app.status, "Error");
    }

    #[tokio::test]
    async fn todo_load_transport_failure() {
        let api = FakeApi {
            todos_unreachable: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.load_todos(&api).await;
        assert_eq!(app.status, "Failed to load todos");
    }

    #[tokio::test]
    async fn contact_load_failure_is_silent() {
        let api = FakeApi {
            contacts_down: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.mount(&api).await;

        assert_eq!(app.status, "Backend: OK (development)");
        assert!(app.contacts.is_empty());
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn blank_title_is_not_submitted() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.title = "   ".into();

        app.add_todo(&api).await;

        assert!(api.calls().is_empty());
        assert_eq!(app.title, "   ");
    }

    #[tokio::test]
    async fn add_todo_clears_input_and_reloads() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.title = "buy milk".into();

        app.add_todo(&api).await;

        assert!(app.title.is_empty());
        assert_eq!(api.calls(), vec!["create_todo", "list_todos"]);
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.todos[0].title, "buy milk");
        assert!(!app.todos[0].completed);
    }

    #[tokio::test]
    async fn rejected_todo_raises_alert_with_server_text() {
        let api = FakeApi {
            reject_writes: Some("title is required"),
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.title = "x".into();

        app.add_todo(&api).await;

        assert_eq!(app.alert.as_deref(), Some("title is required"));
        assert_eq!(app.title, "x");
        assert_eq!(api.calls(), vec!["create_todo"]);
    }

    #[tokio::test]
    async fn toggle_and_delete_reload_from_server() {
        let api = FakeApi::default();
        let mut app = App::new();
        for title in ["a", "b"] {
            app.title = title.into();
            app.add_todo(&api).await;
        }
        // Newest first: "b" is selected
        assert_eq!(app.selected_todo().unwrap().title, "b");

        app.perform(Action::ToggleSelected, &api).await;
        assert!(app.todos[0].completed);
        assert!(!app.todos[1].completed);

        app.perform(Action::ToggleSelected, &api).await;
        assert!(!app.todos[0].completed);

        app.select_next();
        app.perform(Action::DeleteSelected, &api).await;
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.todos[0].title, "b");
        assert_eq!(app.selected, 0);

        let calls = api.calls();
        assert_eq!(calls.iter().filter(|c| **c == "list_todos").count(), 5);
    }

    #[tokio::test]
    async fn failed_toggle_does_not_reload() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.toggle_todo(&api, 42, false).await;
        assert_eq!(api.calls(), vec!["set_completed"]);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn add_contact_requires_both_fields() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.name = "Ada".into();
        app.email = " ".into();

        app.add_contact(&api).await;
        assert!(api.calls().is_empty());

        app.email = "ada@example.com".into();
        app.add_contact(&api).await;
        assert!(app.name.is_empty());
        assert!(app.email.is_empty());
        assert_eq!(app.contacts.len(), 1);
        assert_eq!(api.calls(), vec!["create_contact", "list_contacts"]);
    }

    #[tokio::test]
    async fn rejected_contact_uses_fixed_alert() {
        let api = FakeApi {
            reject_writes: Some("name and email are required"),
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.name = "Ada".into();
        app.email = "ada@example.com".into();

        app.add_contact(&api).await;
        assert_eq!(app.alert.as_deref(), Some("Failed to save contact"));
        assert_eq!(app.name, "Ada");
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::TitleInput;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::TitleInput);
        assert_eq!(focus.prev(), Focus::EmailInput);
        assert!(!Focus::TodoList.is_input());
    }
}
