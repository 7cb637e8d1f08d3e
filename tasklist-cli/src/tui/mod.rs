//! Terminal frontend for the tasklist API
//!
//! One screen with two independent widgets:
//! - Todos: add, toggle, delete
//! - Contacts: add and list
//!
//! Every mutation reloads the affected list from the server.

pub mod app;
pub mod client;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use client::{HttpApi, TaskApi, DEFAULT_API_URL};
pub use terminal::run;
