pub mod app;
pub mod card_tab;
pub mod components;
pub mod dialog;
pub mod events;
pub mod form;
pub mod list_view;
pub mod selection;
pub mod theme;
pub mod ui;

pub use app::{App, AppMode, Tab};
