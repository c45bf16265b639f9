//! Interactive user management screen
//!
//! - Form pane (Name, Email, Department) that adds or updates a user
//! - User list with vim-style navigation, edit and delete
//! - Modal confirm dialog and notices

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use terminal::run;
