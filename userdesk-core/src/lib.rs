//! userdesk-core - the UserList component
//!
//! Keeps an in-memory copy of a remote user collection in sync with the
//! server over HTTP:
//! - [`state`] holds the component state and its pure update functions
//! - [`component`] runs requests and feeds their outcomes back
//! - [`view`] projects the state for a renderer
//! - [`api`] talks to the collection resource

pub mod api;
pub mod component;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod state;
pub mod view;

pub use api::{ClientOptions, HttpUserApi, UserApi, DEFAULT_ENDPOINT};
pub use component::{run_request, UserList};
pub use config::UserDeskConfig;
pub use error::{ApiError, ConfigError, FormError};
pub use form::{Field, FormState};
pub use model::{NewUser, UserId, UserRecord};
pub use state::{Completion, CreateIdPolicy, Msg, Notice, NoticeLevel, Request, UserListState};
pub use view::{project, ViewModel};
