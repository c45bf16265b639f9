//! Component state and its update functions
//!
//! All mutation goes through two entry points:
//! - [`UserListState::update`] handles a user intent and returns the
//!   request to issue, if any
//! - [`UserListState::apply`] folds a settled request back into the state
//!
//! Neither performs I/O, so both are exercised directly in tests.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::form::{Field, FormState};
use crate::model::{NewUser, UserId, UserRecord};

/// How a freshly created record gets its local id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateIdPolicy {
    /// Collection length + 1, ignoring the server's id
    #[default]
    Sequential,
    /// Keep the id returned by the server
    Server,
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking user notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Network operation kinds, used for notice wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Operation {
    fn gerund(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetching",
            Operation::Add => "adding",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
        }
    }

    fn failure(&self, message: &str) -> Notice {
        let noun = if *self == Operation::Fetch { "users" } else { "user" };
        Notice::error(format!("Error {} {}: {}", self.gerund(), noun, message))
    }
}

/// A user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Component initialisation; triggers the collection load once
    Mount,
    /// Replace a form field's value
    Input(Field, String),
    /// Submit the form (create or update depending on the editing flag)
    Submit,
    /// Copy a record into the form and enter editing mode
    Edit(UserId),
    /// Leave editing mode without submitting
    CancelEdit,
    /// Ask for confirmation before deleting a record
    DeleteRequested(UserId),
    /// Confirmation given
    DeleteConfirmed,
    /// Confirmation refused
    DeleteDeclined,
}

/// A network effect requested by [`UserListState::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Load,
    Create(NewUser),
    Update(UserRecord),
    Delete(UserId),
}

/// A settled request. Errors carry only their message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Loaded(Result<Vec<UserRecord>, String>),
    Created {
        staged: NewUser,
        result: Result<UserRecord, String>,
    },
    Updated {
        staged: UserRecord,
        result: Result<(), String>,
    },
    Deleted {
        id: UserId,
        result: Result<(), String>,
    },
}

/// State of one UserList component
#[derive(Debug, Clone)]
pub struct UserListState {
    users: Vec<UserRecord>,
    form: FormState,
    editing: bool,
    loading: bool,
    mounted: bool,
    pending_delete: Option<UserId>,
    id_policy: CreateIdPolicy,
    notices: VecDeque<Notice>,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new(CreateIdPolicy::default())
    }
}

impl UserListState {
    /// A not-yet-mounted component; `loading` starts true
    pub fn new(id_policy: CreateIdPolicy) -> Self {
        Self {
            users: Vec::new(),
            form: FormState::default(),
            editing: false,
            loading: true,
            mounted: false,
            pending_delete: None,
            id_policy,
            notices: VecDeque::new(),
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pending_delete(&self) -> Option<UserId> {
        self.pending_delete
    }

    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Oldest notice not yet dismissed
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Dismiss the oldest notice
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Handle a user intent, returning the request to issue
    pub fn update(&mut self, msg: Msg) -> Option<Request> {
        match msg {
            Msg::Mount => {
                if self.mounted {
                    return None;
                }
                self.mounted = true;
                self.loading = true;
                Some(Request::Load)
            }
            Msg::Input(field, value) => {
                self.form.set(field, value);
                None
            }
            Msg::Submit => self.submit(),
            Msg::Edit(id) => {
                match self.users.iter().find(|u| u.id == id) {
                    Some(record) => {
                        self.form = FormState::from_record(record);
                        self.editing = true;
                    }
                    None => warn!(%id, "edit requested for unknown user"),
                }
                None
            }
            Msg::CancelEdit => {
                self.form.reset();
                self.editing = false;
                None
            }
            Msg::DeleteRequested(id) => {
                self.pending_delete = Some(id);
                None
            }
            Msg::DeleteConfirmed => self.pending_delete.take().map(Request::Delete),
            Msg::DeleteDeclined => {
                self.pending_delete = None;
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Request> {
        let request = if self.editing {
            self.form.validate_record().map(Request::Update)
        } else {
            self.form.validate().map(Request::Create)
        };

        match request {
            Ok(request) => Some(request),
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Fold a settled request into the state
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded(Ok(users)) => {
                info!(count = users.len(), "fetched users");
                self.users = users;
                self.loading = false;
            }
            Completion::Loaded(Err(message)) => {
                error!(error = %message, "Error fetching users");
                self.notify(Operation::Fetch.failure(&message));
                self.loading = false;
            }
            Completion::Created { staged, result } => {
                match result {
                    Ok(created) => {
                        let id = match self.id_policy {
                            CreateIdPolicy::Sequential => UserId(self.users.len() as u64 + 1),
                            CreateIdPolicy::Server => created.id,
                        };
                        info!(%id, server_id = %created.id, "added user");
                        // The server's record wins; only its id is replaced
                        self.users.push(UserRecord { id, ..created });
                        self.notify(Notice::info("User added successfully!"));
                    }
                    Err(message) => {
                        error!(name = %staged.name, error = %message, "Error adding user");
                        self.notify(Operation::Add.failure(&message));
                    }
                }
                self.reset_form();
            }
            Completion::Updated { staged, result } => {
                match result {
                    Ok(()) => {
                        info!(id = %staged.id, "updated user");
                        for user in self.users.iter_mut().filter(|u| u.id == staged.id) {
                            *user = staged.clone();
                        }
                        self.notify(Notice::info("User updated successfully!"));
                    }
                    Err(message) => {
                        error!(id = %staged.id, error = %message, "Error updating user");
                        self.notify(Operation::Update.failure(&message));
                    }
                }
                self.reset_form();
            }
            Completion::Deleted { id, result } => match result {
                Ok(()) => {
                    info!(%id, "deleted user");
                    self.users.retain(|u| u.id != id);
                    self.notify(Notice::info("User deleted successfully!"));
                }
                Err(message) => {
                    error!(%id, error = %message, "Error deleting user");
                    self.notify(Operation::Delete.failure(&message));
                }
            },
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
        self.editing = false;
    }
}
