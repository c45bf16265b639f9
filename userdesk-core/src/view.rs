//! Read-only projection of the state, independent of any renderer

use crate::form::Field;
use crate::model::{UserId, UserRecord};
use crate::state::{Notice, UserListState};

pub const TITLE: &str = "User Management";
pub const LOADING_TEXT: &str = "Loading users...";
pub const CONFIRM_DELETE_TEXT: &str = "Are you sure you want to delete this user?";

/// One bound form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView<'a> {
    pub field: Field,
    pub placeholder: &'static str,
    pub value: &'a str,
}

/// The form section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<'a> {
    pub inputs: [InputView<'a>; 3],
    pub submit_label: &'static str,
    pub editing: bool,
}

/// One list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub id: UserId,
    pub name: &'a str,
    pub email: &'a str,
    pub department: &'a str,
}

impl<'a> From<&'a UserRecord> for RowView<'a> {
    fn from(user: &'a UserRecord) -> Self {
        RowView {
            id: user.id,
            name: &user.name,
            email: &user.email,
            department: &user.department,
        }
    }
}

/// Everything below the title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    Loading(&'static str),
    Ready {
        form: FormView<'a>,
        rows: Vec<RowView<'a>>,
    },
}

/// A full frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub title: &'static str,
    pub body: Body<'a>,
    /// Confirmation prompt while a delete awaits an answer
    pub confirm: Option<&'static str>,
    /// Notice currently blocking the view
    pub notice: Option<&'a Notice>,
}

/// Project the state into a view
pub fn project(state: &UserListState) -> ViewModel<'_> {
    let body = if state.is_loading() {
        Body::Loading(LOADING_TEXT)
    } else {
        let form = state.form();
        let inputs = Field::ALL.map(|field| InputView {
            field,
            placeholder: field.label(),
            value: form.value(field),
        });
        Body::Ready {
            form: FormView {
                inputs,
                submit_label: if state.is_editing() {
                    "Update User"
                } else {
                    "Add User"
                },
                editing: state.is_editing(),
            },
            rows: state.users().iter().map(RowView::from).collect(),
        }
    };

    ViewModel {
        title: TITLE,
        body,
        confirm: state.pending_delete().map(|_| CONFIRM_DELETE_TEXT),
        notice: state.notice(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Completion, Msg};

    fn ready_state() -> UserListState {
        let mut state = UserListState::default();
        state.update(Msg::Mount);
        state.apply(Completion::Loaded(Ok(vec![UserRecord {
            id: UserId(1),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            department: "Ops".to_string(),
        }])));
        state
    }

    #[test]
    fn test_loading_shows_only_loading_text() {
        let state = UserListState::default();
        let view = project(&state);
        assert_eq!(view.title, TITLE);
        assert_eq!(view.body, Body::Loading(LOADING_TEXT));
    }

    #[test]
    fn test_ready_view_lists_rows_and_add_label() {
        let state = ready_state();
        let Body::Ready { form, rows } = project(&state).body else {
            panic!("expected ready body");
        };
        assert_eq!(form.submit_label, "Add User");
        assert_eq!(form.inputs[1].placeholder, "Email");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department, "Ops");
    }

    #[test]
    fn test_editing_switches_label_and_fills_inputs() {
        let mut state = ready_state();
        state.update(Msg::Edit(UserId(1)));
        let Body::Ready { form, .. } = project(&state).body else {
            panic!("expected ready body");
        };
        assert_eq!(form.submit_label, "Update User");
        assert_eq!(form.inputs[0].value, "A");
    }

    #[test]
    fn test_confirm_prompt_follows_pending_delete() {
        let mut state = ready_state();
        assert!(project(&state).confirm.is_none());
        state.update(Msg::DeleteRequested(UserId(1)));
        assert_eq!(project(&state).confirm, Some(CONFIRM_DELETE_TEXT));
    }
}
