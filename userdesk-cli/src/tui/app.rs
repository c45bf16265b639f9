//! Application state: the user list component plus terminal-only focus

use std::sync::Arc;

use userdesk_core::{CreateIdPolicy, Field, Msg, UserApi, UserId, UserList, UserRecord};

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Navigate the user list
    #[default]
    List,
    /// Typing into one form field
    Form(Field),
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub list: UserList<dyn UserApi>,
    pub focus: Focus,
    /// Selected row in the user list
    pub selected: usize,
    /// Cursor position (in chars) within the focused field
    pub cursor: usize,
    /// Collection endpoint, shown in the status bar
    pub endpoint: String,
}

impl App {
    pub fn new(api: Arc<dyn UserApi>, id_policy: CreateIdPolicy, endpoint: String) -> Self {
        Self {
            list: UserList::with_shared(api, id_policy),
            focus: Focus::List,
            selected: 0,
            cursor: 0,
            endpoint,
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        self.list.state().users()
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users().get(self.selected)
    }

    /// Keep the selection inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.users().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        let len = self.users().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.users().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.users().len().saturating_sub(1);
    }

    /// Load the selected record into the form and start typing in it
    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_user().map(|u| u.id) {
            self.list.dispatch(Msg::Edit(id));
            self.focus_field(Field::Name);
        }
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_user().map(|u| u.id) {
            self.list.dispatch(Msg::DeleteRequested(id));
        }
    }

    pub fn pending_delete(&self) -> Option<UserId> {
        self.list.state().pending_delete()
    }

    pub fn answer_delete(&mut self, confirmed: bool) {
        let msg = if confirmed {
            Msg::DeleteConfirmed
        } else {
            Msg::DeleteDeclined
        };
        self.list.dispatch(msg);
    }

    pub fn cancel_edit(&mut self) {
        if self.list.state().is_editing() {
            self.list.dispatch(Msg::CancelEdit);
        }
    }

    /// Submit the form; focus returns to the list once a request is issued
    pub fn submit(&mut self) -> bool {
        let issued = self.list.dispatch(Msg::Submit);
        if issued {
            self.focus_list();
        }
        issued
    }

    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::Form(field) => Some(field),
            Focus::List => None,
        }
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focus = Focus::Form(field);
        self.cursor = self.field_len(field);
    }

    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.cursor = 0;
    }

    pub fn next_field(&mut self) {
        let field = self.focused_field().map_or(Field::Name, |f| f.next());
        self.focus_field(field);
    }

    pub fn prev_field(&mut self) {
        let field = self.focused_field().map_or(Field::Department, |f| f.prev());
        self.focus_field(field);
    }

    fn field_len(&self, field: Field) -> usize {
        self.list.state().form().value(field).chars().count()
    }

    fn byte_index(value: &str, char_idx: usize) -> usize {
        value
            .char_indices()
            .nth(char_idx)
            .map_or(value.len(), |(i, _)| i)
    }

    /// Edit the focused field through a copy, then hand it to the component
    fn edit_field(&mut self, edit: impl FnOnce(&mut String, usize) -> Option<usize>) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.list.state().form().value(field).to_string();
        // A settled request may have reset the form under the cursor
        let cursor = self.cursor.min(value.chars().count());
        if let Some(cursor) = edit(&mut value, cursor) {
            self.cursor = cursor;
            self.list.dispatch(Msg::Input(field, value));
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit_field(|value, cursor| {
            value.insert(Self::byte_index(value, cursor), c);
            Some(cursor + 1)
        });
    }

    pub fn backspace(&mut self) {
        self.edit_field(|value, cursor| {
            if cursor == 0 {
                return None;
            }
            value.remove(Self::byte_index(value, cursor - 1));
            Some(cursor - 1)
        });
    }

    pub fn delete_char(&mut self) {
        self.edit_field(|value, cursor| {
            if cursor >= value.chars().count() {
                return None;
            }
            value.remove(Self::byte_index(value, cursor));
            Some(cursor)
        });
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if let Some(field) = self.focused_field() {
            self.cursor = (self.cursor + 1).min(self.field_len(field));
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        if let Some(field) = self.focused_field() {
            self.cursor = self.field_len(field);
        }
    }
}
