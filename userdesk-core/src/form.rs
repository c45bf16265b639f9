//! Form controller: the staging copy of one record's fields

use crate::error::FormError;
use crate::model::{NewUser, UserId, UserRecord};

/// An editable field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Department,
}

impl Field {
    /// All editable fields in display order
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Department];

    /// Placeholder / label text
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Department => "Department",
        }
    }

    /// Next field, wrapping around
    pub fn next(&self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Department,
            Field::Department => Field::Name,
        }
    }

    /// Previous field, wrapping around
    pub fn prev(&self) -> Field {
        match self {
            Field::Name => Field::Department,
            Field::Email => Field::Name,
            Field::Department => Field::Email,
        }
    }
}

/// Staging copy of a record. `id` is only set while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl FormState {
    /// Copy a record's fields verbatim
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Department => &self.department,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
        }
    }

    /// Replace a field's value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    /// Clear every field, including the id
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_empty()
            && self.email.is_empty()
            && self.department.is_empty()
    }

    /// Required-field and email checks, producing a create body
    pub fn validate(&self) -> Result<NewUser, FormError> {
        for field in Field::ALL {
            if self.value(field).trim().is_empty() {
                return Err(FormError::Required {
                    field: field.label(),
                });
            }
        }

        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail {
                value: self.email.clone(),
            });
        }

        Ok(NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        })
    }

    /// Validate and attach the staged id, producing a full replace body
    pub fn validate_record(&self) -> Result<UserRecord, FormError> {
        let body = self.validate()?;
        let id = self.id.ok_or(FormError::MissingId)?;
        Ok(body.with_id(id))
    }
}

/// `local@domain` with both parts non-empty and no whitespace
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
