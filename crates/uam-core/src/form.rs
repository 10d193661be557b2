//! Create/edit form state.
//!
//! The form is either closed, staging a new account, or staging changes to
//! an existing one. Edit mode always carries the id of the account being
//! edited, so an edit without a target cannot be expressed.

use thiserror::Error;
use validator::Validate;

use crate::model::{NewUser, Role, User, UserId};

/// Base of the generated avatar URL used when none is given on creation
pub const AVATAR_PLACEHOLDER_BASE: &str = "https://i.pravatar.cc/150?u=";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingRequiredFields,
    #[error("A password is required for a new user")]
    PasswordRequired,
}

/// Fields staged by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct FormFields {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    /// Plaintext password; empty while editing means "unchanged"
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub role: Role,
    pub avatar: String,
    pub phone: String,
}

impl FormFields {
    /// Stage every editable field of `user`, leaving the password empty
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            full_name: user.full_name.clone(),
            role: user.role,
            avatar: user.avatar.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    /// Username, email and full name must all be non-empty
    pub fn check_required(&self) -> Result<(), FormError> {
        self.validate().map_err(|_| FormError::MissingRequiredFields)
    }

    /// Build the creation payload.
    ///
    /// Requires a password, and falls back to a placeholder avatar derived
    /// from the username when none is staged.
    pub fn to_new_user(&self) -> Result<NewUser, FormError> {
        self.check_required()?;
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }

        let avatar = if self.avatar.is_empty() {
            placeholder_avatar(&self.username)
        } else {
            self.avatar.clone()
        };

        Ok(NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            avatar,
            phone: non_empty(&self.phone),
        })
    }

    /// Overlay the staged fields on a freshly fetched record.
    ///
    /// The password is only replaced when one was staged, and fields the
    /// form does not edit are carried over from `original`.
    pub fn merge_into(&self, original: User) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            avatar: non_empty(&self.avatar),
            phone: non_empty(&self.phone),
            password: non_empty(&self.password).or(original.password),
            ..original
        }
    }
}

/// Deterministic placeholder avatar for `username`
pub fn placeholder_avatar(username: &str) -> String {
    format!("{AVATAR_PLACEHOLDER_BASE}{username}")
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// State of the create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState {
    #[default]
    Closed,
    Creating(FormFields),
    Editing {
        id: UserId,
        /// Record as it was when the form was opened
        original: Box<User>,
        fields: FormFields,
    },
}

impl FormState {
    /// Fresh add form with default fields
    pub fn creating() -> Self {
        Self::Creating(FormFields::default())
    }

    pub fn editing(user: &User) -> Self {
        Self::Editing {
            id: user.id.clone(),
            original: Box::new(user.clone()),
            fields: FormFields::from_user(user),
        }
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub const fn editing_id(&self) -> Option<&UserId> {
        match self {
            Self::Editing { id, .. } => Some(id),
            _ => None,
        }
    }

    pub const fn fields(&self) -> Option<&FormFields> {
        match self {
            Self::Closed => None,
            Self::Creating(fields) | Self::Editing { fields, .. } => Some(fields),
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match self {
            Self::Closed => None,
            Self::Creating(fields) | Self::Editing { fields, .. } => Some(fields),
        }
    }

    /// Whether the staged fields differ from the record the form was opened with
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Closed => false,
            Self::Creating(fields) => *fields != FormFields::default(),
            Self::Editing { original, fields, .. } => *fields != FormFields::from_user(original),
        }
    }
}
