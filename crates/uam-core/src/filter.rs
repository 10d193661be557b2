//! Client-side filtering of the user collection.
//!
//! The visible list is always derived from scratch from the full collection
//! and the current [`FilterCriteria`]. Three independent predicates are
//! combined with a logical AND, and each one is vacuously true when its
//! criterion is unset.

use std::str::FromStr;

use crate::model::{Role, User};

/// Status constraint applied to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const fn matches(self, is_active: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    /// Anything other than `active` or `inactive` means no constraint
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            _ => Self::Any,
        })
    }
}

/// Role constraint applied to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    Any,
    Is(Role),
    /// A role name no user can carry; matches nothing
    Unknown,
}

impl RoleFilter {
    pub fn matches(self, role: Role) -> bool {
        match self {
            Self::Any => true,
            Self::Is(wanted) => wanted == role,
            Self::Unknown => false,
        }
    }
}

impl From<Option<Role>> for RoleFilter {
    fn from(role: Option<Role>) -> Self {
        role.map_or(Self::Any, Self::Is)
    }
}

impl FromStr for RoleFilter {
    type Err = std::convert::Infallible;

    /// Only the empty string clears the constraint
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Any);
        }
        Ok(s.parse().map_or(Self::Unknown, Self::Is))
    }
}

/// Search term, role and status constraints for the visible list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub role: RoleFilter,
    pub status: StatusFilter,
}

impl FilterCriteria {
    /// Whether no constraint is set at all
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.role == RoleFilter::Any
            && self.status == StatusFilter::Any
    }

    /// Set the role constraint from its wire name
    pub fn set_role_str(&mut self, role: &str) {
        let Ok(filter) = role.parse::<RoleFilter>();
        self.role = filter;
    }

    /// `needle` is the search term, already lowercased
    fn matches(&self, user: &User, needle: &str) -> bool {
        matches_search(user, needle)
            && self.role.matches(user.role)
            && self.status.matches(user.is_active)
    }
}

/// Case-insensitive substring match against full name, username or email.
/// `needle` must already be lowercase.
fn matches_search(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || [&user.full_name, &user.username, &user.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Indices into `users` of every record matching `criteria`, in original order
pub fn filter_indices(users: &[User], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.search.to_lowercase();
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| criteria.matches(user, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// Every record matching `criteria`, in original order
pub fn filter_users<'a>(users: &'a [User], criteria: &FilterCriteria) -> Vec<&'a User> {
    filter_indices(users, criteria)
        .into_iter()
        .map(|index| &users[index])
        .collect()
}
