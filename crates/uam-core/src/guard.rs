use std::fmt;

use thiserror::Error;

use crate::model::UserId;

/// Actions an operator may never perform on their own account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfAction {
    Delete,
    ToggleStatus,
}

impl fmt::Display for SelfAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Delete => "delete",
            Self::ToggleStatus => "deactivate",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("You cannot {action} your own account")]
pub struct SelfActionDenied {
    pub action: SelfAction,
}

/// Reject `action` when `target` is the signed-in operator.
///
/// With no signed-in operator there is nothing to protect and the action
/// is allowed.
pub fn guard_self_action(
    actor: Option<&UserId>,
    target: &UserId,
    action: SelfAction,
) -> Result<(), SelfActionDenied> {
    match actor {
        Some(actor) if actor == target => Err(SelfActionDenied { action }),
        _ => Ok(()),
    }
}
