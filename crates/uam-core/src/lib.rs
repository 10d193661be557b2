//! Core logic of the user administration console
//!
//! This crate holds the synchronous, side-effect free part of the console:
//! the user model, the client-side filter engine, collection statistics,
//! the create/edit form state and the self-action guard.

pub mod display;
pub mod filter;
pub mod form;
pub mod guard;
pub mod model;
pub mod stats;

pub use filter::{FilterCriteria, RoleFilter, StatusFilter};
pub use form::{FormError, FormFields, FormState};
pub use guard::{SelfAction, SelfActionDenied, guard_self_action};
pub use model::{Actor, NewUser, Role, User, UserId};
pub use stats::UserStats;
