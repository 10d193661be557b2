//! In-memory mirror of the service's user collection.
//!
//! The collection is only ever replaced wholesale. Every load takes a
//! [`LoadTicket`] before its request goes out, and a result is applied only
//! while its ticket is still the newest one issued, so a slow response can
//! never overwrite the result of a load started after it.
//!
//! [`UserManagementScreen::load`](crate::UserManagementScreen::load) holds
//! the store exclusively across its request, so through the screen loads
//! are strictly sequential. Overlapping loads only arise when a caller
//! drives [`UserStore::begin_load`] and [`UserStore::complete_load`] itself.

use tracing::{debug, warn};
use uam_core::User;

/// Sequence number of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
    issued: u64,
    applied: Option<LoadTicket>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Whether any load has been applied yet
    pub const fn is_loaded(&self) -> bool {
        self.applied.is_some()
    }

    /// Reserve a ticket for a load about to be issued
    pub const fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Replace the collection with `users` if `ticket` is still current.
    ///
    /// Returns `false` when the result was stale and discarded. Passwords
    /// are stripped on the way in.
    pub fn complete_load(&mut self, ticket: LoadTicket, mut users: Vec<User>) -> bool {
        if ticket.0 != self.issued {
            warn!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding stale user list"
            );
            return false;
        }

        for user in &mut users {
            user.password = None;
        }

        debug!(ticket = ticket.0, count = users.len(), "Applied user list");
        self.users = users;
        self.applied = Some(ticket);
        true
    }
}
