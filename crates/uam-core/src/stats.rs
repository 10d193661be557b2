use crate::model::{Role, User};

/// Counts over the whole, unfiltered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub super_admins: usize,
    pub moderators: usize,
    pub editors: usize,
}

impl UserStats {
    /// Compute every count in a single scan
    pub fn compute(users: &[User]) -> Self {
        users.iter().fold(Self::default(), |mut stats, user| {
            stats.total += 1;
            if user.is_active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            match user.role {
                Role::SuperAdmin => stats.super_admins += 1,
                Role::Moderator => stats.moderators += 1,
                Role::Editor => stats.editors += 1,
            }
            stats
        })
    }

    pub const fn by_role(&self, role: Role) -> usize {
        match role {
            Role::SuperAdmin => self.super_admins,
            Role::Moderator => self.moderators,
            Role::Editor => self.editors,
        }
    }
}
