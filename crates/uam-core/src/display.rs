//! Presentation helpers for the user table.

use chrono::{DateTime, Utc};

use crate::model::Role;

impl Role {
    /// Human-readable role name
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Moderator => "Moderator",
            Self::Editor => "Editor",
        }
    }

    /// Style class of the role badge
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::SuperAdmin => "role-super-admin",
            Self::Moderator => "role-moderator",
            Self::Editor => "role-editor",
        }
    }
}

/// Describe how long ago a user last signed in.
///
/// Whole days win over whole hours; anything under an hour, or a login
/// timestamp in the future, reads as "Recently".
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use uam_core::display::time_since_login;
///
/// let now = Utc::now();
/// assert_eq!(time_since_login(None, now), "Never logged in");
/// assert_eq!(time_since_login(Some(now - Duration::hours(30)), now), "1 day ago");
/// ```
pub fn time_since_login(last_login: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last_login) = last_login else {
        return "Never logged in".to_string();
    };

    let hours = (now - last_login).num_hours();
    let days = hours / 24;

    if days > 0 {
        format!("{days} {} ago", plural(days, "day"))
    } else if hours > 0 {
        format!("{hours} {} ago", plural(hours, "hour"))
    } else {
        "Recently".to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{unit}s")
    } else {
        unit.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_role_labels_and_badges() {
        assert_eq!(Role::SuperAdmin.label(), "Super Admin");
        assert_eq!(Role::Moderator.label(), "Moderator");
        assert_eq!(Role::Editor.label(), "Editor");
        assert_eq!(Role::SuperAdmin.badge_class(), "role-super-admin");
        assert_eq!(Role::Moderator.badge_class(), "role-moderator");
        assert_eq!(Role::Editor.badge_class(), "role-editor");
    }

    #[test]
    fn test_never_logged_in() {
        assert_eq!(time_since_login(None, now()), "Never logged in");
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(
            time_since_login(Some(now() - Duration::days(1)), now()),
            "1 day ago"
        );
        assert_eq!(
            time_since_login(Some(now() - Duration::days(3) - Duration::hours(5)), now()),
            "3 days ago"
        );
    }

    #[test]
    fn test_hours_ago() {
        assert_eq!(
            time_since_login(Some(now() - Duration::hours(1)), now()),
            "1 hour ago"
        );
        assert_eq!(
            time_since_login(Some(now() - Duration::hours(23)), now()),
            "23 hours ago"
        );
    }

    #[test]
    fn test_recently() {
        assert_eq!(
            time_since_login(Some(now() - Duration::minutes(59)), now()),
            "Recently"
        );
        assert_eq!(
            time_since_login(Some(now() + Duration::hours(2)), now()),
            "Recently"
        );
    }
}
