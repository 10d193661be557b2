use chrono::Utc;
use dialoguer::{Input, Password, Select};
use uam_client::UserManagementScreen;
use uam_core::{Role, StatusFilter, User, display::time_since_login};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    FilterRole,
    FilterStatus,
    ClearFilters,
    Add,
    Edit,
    ToggleStatus,
    Delete,
    Reload,
    Quit,
}

impl Action {
    const ALL: [Self; 10] = [
        Self::Search,
        Self::FilterRole,
        Self::FilterStatus,
        Self::ClearFilters,
        Self::Add,
        Self::Edit,
        Self::ToggleStatus,
        Self::Delete,
        Self::Reload,
        Self::Quit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::FilterRole => "Filter by role",
            Self::FilterStatus => "Filter by status",
            Self::ClearFilters => "Clear filters",
            Self::Add => "Add user",
            Self::Edit => "Edit user",
            Self::ToggleStatus => "Activate / deactivate user",
            Self::Delete => "Delete user",
            Self::Reload => "Reload",
            Self::Quit => "Quit",
        }
    }
}

/// Run the interactive menu until the operator quits
pub async fn run(screen: &mut UserManagementScreen) -> anyhow::Result<()> {
    // Failures are already shown through the dialogs
    let _ = screen.load().await;

    loop {
        render(screen);

        let labels: Vec<_> = Action::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        // Operation errors have been reported to the operator already; keep the loop going
        let _ = match Action::ALL[choice] {
            Action::Search => {
                let search: String = Input::new()
                    .with_prompt("Search (name, username or email)")
                    .with_initial_text(screen.criteria().search.clone())
                    .allow_empty(true)
                    .interact_text()?;
                screen.set_search(search);
                Ok(())
            }
            Action::FilterRole => {
                let mut options = vec!["All roles"];
                options.extend(Role::ALL.iter().map(|r| r.label()));
                let picked = Select::new()
                    .with_prompt("Role")
                    .items(&options)
                    .default(0)
                    .interact()?;
                screen.set_role_filter(picked.checked_sub(1).map(|i| Role::ALL[i]));
                Ok(())
            }
            Action::FilterStatus => {
                let options = [
                    ("All statuses", StatusFilter::Any),
                    ("Active", StatusFilter::Active),
                    ("Inactive", StatusFilter::Inactive),
                ];
                let labels: Vec<_> = options.iter().map(|(label, _)| *label).collect();
                let picked = Select::new()
                    .with_prompt("Status")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                screen.set_status_filter(options[picked].1);
                Ok(())
            }
            Action::ClearFilters => {
                screen.clear_filters();
                Ok(())
            }
            Action::Add => {
                screen.open_add_form();
                edit_form(screen, true)?;
                screen.save_user().await
            }
            Action::Edit => match pick_user(screen)? {
                Some(user) => {
                    screen.open_edit_form(&user);
                    edit_form(screen, false)?;
                    if screen.form().has_changes() {
                        screen.save_user().await
                    } else {
                        println!("No changes to save");
                        screen.cancel_form();
                        Ok(())
                    }
                }
                None => Ok(()),
            },
            Action::ToggleStatus => match pick_user(screen)? {
                Some(user) => screen.toggle_status(&user).await,
                None => Ok(()),
            },
            Action::Delete => match pick_user(screen)? {
                Some(user) => screen.delete_user(&user.id).await.map(|_| ()),
                None => Ok(()),
            },
            Action::Reload => screen.load().await,
            Action::Quit => return Ok(()),
        };
    }
}

fn render(screen: &UserManagementScreen) {
    let stats = screen.stats();
    let now = Utc::now();

    println!();
    println!(
        "Users: {} total, {} active, {} inactive | {} super admins, {} moderators, {} editors",
        stats.total,
        stats.active,
        stats.inactive,
        stats.by_role(Role::SuperAdmin),
        stats.by_role(Role::Moderator),
        stats.by_role(Role::Editor),
    );
    if let Some(error) = screen.last_error() {
        println!("Last error: {error}");
    }

    if !screen.is_loaded() {
        println!("Users have not been loaded yet");
        return;
    }

    let visible = screen.filtered_users();
    if visible.is_empty() {
        println!("No users match the current filters");
        return;
    }

    println!(
        "{:<16} {:<24} {:<28} {:<12} {:<9} {}",
        "USERNAME", "NAME", "EMAIL", "ROLE", "STATUS", "LAST LOGIN"
    );
    for user in visible {
        println!(
            "{:<16} {:<24} {:<28} {:<12} {:<9} {}",
            user.username,
            user.full_name,
            user.email,
            user.role.label(),
            if user.is_active { "active" } else { "inactive" },
            time_since_login(user.last_login, now),
        );
    }
}

fn pick_user(screen: &UserManagementScreen) -> anyhow::Result<Option<User>> {
    let visible = screen.filtered_users();
    if visible.is_empty() {
        println!("No users to choose from");
        return Ok(None);
    }

    let labels: Vec<_> = visible
        .iter()
        .map(|u| format!("{} ({})", u.username, u.full_name))
        .collect();
    let picked = Select::new()
        .with_prompt("User")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(picked.map(|index| visible[index].clone()))
}

/// Prompt for every staged field of the open form
fn edit_form(screen: &mut UserManagementScreen, creating: bool) -> anyhow::Result<()> {
    let Some(fields) = screen.form_fields_mut() else {
        return Ok(());
    };

    fields.username = prompt_text("Username", &fields.username)?;
    fields.email = prompt_text("Email", &fields.email)?;
    fields.full_name = prompt_text("Full name", &fields.full_name)?;

    let role_labels: Vec<_> = Role::ALL.iter().map(|r| r.label()).collect();
    let current = Role::ALL.iter().position(|r| *r == fields.role).unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Role")
        .items(&role_labels)
        .default(current)
        .interact()?;
    fields.role = Role::ALL[picked];

    fields.avatar = prompt_text("Avatar URL (optional)", &fields.avatar)?;
    fields.phone = prompt_text("Phone (optional)", &fields.phone)?;

    let prompt = if creating {
        "Password"
    } else {
        "New password (leave empty to keep)"
    };
    fields.password = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;

    Ok(())
}

fn prompt_text(prompt: &str, current: &str) -> anyhow::Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}
