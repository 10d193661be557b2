//! The user-management screen.
//!
//! [`UserManagementScreen`] keeps three things in sync: the collection
//! mirrored from the service, the filtered view derived from it, and the
//! create/edit form. Every successful mutation is followed by a full reload
//! of the collection; nothing is patched locally.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uam_core::{
    FilterCriteria, FormFields, FormState, NewUser, Role, RoleFilter, SelfAction, StatusFilter,
    User, UserId, UserStats, filter::filter_indices, guard_self_action,
};

use crate::{
    dialogs::{Dialogs, Notice},
    error::{ScreenError, ServiceError},
    identity::IdentityProvider,
    service::UserService,
    store::UserStore,
};

const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Result of a delete request the guard let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator declined the confirmation; nothing was sent
    Declined,
}

pub struct UserManagementScreen {
    service: Arc<dyn UserService>,
    identity: Arc<dyn IdentityProvider>,
    dialogs: Arc<dyn Dialogs>,
    store: UserStore,
    criteria: FilterCriteria,
    visible: Vec<usize>,
    form: FormState,
    last_error: Option<String>,
}

impl std::fmt::Debug for UserManagementScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManagementScreen")
            .field("store", &self.store)
            .field("criteria", &self.criteria)
            .field("visible", &self.visible.len())
            .field("form", &self.form)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl UserManagementScreen {
    pub fn new(
        service: Arc<dyn UserService>,
        identity: Arc<dyn IdentityProvider>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self {
            service,
            identity,
            dialogs,
            store: UserStore::new(),
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            form: FormState::Closed,
            last_error: None,
        }
    }

    // --- Collection ---

    /// Fetch the full collection and replace the local copy.
    ///
    /// On failure the current collection is kept, the error is shown to the
    /// operator and remembered in [`last_error`](Self::last_error).
    ///
    /// The exclusive borrow means one screen never has two loads in flight;
    /// the ticket only matters to callers driving a shared [`UserStore`].
    pub async fn load(&mut self) -> Result<(), ScreenError> {
        let ticket = self.store.begin_load();
        info!("Loading users");

        let fetched = self.service.get_all_users().await;
        match fetched {
            Ok(users) => {
                let count = users.len();
                if self.store.complete_load(ticket, users) {
                    info!(count, "Loaded users");
                    self.last_error = None;
                    self.apply_filters();
                }
                Ok(())
            }
            Err(err) => Err(self.service_failure("Failed to load users", err)),
        }
    }

    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    /// Whether a load has succeeded yet
    pub const fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // --- Filtering ---

    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Users passing the current filters, in collection order
    pub fn filtered_users(&self) -> Vec<&User> {
        let users = self.store.users();
        self.visible.iter().map(|&index| &users[index]).collect()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.apply_filters();
    }

    pub fn set_role_filter(&mut self, role: impl Into<RoleFilter>) {
        self.criteria.role = role.into();
        self.apply_filters();
    }

    /// Set the role filter from its wire name.
    ///
    /// An empty name clears the constraint; a name that is not a role leaves
    /// nothing visible.
    pub fn set_role_filter_str(&mut self, role: &str) {
        self.criteria.set_role_str(role);
        if self.criteria.role == RoleFilter::Unknown {
            warn!(role, "Filtering by unknown role");
        }
        self.apply_filters();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.apply_filters();
    }

    /// Recompute the visible list from scratch
    pub fn apply_filters(&mut self) {
        self.visible = filter_indices(self.store.users(), &self.criteria);
        debug!(
            visible = self.visible.len(),
            total = self.store.users().len(),
            "Filters applied"
        );
    }

    // --- Statistics (always over the unfiltered collection) ---

    pub fn stats(&self) -> UserStats {
        UserStats::compute(self.store.users())
    }

    pub fn total_users(&self) -> usize {
        self.store.users().len()
    }

    pub fn active_users(&self) -> usize {
        self.store.users().iter().filter(|u| u.is_active).count()
    }

    pub fn inactive_users(&self) -> usize {
        self.store.users().iter().filter(|u| !u.is_active).count()
    }

    pub fn users_by_role(&self, role: Role) -> usize {
        self.store
            .users()
            .iter()
            .filter(|u| u.role == role)
            .count()
    }

    // --- Form ---

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Staged fields of the open form, for the view to edit in place
    pub fn form_fields_mut(&mut self) -> Option<&mut FormFields> {
        self.form.fields_mut()
    }

    pub fn open_add_form(&mut self) {
        debug!("Opening add form");
        self.form = FormState::creating();
    }

    pub fn open_edit_form(&mut self, user: &User) {
        debug!(user_id = %user.id, "Opening edit form");
        self.form = FormState::editing(user);
    }

    pub fn cancel_form(&mut self) {
        debug!("Form cancelled");
        self.form = FormState::Closed;
    }

    /// Submit the open form.
    ///
    /// Validation happens before anything is sent. An edit re-fetches the
    /// stored record and overlays the staged fields on it; the password is
    /// only replaced when a new one was typed. On success the form closes
    /// and the collection is reloaded; on a service failure the form stays
    /// open.
    pub async fn save_user(&mut self) -> Result<(), ScreenError> {
        let submission = match &self.form {
            FormState::Closed => return Err(self.reject(ScreenError::NoOpenForm)),
            FormState::Creating(fields) => fields.to_new_user().map(Submission::Create),
            FormState::Editing { id, fields, .. } => fields
                .check_required()
                .map(|()| Submission::Update(id.clone(), fields.clone())),
        };
        let submission = submission.map_err(|err| self.reject(err))?;

        match submission {
            Submission::Create(new_user) => {
                info!(username = %new_user.username, "Creating user");
                let created = self.service.create_user(&new_user).await;
                if let Err(err) = created {
                    return Err(self.service_failure("Failed to create user", err));
                }
                self.dialogs.notify(Notice::success("User created successfully"));
            }
            Submission::Update(id, fields) => {
                info!(user_id = %id, "Updating user");
                let fetched = self.service.get_user(&id).await;
                let original = match fetched {
                    Ok(original) => original,
                    Err(err) => return Err(self.service_failure("Failed to fetch user", err)),
                };

                let updated = fields.merge_into(original);
                let result = self.service.update_user(&updated).await;
                if let Err(err) = result {
                    return Err(self.service_failure("Failed to update user", err));
                }
                self.dialogs.notify(Notice::success("User updated successfully"));
            }
        }

        self.form = FormState::Closed;
        self.reload_after_mutation().await;
        Ok(())
    }

    // --- Account actions ---

    /// Delete a user after the operator confirms.
    ///
    /// The signed-in operator can never delete their own account.
    pub async fn delete_user(&mut self, id: &UserId) -> Result<DeleteOutcome, ScreenError> {
        self.guard(id, SelfAction::Delete)?;

        if !self.dialogs.confirm(DELETE_PROMPT) {
            info!(user_id = %id, "Deletion declined");
            return Ok(DeleteOutcome::Declined);
        }

        info!(user_id = %id, "Deleting user");
        let deleted = self.service.delete_user(id).await;
        if let Err(err) = deleted {
            return Err(self.service_failure("Failed to delete user", err));
        }
        self.dialogs.notify(Notice::success("User deleted successfully"));

        self.reload_after_mutation().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Flip a user's active flag. The signed-in operator cannot toggle
    /// their own account.
    pub async fn toggle_status(&mut self, user: &User) -> Result<(), ScreenError> {
        self.guard(&user.id, SelfAction::ToggleStatus)?;

        info!(user_id = %user.id, is_active = user.is_active, "Toggling user status");
        let toggled = self.service.toggle_user_status(user).await;
        if let Err(err) = toggled {
            return Err(self.service_failure("Failed to change user status", err));
        }

        let message = if user.is_active {
            "User deactivated successfully"
        } else {
            "User activated successfully"
        };
        self.dialogs.notify(Notice::success(message));

        self.reload_after_mutation().await;
        Ok(())
    }

    fn guard(&self, target: &UserId, action: SelfAction) -> Result<(), ScreenError> {
        let actor = self.identity.current_user();
        guard_self_action(actor.as_ref().map(|a| &a.id), target, action)
            .map_err(|err| self.reject(err))
    }

    /// The mutation already went through; a failed reload is reported but
    /// does not fail the operation.
    async fn reload_after_mutation(&mut self) {
        if let Err(err) = self.load().await {
            warn!("Reload after mutation failed: {err}");
        }
    }

    /// Report an error caught before any request was sent
    fn reject(&self, err: impl Into<ScreenError>) -> ScreenError {
        let err = err.into();
        warn!("Rejected: {err}");
        self.dialogs.notify(Notice::warning(err.to_string()));
        err
    }

    fn service_failure(&mut self, context: &str, err: ServiceError) -> ScreenError {
        error!("{context}: {err}");
        let message = format!("{context}: {err}");
        self.dialogs.notify(Notice::error(message.clone()));
        self.last_error = Some(message);
        ScreenError::Service(err)
    }
}

enum Submission {
    Create(NewUser),
    Update(UserId, FormFields),
}
