pub mod http;

use async_trait::async_trait;
use uam_core::{NewUser, User, UserId};

use crate::error::ServiceError;

pub use http::HttpUserService;

/// Remote user-management service the console reconciles against
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError>;

    async fn get_user(&self, id: &UserId) -> Result<User, ServiceError>;

    async fn create_user(&self, user: &NewUser) -> Result<(), ServiceError>;

    /// Replace the stored record with `user`
    async fn update_user(&self, user: &User) -> Result<(), ServiceError>;

    async fn delete_user(&self, id: &UserId) -> Result<(), ServiceError>;

    /// Flip the active flag of `user`
    async fn toggle_user_status(&self, user: &User) -> Result<(), ServiceError>;
}
