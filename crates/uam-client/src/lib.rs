//! Client side of the user administration console
//!
//! Wires the pure logic of [`uam_core`] to a remote user-management service:
//! the service and identity contracts, an HTTP implementation, the
//! sequenced collection store and the [`UserManagementScreen`] controller.

pub mod config;
pub mod dialogs;
pub mod error;
pub mod identity;
pub mod screen;
pub mod service;
pub mod store;
pub mod tracing;

pub use config::{ClientConfig, Environment};
pub use dialogs::{Dialogs, Notice, NoticeLevel};
pub use error::{ConfigError, ScreenError, ServiceError};
pub use identity::{IdentityProvider, StaticIdentity};
pub use screen::{DeleteOutcome, UserManagementScreen};
pub use service::{HttpUserService, UserService};
pub use store::{LoadTicket, UserStore};
