#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use uam_client::{
    Dialogs, Notice, NoticeLevel, ServiceError, StaticIdentity, UserManagementScreen,
    UserService,
};
use uam_core::{Actor, NewUser, Role, User, UserId};

/// A call received by [`MockUserService`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    Get(UserId),
    Create(NewUser),
    Update(User),
    Delete(UserId),
    Toggle(UserId),
}

/// Operations [`MockUserService`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    GetAll,
    Get,
    Create,
    Update,
    Delete,
    Toggle,
}

#[derive(Default)]
struct Backend {
    users: Vec<User>,
    calls: Vec<Call>,
    failing: Vec<Op>,
    next_id: u32,
}

/// In-memory user service that records every call
#[derive(Default)]
pub struct MockUserService {
    inner: Mutex<Backend>,
}

impl MockUserService {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            inner: Mutex::new(Backend {
                next_id: 1000,
                users,
                ..Default::default()
            }),
        }
    }

    /// Make every future call of `op` fail with a 500
    pub fn fail_on(&self, op: Op) {
        self.inner.lock().unwrap().failing.push(op);
    }

    pub fn recover(&self) {
        self.inner.lock().unwrap().failing.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls other than collection loads
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::GetAll | Call::Get(_)))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn stored_users(&self) -> Vec<User> {
        self.inner.lock().unwrap().users.clone()
    }

    fn record(&self, call: Call, op: Op) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing.contains(&op) {
            return Err(ServiceError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        self.record(Call::GetAll, Op::GetAll)?;
        Ok(self.stored_users())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, ServiceError> {
        self.record(Call::Get(id.clone()), Op::Get)?;
        self.stored_users()
            .into_iter()
            .find(|user| &user.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<(), ServiceError> {
        self.record(Call::Create(new_user.clone()), Op::Create)?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let user = User {
            id: UserId::new(inner.next_id.to_string()),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            full_name: new_user.full_name.clone(),
            password: Some(new_user.password.clone()),
            role: new_user.role,
            is_active: true,
            avatar: Some(new_user.avatar.clone()),
            phone: new_user.phone.clone(),
            last_login: None,
            extra: Default::default(),
        };
        inner.users.push(user);
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), ServiceError> {
        self.record(Call::Update(user.clone()), Op::Update)?;
        let mut inner = self.inner.lock().unwrap();
        let stored = inner
            .users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .ok_or_else(|| ServiceError::NotFound(user.id.clone()))?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ServiceError> {
        self.record(Call::Delete(id.clone()), Op::Delete)?;
        self.inner.lock().unwrap().users.retain(|user| &user.id != id);
        Ok(())
    }

    async fn toggle_user_status(&self, user: &User) -> Result<(), ServiceError> {
        self.record(Call::Toggle(user.id.clone()), Op::Toggle)?;
        let mut inner = self.inner.lock().unwrap();
        if let Some(stored) = inner.users.iter_mut().find(|stored| stored.id == user.id) {
            stored.is_active = !user.is_active;
        }
        Ok(())
    }
}

/// Dialogs that record notices and answer confirmations from a script
pub struct ScriptedDialogs {
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<String>>,
    confirm_answer: AtomicBool,
}

impl ScriptedDialogs {
    pub fn confirming(answer: bool) -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(answer),
        }
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn notices_at(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == level)
            .map(|notice| notice.message)
            .collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }
}

pub fn user(id: &str, username: &str, full_name: &str, role: Role, is_active: bool) -> User {
    User {
        id: UserId::from(id),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: full_name.to_string(),
        password: None,
        role,
        is_active,
        avatar: None,
        phone: None,
        last_login: None,
        extra: Default::default(),
    }
}

/// Five accounts; "1" is the signed-in admin in most tests
pub fn sample_users() -> Vec<User> {
    vec![
        user("1", "admin", "Site Admin", Role::SuperAdmin, true),
        user("2", "alice", "alice smith", Role::Editor, true),
        user("3", "bob", "Bob B", Role::Editor, false),
        user("4", "carol", "Carol Jones", Role::Moderator, true),
        user("5", "dave", "Dave Smith", Role::Moderator, false),
    ]
}

pub fn actor(id: &str) -> Actor {
    Actor {
        id: UserId::from(id),
        username: format!("user{id}"),
    }
}

/// Test harness bundling a screen with handles to its collaborators
pub struct TestScreen {
    pub screen: UserManagementScreen,
    pub service: Arc<MockUserService>,
    pub dialogs: Arc<ScriptedDialogs>,
}

impl TestScreen {
    /// Screen over `users`, signed in as `actor_id`, already loaded
    pub async fn loaded(users: Vec<User>, actor_id: Option<&str>) -> Self {
        let mut harness = Self::unloaded(users, actor_id);
        harness
            .screen
            .load()
            .await
            .expect("Initial load should succeed");
        harness.service.clear_calls();
        harness
    }

    pub fn unloaded(users: Vec<User>, actor_id: Option<&str>) -> Self {
        let service = Arc::new(MockUserService::with_users(users));
        let dialogs = Arc::new(ScriptedDialogs::confirming(true));
        let identity = Arc::new(StaticIdentity::new(actor_id.map(actor)));

        let screen = UserManagementScreen::new(service.clone(), identity, dialogs.clone());

        Self {
            screen,
            service,
            dialogs,
        }
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.screen
            .filtered_users()
            .iter()
            .map(|user| user.id.to_string())
            .collect()
    }
}
