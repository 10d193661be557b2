use uam_core::Actor;

/// Source of the currently authenticated operator
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<Actor>;
}

/// Identity fixed at startup
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    actor: Option<Actor>,
}

impl StaticIdentity {
    pub const fn new(actor: Option<Actor>) -> Self {
        Self { actor }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<Actor> {
        self.actor.clone()
    }
}
