use tradeloom_auth::Principal;

/// Authenticated principal for the current request.
///
/// Inserted by the auth middleware; immutable for the life of the request.
/// Every core operation receives the principal explicitly through this;
/// there is no process-wide principal registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipalContext(Principal);

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self(principal)
    }

    pub fn principal(&self) -> &Principal {
        &self.0
    }
}
