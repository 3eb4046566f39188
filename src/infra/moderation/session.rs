// Session provider backed by configuration: the principal is fixed at startup
// (from `MODERATION_USER_ID` / `MODERATION_USER_ROLE`) or absent.

use crate::core::moderation::{ModerationError, Principal, SessionProvider};
use async_trait::async_trait;

pub struct StaticSessionProvider {
    principal: Option<Principal>,
}

impl StaticSessionProvider {
    pub fn new(principal: Option<Principal>) -> Self {
        Self { principal }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_principal(&self) -> Result<Option<Principal>, ModerationError> {
        Ok(self.principal.clone())
    }
}
