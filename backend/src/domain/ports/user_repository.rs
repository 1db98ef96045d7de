//! Credential persistence port.

use async_trait::async_trait;

use crate::domain::user::{PopulatedUser, Role, User};

use super::store::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// External id of the most recently created credential for a role,
    /// ordered by creation time descending. Feeds the sequential id
    /// generator.
    async fn find_last_external_id(&self, role: Role) -> Result<Option<String>, StoreError>;

    /// Fetch one credential by external id.
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, StoreError>;

    /// Fetch one credential by external id with its profile (and the
    /// profile's own references) populated.
    async fn find_with_profile(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedUser>, StoreError>;
}
