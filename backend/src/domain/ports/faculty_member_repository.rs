//! Faculty-member persistence port.

use async_trait::async_trait;
use pagination::Pagination;

use crate::domain::faculty_member::{FacultyMember, FacultyMemberUpdate, PopulatedFacultyMember};
use crate::domain::query::Predicate;

use super::store::StoreError;

#[async_trait]
pub trait FacultyMemberRepository: Send + Sync {
    /// Run a predicate-driven listing query with academic references
    /// populated. The predicate is evaluated against the raw document.
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedFacultyMember>, u64), StoreError>;

    /// Fetch one faculty member by external id, populated.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedFacultyMember>, StoreError>;

    /// Pre-write guard read on the email natural key.
    async fn find_by_email(&self, email: &str) -> Result<Option<FacultyMember>, StoreError>;

    /// Pre-write guard read on the contact-number natural key.
    async fn find_by_contact_no(
        &self,
        contact_no: &str,
    ) -> Result<Option<FacultyMember>, StoreError>;

    /// Apply a partial update by external id, returning the updated document
    /// populated.
    async fn update_by_external_id(
        &self,
        external_id: &str,
        update: &FacultyMemberUpdate,
    ) -> Result<Option<PopulatedFacultyMember>, StoreError>;
}
