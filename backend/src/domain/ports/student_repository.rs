//! Student persistence port.

use async_trait::async_trait;
use pagination::Pagination;

use crate::domain::query::Predicate;
use crate::domain::student::{PopulatedStudent, Student, StudentUpdate};

use super::store::StoreError;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Run a predicate-driven listing query with academic references
    /// populated. The predicate is evaluated against the raw document.
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedStudent>, u64), StoreError>;

    /// Fetch one student by external id, populated.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PopulatedStudent>, StoreError>;

    /// Pre-write guard read on the email natural key.
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StoreError>;

    /// Pre-write guard read on the contact-number natural key.
    async fn find_by_contact_no(&self, contact_no: &str) -> Result<Option<Student>, StoreError>;

    /// Apply a partial update by external id, returning the updated document
    /// populated.
    async fn update_by_external_id(
        &self,
        external_id: &str,
        update: &StudentUpdate,
    ) -> Result<Option<PopulatedStudent>, StoreError>;
}
