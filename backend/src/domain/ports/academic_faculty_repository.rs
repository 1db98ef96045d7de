//! Academic faculty persistence port.

use async_trait::async_trait;
use pagination::Pagination;
use uuid::Uuid;

use crate::domain::academic_faculty::{AcademicFaculty, AcademicFacultyUpdate};
use crate::domain::query::Predicate;

use super::store::StoreError;

#[async_trait]
pub trait AcademicFacultyRepository: Send + Sync {
    /// Insert a faculty document. The adapter enforces title uniqueness as
    /// the final backstop.
    async fn insert(&self, faculty: &AcademicFaculty) -> Result<(), StoreError>;

    /// Run a predicate-driven listing query, returning the page and the total
    /// match count.
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<AcademicFaculty>, u64), StoreError>;

    /// Fetch one faculty by store identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicFaculty>, StoreError>;

    /// Pre-write guard read on the title natural key.
    async fn find_by_title(&self, title: &str) -> Result<Option<AcademicFaculty>, StoreError>;

    /// Apply a partial update, returning the updated document.
    async fn update(
        &self,
        id: Uuid,
        update: &AcademicFacultyUpdate,
    ) -> Result<Option<AcademicFaculty>, StoreError>;

    /// Delete by store identifier, returning the removed document.
    async fn delete(&self, id: Uuid) -> Result<Option<AcademicFaculty>, StoreError>;
}
