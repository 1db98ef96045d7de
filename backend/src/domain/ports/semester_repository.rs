//! Semester persistence port.

use async_trait::async_trait;
use pagination::Pagination;
use uuid::Uuid;

use crate::domain::query::Predicate;
use crate::domain::semester::{AcademicSemester, SemesterTitle, SemesterUpdate};

use super::store::StoreError;

#[async_trait]
pub trait SemesterRepository: Send + Sync {
    /// Insert a semester document. The adapter enforces `(title, year)`
    /// uniqueness as the final backstop.
    async fn insert(&self, semester: &AcademicSemester) -> Result<(), StoreError>;

    /// Run a predicate-driven listing query, returning the page and the total
    /// match count.
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<AcademicSemester>, u64), StoreError>;

    /// Fetch one semester by store identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicSemester>, StoreError>;

    /// Pre-write guard read on the `(title, year)` natural key.
    async fn find_by_title_year(
        &self,
        title: SemesterTitle,
        year: i32,
    ) -> Result<Option<AcademicSemester>, StoreError>;

    /// Apply a partial update, returning the updated document.
    async fn update(
        &self,
        id: Uuid,
        update: &SemesterUpdate,
    ) -> Result<Option<AcademicSemester>, StoreError>;

    /// Delete by store identifier, returning the removed document.
    async fn delete(&self, id: Uuid) -> Result<Option<AcademicSemester>, StoreError>;
}
