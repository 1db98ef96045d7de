//! Academic department persistence port.

use async_trait::async_trait;
use pagination::Pagination;
use uuid::Uuid;

use crate::domain::academic_department::{
    AcademicDepartment, AcademicDepartmentUpdate, PopulatedDepartment,
};
use crate::domain::query::Predicate;

use super::store::StoreError;

#[async_trait]
pub trait AcademicDepartmentRepository: Send + Sync {
    /// Insert a department document. The adapter enforces title uniqueness as
    /// the final backstop.
    async fn insert(&self, department: &AcademicDepartment) -> Result<(), StoreError>;

    /// Run a predicate-driven listing query with the faculty reference
    /// populated. The predicate is evaluated against the raw document, before
    /// population.
    async fn find(
        &self,
        predicate: &Predicate,
        pagination: &Pagination,
    ) -> Result<(Vec<PopulatedDepartment>, u64), StoreError>;

    /// Fetch one department by store identifier, populated.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PopulatedDepartment>, StoreError>;

    /// Pre-write guard read on the title natural key.
    async fn find_by_title(&self, title: &str) -> Result<Option<AcademicDepartment>, StoreError>;

    /// Apply a partial update, returning the updated raw document.
    async fn update(
        &self,
        id: Uuid,
        update: &AcademicDepartmentUpdate,
    ) -> Result<Option<AcademicDepartment>, StoreError>;

    /// Delete by store identifier, returning the removed document.
    async fn delete(&self, id: Uuid) -> Result<Option<AcademicDepartment>, StoreError>;
}
