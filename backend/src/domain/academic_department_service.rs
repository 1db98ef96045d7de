//! Academic department use-cases.

use std::sync::Arc;

use pagination::{ListMeta, PaginationOptions};
use serde_json::Value;
use uuid::Uuid;

use super::academic_department::{
    ACADEMIC_DEPARTMENT_SEARCHABLE_FIELDS, AcademicDepartment, AcademicDepartmentUpdate,
    PopulatedDepartment,
};
use super::error::ApiError;
use super::ports::{AcademicDepartmentRepository, AcademicFacultyRepository};
use super::query::build_predicate;
use super::{map_store_error, normalise_options};

/// Exact-match filters accepted by department listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademicDepartmentFilters {
    pub search_term: Option<String>,
    pub title: Option<String>,
    /// Faculty reference, as its store identifier.
    pub academic_faculty: Option<String>,
}

impl AcademicDepartmentFilters {
    fn into_parts(self) -> (Option<String>, Vec<(String, Value)>) {
        let mut filters = Vec::new();
        if let Some(title) = self.title {
            filters.push(("title".to_owned(), Value::String(title)));
        }
        if let Some(faculty) = self.academic_faculty {
            filters.push(("academicFaculty".to_owned(), Value::String(faculty)));
        }
        (self.search_term, filters)
    }
}

/// Pre-write guard on the title natural key.
async fn ensure_title_available(
    repo: &dyn AcademicDepartmentRepository,
    title: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let existing = repo.find_by_title(title).await.map_err(map_store_error)?;
    match existing {
        Some(found) if Some(found.id) != exclude => Err(ApiError::conflict(
            "Department with the same title already exists.",
        )),
        _ => Ok(()),
    }
}

/// Academic department CRUD service.
///
/// Creation verifies the referenced faculty actually exists; departments hold
/// a non-owning reference and must never dangle at creation time.
#[derive(Clone)]
pub struct AcademicDepartmentService {
    repo: Arc<dyn AcademicDepartmentRepository>,
    faculties: Arc<dyn AcademicFacultyRepository>,
}

impl AcademicDepartmentService {
    /// Create the service over department and faculty repositories.
    pub fn new(
        repo: Arc<dyn AcademicDepartmentRepository>,
        faculties: Arc<dyn AcademicFacultyRepository>,
    ) -> Self {
        Self { repo, faculties }
    }

    /// Create a department after the title guard and faculty existence check.
    pub async fn create(
        &self,
        title: String,
        academic_faculty: Uuid,
    ) -> Result<PopulatedDepartment, ApiError> {
        ensure_title_available(self.repo.as_ref(), &title, None).await?;

        let faculty = self
            .faculties
            .find_by_id(academic_faculty)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| ApiError::not_found("Academic faculty not found"))?;

        let department = AcademicDepartment::create(title, academic_faculty);
        self.repo
            .insert(&department)
            .await
            .map_err(map_store_error)?;
        Ok(PopulatedDepartment::new(department, Some(faculty)))
    }

    /// List departments with search, filters, sorting and pagination.
    pub async fn list(
        &self,
        filters: AcademicDepartmentFilters,
        options: &PaginationOptions,
    ) -> Result<(Vec<PopulatedDepartment>, ListMeta), ApiError> {
        let pagination = normalise_options(options)?;
        let (search_term, filter_pairs) = filters.into_parts();
        let predicate = build_predicate(
            search_term.as_deref(),
            ACADEMIC_DEPARTMENT_SEARCHABLE_FIELDS,
            &filter_pairs,
        );
        let (data, total) = self
            .repo
            .find(&predicate, &pagination)
            .await
            .map_err(map_store_error)?;
        Ok((data, ListMeta::new(&pagination, total)))
    }

    /// Fetch one department by store identifier, populated.
    pub async fn get(&self, id: Uuid) -> Result<Option<PopulatedDepartment>, ApiError> {
        self.repo.find_by_id(id).await.map_err(map_store_error)
    }

    /// Apply a partial update, guarding the title and re-checking the faculty
    /// reference when either changes.
    pub async fn update(
        &self,
        id: Uuid,
        update: AcademicDepartmentUpdate,
    ) -> Result<Option<AcademicDepartment>, ApiError> {
        if let Some(title) = update.title.as_deref() {
            ensure_title_available(self.repo.as_ref(), title, Some(id)).await?;
        }
        if let Some(faculty_id) = update.academic_faculty {
            self.faculties
                .find_by_id(faculty_id)
                .await
                .map_err(map_store_error)?
                .ok_or_else(|| ApiError::not_found("Academic faculty not found"))?;
        }
        self.repo.update(id, &update).await.map_err(map_store_error)
    }

    /// Delete one department by store identifier.
    pub async fn delete(&self, id: Uuid) -> Result<Option<AcademicDepartment>, ApiError> {
        self.repo.delete(id).await.map_err(map_store_error)
    }
}
