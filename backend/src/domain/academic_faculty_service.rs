//! Academic faculty use-cases.

use std::sync::Arc;

use pagination::{ListMeta, PaginationOptions};
use serde_json::Value;
use uuid::Uuid;

use super::academic_faculty::{
    ACADEMIC_FACULTY_SEARCHABLE_FIELDS, AcademicFaculty, AcademicFacultyUpdate,
};
use super::error::ApiError;
use super::ports::AcademicFacultyRepository;
use super::query::build_predicate;
use super::{map_store_error, normalise_options};

/// Exact-match filters accepted by faculty listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademicFacultyFilters {
    pub search_term: Option<String>,
    pub title: Option<String>,
}

impl AcademicFacultyFilters {
    fn into_parts(self) -> (Option<String>, Vec<(String, Value)>) {
        let mut filters = Vec::new();
        if let Some(title) = self.title {
            filters.push(("title".to_owned(), Value::String(title)));
        }
        (self.search_term, filters)
    }
}

/// Pre-write guard on the title natural key.
async fn ensure_title_available(
    repo: &dyn AcademicFacultyRepository,
    title: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let existing = repo.find_by_title(title).await.map_err(map_store_error)?;
    match existing {
        Some(found) if Some(found.id) != exclude => Err(ApiError::conflict(
            "Academic faculty with the same title already exists.",
        )),
        _ => Ok(()),
    }
}

/// Academic faculty CRUD service.
#[derive(Clone)]
pub struct AcademicFacultyService {
    repo: Arc<dyn AcademicFacultyRepository>,
}

impl AcademicFacultyService {
    /// Create the service over a faculty repository.
    pub fn new(repo: Arc<dyn AcademicFacultyRepository>) -> Self {
        Self { repo }
    }

    /// Create a faculty after the title guard.
    pub async fn create(&self, title: String) -> Result<AcademicFaculty, ApiError> {
        ensure_title_available(self.repo.as_ref(), &title, None).await?;
        let faculty = AcademicFaculty::create(title);
        self.repo.insert(&faculty).await.map_err(map_store_error)?;
        Ok(faculty)
    }

    /// List faculties with search, filters, sorting and pagination.
    pub async fn list(
        &self,
        filters: AcademicFacultyFilters,
        options: &PaginationOptions,
    ) -> Result<(Vec<AcademicFaculty>, ListMeta), ApiError> {
        let pagination = normalise_options(options)?;
        let (search_term, filter_pairs) = filters.into_parts();
        let predicate = build_predicate(
            search_term.as_deref(),
            ACADEMIC_FACULTY_SEARCHABLE_FIELDS,
            &filter_pairs,
        );
        let (data, total) = self
            .repo
            .find(&predicate, &pagination)
            .await
            .map_err(map_store_error)?;
        Ok((data, ListMeta::new(&pagination, total)))
    }

    /// Fetch one faculty by store identifier.
    pub async fn get(&self, id: Uuid) -> Result<Option<AcademicFaculty>, ApiError> {
        self.repo.find_by_id(id).await.map_err(map_store_error)
    }

    /// Apply a partial update, guarding the title when it changes.
    pub async fn update(
        &self,
        id: Uuid,
        update: AcademicFacultyUpdate,
    ) -> Result<Option<AcademicFaculty>, ApiError> {
        if let Some(title) = update.title.as_deref() {
            ensure_title_available(self.repo.as_ref(), title, Some(id)).await?;
        }
        self.repo.update(id, &update).await.map_err(map_store_error)
    }

    /// Delete one faculty by store identifier.
    pub async fn delete(&self, id: Uuid) -> Result<Option<AcademicFaculty>, ApiError> {
        self.repo.delete(id).await.map_err(map_store_error)
    }
}
