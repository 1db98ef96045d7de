//! Academic semester use-cases.

use std::sync::Arc;

use pagination::{ListMeta, PaginationOptions};
use serde_json::Value;
use uuid::Uuid;

use super::error::ApiError;
use super::ports::SemesterRepository;
use super::query::build_predicate;
use super::semester::{
    AcademicSemester, NewSemester, SEMESTER_SEARCHABLE_FIELDS, SemesterTitle, SemesterUpdate,
};
use super::{map_store_error, normalise_options};

/// Exact-match filters accepted by semester listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemesterFilters {
    pub search_term: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
    pub year: Option<String>,
}

impl SemesterFilters {
    fn into_parts(self) -> (Option<String>, Vec<(String, Value)>) {
        let mut filters = Vec::new();
        if let Some(title) = self.title {
            filters.push(("title".to_owned(), Value::String(title)));
        }
        if let Some(code) = self.code {
            filters.push(("code".to_owned(), Value::String(code)));
        }
        if let Some(year) = self.year {
            filters.push(("year".to_owned(), Value::String(year)));
        }
        (self.search_term, filters)
    }
}

/// Pre-write guard on the `(title, year)` natural key.
///
/// Advisory only; the repository keeps a unique check as the backstop.
async fn ensure_semester_slot_available(
    repo: &dyn SemesterRepository,
    title: SemesterTitle,
    year: i32,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let existing = repo
        .find_by_title_year(title, year)
        .await
        .map_err(map_store_error)?;
    match existing {
        Some(found) if Some(found.id) != exclude => Err(ApiError::conflict(
            "Semester with the same title and year already exists.",
        )),
        _ => Ok(()),
    }
}

/// Semester CRUD service.
#[derive(Clone)]
pub struct SemesterService {
    repo: Arc<dyn SemesterRepository>,
}

impl SemesterService {
    /// Create the service over a semester repository.
    pub fn new(repo: Arc<dyn SemesterRepository>) -> Self {
        Self { repo }
    }

    /// Create a semester after enforcing the title/code mapping and the
    /// `(title, year)` guard.
    ///
    /// # Errors
    /// Bad request when `code` does not match `title`; conflict when the
    /// `(title, year)` slot is taken.
    pub async fn create(&self, payload: NewSemester) -> Result<AcademicSemester, ApiError> {
        if payload.title.code() != payload.code {
            return Err(ApiError::bad_request("Invalid semester code"));
        }
        ensure_semester_slot_available(self.repo.as_ref(), payload.title, payload.year, None)
            .await?;

        let semester = AcademicSemester::create(payload);
        self.repo.insert(&semester).await.map_err(map_store_error)?;
        Ok(semester)
    }

    /// List semesters with search, filters, sorting and pagination.
    ///
    /// # Errors
    /// Request-shape failure for malformed pagination options.
    pub async fn list(
        &self,
        filters: SemesterFilters,
        options: &PaginationOptions,
    ) -> Result<(Vec<AcademicSemester>, ListMeta), ApiError> {
        let pagination = normalise_options(options)?;
        let (search_term, filter_pairs) = filters.into_parts();
        let predicate = build_predicate(
            search_term.as_deref(),
            SEMESTER_SEARCHABLE_FIELDS,
            &filter_pairs,
        );
        let (data, total) = self
            .repo
            .find(&predicate, &pagination)
            .await
            .map_err(map_store_error)?;
        Ok((data, ListMeta::new(&pagination, total)))
    }

    /// Fetch one semester by store identifier.
    pub async fn get(&self, id: Uuid) -> Result<Option<AcademicSemester>, ApiError> {
        self.repo.find_by_id(id).await.map_err(map_store_error)
    }

    /// Apply a partial update.
    ///
    /// Title/code consistency is only enforced when the update touches the
    /// pair; the `(title, year)` guard runs when both are present, excluding
    /// the record being updated.
    pub async fn update(
        &self,
        id: Uuid,
        update: SemesterUpdate,
    ) -> Result<Option<AcademicSemester>, ApiError> {
        update.ensure_title_code_consistent()?;

        if let (Some(title), Some(year)) = (update.title, update.year) {
            ensure_semester_slot_available(self.repo.as_ref(), title, year, Some(id)).await?;
        }

        self.repo.update(id, &update).await.map_err(map_store_error)
    }

    /// Delete one semester by store identifier.
    pub async fn delete(&self, id: Uuid) -> Result<Option<AcademicSemester>, ApiError> {
        self.repo.delete(id).await.map_err(map_store_error)
    }
}
