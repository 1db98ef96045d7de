//! Faculty-member profile use-cases.
//!
//! Mirrors the student service: reads, updates and cascading deletes; the
//! onboarding coordinator owns creation.

use std::sync::Arc;

use pagination::{ListMeta, PaginationOptions};
use serde_json::Value;

use super::error::ApiError;
use super::faculty_member::{
    FACULTY_MEMBER_SEARCHABLE_FIELDS, FacultyMember, FacultyMemberUpdate, PopulatedFacultyMember,
};
use super::ports::{FacultyMemberRepository, TransactionalStore};
use super::query::build_predicate;
use super::student_service::abort_quietly;
use super::{map_store_error, normalise_options};

/// Exact-match filters accepted by faculty-member listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyMemberFilters {
    pub search_term: Option<String>,
    pub id: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub designation: Option<String>,
}

impl FacultyMemberFilters {
    fn into_parts(self) -> (Option<String>, Vec<(String, Value)>) {
        let mut filters = Vec::new();
        if let Some(id) = self.id {
            filters.push(("id".to_owned(), Value::String(id)));
        }
        if let Some(blood_group) = self.blood_group {
            filters.push(("bloodGroup".to_owned(), Value::String(blood_group)));
        }
        if let Some(email) = self.email {
            filters.push(("email".to_owned(), Value::String(email)));
        }
        if let Some(contact_no) = self.contact_no {
            filters.push(("contactNo".to_owned(), Value::String(contact_no)));
        }
        if let Some(emergency) = self.emergency_contact_no {
            filters.push(("emergencyContactNo".to_owned(), Value::String(emergency)));
        }
        if let Some(designation) = self.designation {
            filters.push(("designation".to_owned(), Value::String(designation)));
        }
        (self.search_term, filters)
    }
}

/// Pre-write guard on the contact-number natural key, excluding the record
/// being updated.
pub(crate) async fn ensure_contact_no_available(
    repo: &dyn FacultyMemberRepository,
    contact_no: &str,
    exclude_external_id: Option<&str>,
) -> Result<(), ApiError> {
    let existing = repo
        .find_by_contact_no(contact_no)
        .await
        .map_err(map_store_error)?;
    match existing {
        Some(found) if Some(found.profile.id.as_str()) != exclude_external_id => {
            Err(ApiError::conflict("Contact number already exists"))
        }
        _ => Ok(()),
    }
}

/// Pre-write guard on the email natural key.
pub(crate) async fn ensure_email_available(
    repo: &dyn FacultyMemberRepository,
    email: &str,
) -> Result<(), ApiError> {
    let existing = repo.find_by_email(email).await.map_err(map_store_error)?;
    if existing.is_some() {
        return Err(ApiError::conflict(
            "Faculty with the same email already exists",
        ));
    }
    Ok(())
}

/// Faculty-member read/update/delete service.
#[derive(Clone)]
pub struct FacultyMemberService {
    repo: Arc<dyn FacultyMemberRepository>,
    store: Arc<dyn TransactionalStore>,
}

impl FacultyMemberService {
    /// Create the service over a faculty-member repository and the
    /// transactional store used for cascading deletes.
    pub fn new(repo: Arc<dyn FacultyMemberRepository>, store: Arc<dyn TransactionalStore>) -> Self {
        Self { repo, store }
    }

    /// List faculty members with search, filters, sorting and pagination.
    pub async fn list(
        &self,
        filters: FacultyMemberFilters,
        options: &PaginationOptions,
    ) -> Result<(Vec<PopulatedFacultyMember>, ListMeta), ApiError> {
        let pagination = normalise_options(options)?;
        let (search_term, filter_pairs) = filters.into_parts();
        let predicate = build_predicate(
            search_term.as_deref(),
            FACULTY_MEMBER_SEARCHABLE_FIELDS,
            &filter_pairs,
        );
        let (data, total) = self
            .repo
            .find(&predicate, &pagination)
            .await
            .map_err(map_store_error)?;
        Ok((data, ListMeta::new(&pagination, total)))
    }

    /// Fetch one faculty member by external id, populated.
    pub async fn get(&self, external_id: &str) -> Result<Option<PopulatedFacultyMember>, ApiError> {
        self.repo
            .find_by_external_id(external_id)
            .await
            .map_err(map_store_error)
    }

    /// Apply a partial update by external id, rejecting email mutation and
    /// guarding a changed contact number.
    pub async fn update(
        &self,
        external_id: &str,
        update: FacultyMemberUpdate,
    ) -> Result<Option<PopulatedFacultyMember>, ApiError> {
        if update.email.is_some() {
            return Err(ApiError::unauthorized("You can't update the email address"));
        }
        if let Some(contact_no) = update.contact_no.as_deref() {
            ensure_contact_no_available(self.repo.as_ref(), contact_no, Some(external_id)).await?;
        }
        self.repo
            .update_by_external_id(external_id, &update)
            .await
            .map_err(map_store_error)
    }

    /// Delete a faculty member and its owning credential as one atomic unit.
    pub async fn delete(&self, external_id: &str) -> Result<Option<FacultyMember>, ApiError> {
        let mut txn = self.store.begin().await.map_err(map_store_error)?;

        let removed = match txn.delete_faculty_member(external_id).await {
            Ok(removed) => removed,
            Err(err) => {
                abort_quietly(txn, "faculty member delete").await;
                return Err(map_store_error(err));
            }
        };
        let Some(member) = removed else {
            abort_quietly(txn, "faculty member delete").await;
            return Ok(None);
        };

        if let Err(err) = txn.delete_user(external_id).await {
            abort_quietly(txn, "faculty member delete").await;
            return Err(map_store_error(err));
        }

        txn.commit().await.map_err(map_store_error)?;
        Ok(Some(member))
    }
}
