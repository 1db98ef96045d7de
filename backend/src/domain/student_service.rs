//! Student profile use-cases.
//!
//! Students are read, updated and deleted here; creation happens in the
//! onboarding coordinator because it spans the credential collection too.

use std::sync::Arc;

use pagination::{ListMeta, PaginationOptions};
use serde_json::Value;
use tracing::warn;

use super::error::ApiError;
use super::ports::{StudentRepository, TransactionalStore};
use super::query::build_predicate;
use super::student::{PopulatedStudent, STUDENT_SEARCHABLE_FIELDS, Student, StudentUpdate};
use super::{map_store_error, normalise_options};

/// Exact-match filters accepted by student listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilters {
    pub search_term: Option<String>,
    pub id: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
}

impl StudentFilters {
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
        (self.search_term, filters)
    }
}

/// Pre-write guard on the contact-number natural key, excluding the record
/// being updated.
pub(crate) async fn ensure_contact_no_available(
    repo: &dyn StudentRepository,
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
    repo: &dyn StudentRepository,
    email: &str,
) -> Result<(), ApiError> {
    let existing: Option<Student> = repo.find_by_email(email).await.map_err(map_store_error)?;
    if existing.is_some() {
        return Err(ApiError::conflict(
            "Student with the same email already exists",
        ));
    }
    Ok(())
}

/// Student read/update/delete service.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
    store: Arc<dyn TransactionalStore>,
}

impl StudentService {
    /// Create the service over a student repository and the transactional
    /// store used for cascading deletes.
    pub fn new(repo: Arc<dyn StudentRepository>, store: Arc<dyn TransactionalStore>) -> Self {
        Self { repo, store }
    }

    /// List students with search, filters, sorting and pagination.
    pub async fn list(
        &self,
        filters: StudentFilters,
        options: &PaginationOptions,
    ) -> Result<(Vec<PopulatedStudent>, ListMeta), ApiError> {
        let pagination = normalise_options(options)?;
        let (search_term, filter_pairs) = filters.into_parts();
        let predicate = build_predicate(
            search_term.as_deref(),
            STUDENT_SEARCHABLE_FIELDS,
            &filter_pairs,
        );
        let (data, total) = self
            .repo
            .find(&predicate, &pagination)
            .await
            .map_err(map_store_error)?;
        Ok((data, ListMeta::new(&pagination, total)))
    }

    /// Fetch one student by external id, populated.
    pub async fn get(&self, external_id: &str) -> Result<Option<PopulatedStudent>, ApiError> {
        self.repo
            .find_by_external_id(external_id)
            .await
            .map_err(map_store_error)
    }

    /// Apply a partial update by external id.
    ///
    /// An update carrying `email` is rejected outright — the address is
    /// immutable after creation — and a changed contact number runs through
    /// the uniqueness guard first.
    pub async fn update(
        &self,
        external_id: &str,
        update: StudentUpdate,
    ) -> Result<Option<PopulatedStudent>, ApiError> {
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

    /// Delete a student and its owning credential as one atomic unit.
    ///
    /// Either both documents are removed or neither is; a missing student
    /// aborts the transaction before any write becomes visible.
    pub async fn delete(&self, external_id: &str) -> Result<Option<Student>, ApiError> {
        let mut txn = self.store.begin().await.map_err(map_store_error)?;

        let removed = match txn.delete_student(external_id).await {
            Ok(removed) => removed,
            Err(err) => {
                abort_quietly(txn, "student delete").await;
                return Err(map_store_error(err));
            }
        };
        let Some(student) = removed else {
            abort_quietly(txn, "student delete").await;
            return Ok(None);
        };

        if let Err(err) = txn.delete_user(external_id).await {
            abort_quietly(txn, "student delete").await;
            return Err(map_store_error(err));
        }

        txn.commit().await.map_err(map_store_error)?;
        Ok(Some(student))
    }
}

/// Abort a transaction, logging rather than masking the original failure.
pub(crate) async fn abort_quietly(
    txn: Box<dyn super::ports::StoreTransaction>,
    context: &'static str,
) {
    if let Err(abort_err) = txn.abort().await {
        warn!(error = %abort_err, context, "transaction abort failed");
    }
}
