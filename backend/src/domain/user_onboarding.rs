//! Transactional onboarding: create a profile and its credential atomically.
//!
//! Onboarding writes two documents (a student or faculty-member profile and
//! the credential that owns it) inside one store transaction. Any failure
//! aborts the transaction and re-raises the original error, so a credential
//! can never exist without its profile or vice versa. Because the external
//! identifier is generated from the latest committed one, a concurrent
//! onboarding can race it onto the unique index; that loss is retried a
//! bounded number of times with a freshly generated identifier.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::faculty_member::FacultyMemberDraft;
use super::faculty_member_service;
use super::ids::{self, IdGenerationError};
use super::map_store_error;
use super::ports::{
    FacultyMemberRepository, SemesterRepository, StoreError, StoreTransaction, StudentRepository,
    TransactionalStore, UserRepository,
};
use super::semester::AcademicSemester;
use super::student::StudentDraft;
use super::student_service::{self, abort_quietly};
use super::user::{PopulatedUser, Role, User, hash_password};
use super::ApiError;

/// How many times a lost id race is retried before giving up.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Fallback passwords applied when an onboarding request carries none.
#[derive(Debug, Clone)]
pub struct DefaultPasswords {
    pub student: String,
    pub faculty: String,
    /// Reserved for admin provisioning; no onboarding endpoint consumes it
    /// yet, but the credential schema already carries the role.
    pub admin: String,
}

/// Failure inside one onboarding attempt.
///
/// Store errors are kept un-mapped until the retry loop has inspected them
/// for an external-id collision.
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn map_id_error(err: IdGenerationError) -> AttemptError {
    error!(error = %err, "external id generation failed");
    AttemptError::Api(ApiError::Unknown)
}

/// Coordinates profile and credential creation across repositories and the
/// transactional store.
#[derive(Clone)]
pub struct UserOnboardingService {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentRepository>,
    faculty_members: Arc<dyn FacultyMemberRepository>,
    semesters: Arc<dyn SemesterRepository>,
    store: Arc<dyn TransactionalStore>,
    passwords: Arc<DefaultPasswords>,
}

impl UserOnboardingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        students: Arc<dyn StudentRepository>,
        faculty_members: Arc<dyn FacultyMemberRepository>,
        semesters: Arc<dyn SemesterRepository>,
        store: Arc<dyn TransactionalStore>,
        passwords: DefaultPasswords,
    ) -> Self {
        Self {
            users,
            students,
            faculty_members,
            semesters,
            store,
            passwords: Arc::new(passwords),
        }
    }

    /// Onboard a student: generate the semester-derived external id, then
    /// write the profile and its credential in one transaction.
    ///
    /// Returns the populated credential, or `None` when the committed record
    /// cannot be read back.
    pub async fn create_student(
        &self,
        draft: StudentDraft,
        password: Option<String>,
    ) -> Result<Option<PopulatedUser>, ApiError> {
        let plaintext =
            Zeroizing::new(password.unwrap_or_else(|| self.passwords.student.clone()));
        let password_hash = hash_password(plaintext);

        let semester = self
            .semesters
            .find_by_id(draft.academic_semester)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| ApiError::not_found("Academic semester not found"))?;

        student_service::ensure_email_available(self.students.as_ref(), &draft.email).await?;
        student_service::ensure_contact_no_available(
            self.students.as_ref(),
            &draft.contact_no,
            None,
        )
        .await?;

        let external_id = self
            .retry_id_races("student onboarding", || {
                self.commit_student(&draft, &password_hash, &semester)
            })
            .await?;

        self.users
            .find_with_profile(&external_id)
            .await
            .map_err(map_store_error)
    }

    /// Onboard a faculty member. Mirrors [`Self::create_student`] with the
    /// role-prefixed id shape.
    pub async fn create_faculty(
        &self,
        draft: FacultyMemberDraft,
        password: Option<String>,
    ) -> Result<Option<PopulatedUser>, ApiError> {
        let plaintext =
            Zeroizing::new(password.unwrap_or_else(|| self.passwords.faculty.clone()));
        let password_hash = hash_password(plaintext);

        faculty_member_service::ensure_email_available(self.faculty_members.as_ref(), &draft.email)
            .await?;
        faculty_member_service::ensure_contact_no_available(
            self.faculty_members.as_ref(),
            &draft.contact_no,
            None,
        )
        .await?;

        let external_id = self
            .retry_id_races("faculty onboarding", || {
                self.commit_faculty(&draft, &password_hash)
            })
            .await?;

        self.users
            .find_with_profile(&external_id)
            .await
            .map_err(map_store_error)
    }

    /// Run one transactional attempt, retrying on a duplicate external id.
    async fn retry_id_races<F, Fut>(
        &self,
        context: &'static str,
        mut attempt: F,
    ) -> Result<String, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, AttemptError>>,
    {
        let mut tries = 1;
        loop {
            match attempt().await {
                Ok(external_id) => return Ok(external_id),
                Err(AttemptError::Store(err))
                    if err.is_duplicate_of("id") && tries < MAX_ID_ATTEMPTS =>
                {
                    warn!(error = %err, context, attempt = tries, "lost id race, retrying");
                    tries += 1;
                }
                Err(AttemptError::Store(err)) => return Err(map_store_error(err)),
                Err(AttemptError::Api(err)) => return Err(err),
            }
        }
    }

    async fn commit_student(
        &self,
        draft: &StudentDraft,
        password_hash: &str,
        semester: &AcademicSemester,
    ) -> Result<String, AttemptError> {
        let mut txn = self.store.begin().await?;
        match self
            .write_student(txn.as_mut(), draft, password_hash, semester)
            .await
        {
            Ok(external_id) => {
                txn.commit().await?;
                Ok(external_id)
            }
            Err(err) => {
                abort_quietly(txn, "student onboarding").await;
                Err(err)
            }
        }
    }

    async fn write_student(
        &self,
        txn: &mut dyn StoreTransaction,
        draft: &StudentDraft,
        password_hash: &str,
        semester: &AcademicSemester,
    ) -> Result<String, AttemptError> {
        let last = self.users.find_last_external_id(Role::Student).await?;
        let external_id =
            ids::next_student_id(last.as_deref(), semester).map_err(map_id_error)?;

        let student = draft.materialise(external_id.clone());
        if txn.insert_student(&student).await? == 0 {
            return Err(ApiError::bad_request("Failed to create student").into());
        }

        let user = User {
            record_id: Uuid::new_v4(),
            id: external_id.clone(),
            role: Role::Student,
            password_hash: password_hash.to_owned(),
            student: Some(student.profile.record_id),
            faculty: None,
            created_at: Utc::now(),
        };
        if txn.insert_user(&user).await? == 0 {
            return Err(ApiError::bad_request("Failed to create user").into());
        }

        Ok(external_id)
    }

    async fn commit_faculty(
        &self,
        draft: &FacultyMemberDraft,
        password_hash: &str,
    ) -> Result<String, AttemptError> {
        let mut txn = self.store.begin().await?;
        match self.write_faculty(txn.as_mut(), draft, password_hash).await {
            Ok(external_id) => {
                txn.commit().await?;
                Ok(external_id)
            }
            Err(err) => {
                abort_quietly(txn, "faculty onboarding").await;
                Err(err)
            }
        }
    }

    async fn write_faculty(
        &self,
        txn: &mut dyn StoreTransaction,
        draft: &FacultyMemberDraft,
        password_hash: &str,
    ) -> Result<String, AttemptError> {
        let last = self.users.find_last_external_id(Role::Faculty).await?;
        let external_id =
            ids::next_role_id(Role::Faculty, last.as_deref()).map_err(map_id_error)?;

        let member = draft.materialise(external_id.clone());
        if txn.insert_faculty_member(&member).await? == 0 {
            return Err(ApiError::bad_request("Failed to create faculty").into());
        }

        let user = User {
            record_id: Uuid::new_v4(),
            id: external_id.clone(),
            role: Role::Faculty,
            password_hash: password_hash.to_owned(),
            student: None,
            faculty: Some(member.profile.record_id),
            created_at: Utc::now(),
        };
        if txn.insert_user(&user).await? == 0 {
            return Err(ApiError::bad_request("Failed to create user").into());
        }

        Ok(external_id)
    }
}
