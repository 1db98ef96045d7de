//! Transactional store port.
//!
//! Multi-document writes (onboarding, cascading profile deletion) run through
//! a transaction obtained from this port: begin, apply writes, then commit or
//! abort. An aborted or dropped transaction must leave zero partial writes
//! visible to other readers.

use async_trait::async_trait;

use crate::domain::faculty_member::FacultyMember;
use crate::domain::student::Student;
use crate::domain::user::User;

/// Failures raised by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected a write.
    #[error("duplicate key '{key}' = '{value}' in {collection}")]
    DuplicateKey {
        /// Collection that rejected the write.
        collection: &'static str,
        /// Natural-key field name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
    /// A read or write failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl StoreError {
    /// Query failure with a message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Whether the failure is a duplicate on the given key.
    #[must_use]
    pub fn is_duplicate_of(&self, expected_key: &str) -> bool {
        matches!(self, Self::DuplicateKey { key, .. } if *key == expected_key)
    }
}

/// Port handing out multi-document transactions.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Open a transaction. Writers are serialised by the adapter.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;
}

/// One open multi-document transaction.
///
/// Insert operations return the number of documents written so callers can
/// treat a zero count as a creation failure, mirroring the store's bulk
/// insert contract.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Insert a student document.
    async fn insert_student(&mut self, student: &Student) -> Result<u64, StoreError>;

    /// Insert a faculty-member document.
    async fn insert_faculty_member(&mut self, member: &FacultyMember) -> Result<u64, StoreError>;

    /// Insert a credential document.
    async fn insert_user(&mut self, user: &User) -> Result<u64, StoreError>;

    /// Delete a student by external id, returning the removed document.
    async fn delete_student(&mut self, external_id: &str) -> Result<Option<Student>, StoreError>;

    /// Delete a faculty member by external id, returning the removed document.
    async fn delete_faculty_member(
        &mut self,
        external_id: &str,
    ) -> Result<Option<FacultyMember>, StoreError>;

    /// Delete a credential by external id, returning the removed count.
    async fn delete_user(&mut self, external_id: &str) -> Result<u64, StoreError>;

    /// Make all writes durable and visible.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    /// Discard all writes.
    async fn abort(self: Box<Self>) -> Result<(), StoreError>;
}
