use crate::contract::model::{NewUser, SortOrder, User};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by the persistence port.
#[derive(Error, Debug)]
pub enum RepoError {
    /// A unique constraint rejected the write (active email taken).
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The targeted row no longer exists or is inactive.
    #[error("row not found")]
    NotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Every method only ever sees active users.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Persist a new user. The store assigns the id and both timestamps.
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError>;
    /// Load an active user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    /// Check uniqueness by email among active users.
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;
    /// One page of active users plus the total active count.
    async fn find_all(
        &self,
        page: u64,
        size: u64,
        sort: &[SortOrder],
    ) -> Result<(Vec<User>, u64), RepoError>;
    /// Rewrite the row identified by `user.id`, refreshing `updated_at`.
    async fn update(&self, user: User) -> Result<User, RepoError>;
    /// Mark the user inactive. A row that is already inactive is left alone.
    async fn soft_delete(&self, user: &User) -> Result<(), RepoError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// A repository bound to one open transaction.
///
/// Dropping it without `commit` rolls the work back.
#[async_trait]
pub trait UsersTransaction: UsersRepository {
    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}

/// Entry point of the persistence port: hands out transactional repositories.
#[async_trait]
pub trait UsersStore: Send + Sync {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn UsersTransaction>, RepoError>;
}
