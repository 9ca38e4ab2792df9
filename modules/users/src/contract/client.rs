use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::UsersError,
    model::{NewUser, Page, PageRequest, User, UserPatch},
};

/// Public API trait for the users module that other modules can use
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Get an active user by ID
    async fn get_user(&self, id: Uuid) -> Result<User, UsersError>;

    /// List active users, one page at a time
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UsersError>;

    /// Create a new user
    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError>;

    /// Update a user with partial data
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersError>;

    /// Soft-delete a user by ID
    async fn delete_user(&self, id: Uuid) -> Result<(), UsersError>;
}
