use std::sync::Arc;

use crate::contract::model::{NewUser, Page, PageRequest, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::mapper::{merge_patch, normalize_new_user, normalize_patch};
use crate::domain::repo::{RepoError, TxMode, UsersStore};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Domain service with business rules for user management.
/// Depends only on the store port, not on infra types.
///
/// Every operation runs inside one transaction that is committed on success
/// and rolled back (dropped) on any error.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn UsersStore>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 1000,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(store: Arc<dyn UsersStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let tx = self.store.begin(TxMode::ReadOnly).await?;
        let user = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        tx.commit().await?;

        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(
        name = "users.service.list_users",
        skip(self, request),
        fields(page = request.page, size = ?request.size)
    )]
    pub async fn list_users(&self, request: PageRequest) -> Result<Page<User>, DomainError> {
        debug!("Listing users");

        let size = request.size.unwrap_or(self.config.default_page_size);
        if size == 0 || size > self.config.max_page_size {
            return Err(DomainError::invalid_paging(format!(
                "Page size must be between 1 and {}",
                self.config.max_page_size
            )));
        }
        // SQL binds OFFSET as a signed 64-bit integer.
        let offset_in_range = request
            .page
            .checked_mul(size)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !offset_in_range {
            return Err(DomainError::invalid_paging("Page index is out of range"));
        }

        let tx = self.store.begin(TxMode::ReadOnly).await?;
        let (items, total) = tx.find_all(request.page, size, &request.sort).await?;
        tx.commit().await?;

        debug!("Successfully listed {} of {} users", items.len(), total);
        Ok(Page {
            items,
            page: request.page,
            size,
            total,
        })
    }

    #[instrument(
        name = "users.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let new_user = normalize_new_user(new_user);
        new_user.validate()?;

        let tx = self.store.begin(TxMode::ReadWrite).await?;
        if tx.exists_by_email(&new_user.email).await? {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let email = new_user.email.clone();
        let user = tx.create(new_user).await.map_err(|e| match e {
            RepoError::DuplicateKey(_) => DomainError::email_already_exists(email),
            other => other.into(),
        })?;
        tx.commit().await?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "users.service.update_user",
        skip(self, patch),
        fields(user_id = %id)
    )]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let patch = normalize_patch(patch);
        patch.validate()?;

        let tx = self.store.begin(TxMode::ReadWrite).await?;
        let mut current = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        merge_patch(patch, &mut current);
        let email = current.email.clone();
        let updated = tx.update(current).await.map_err(|e| match e {
            RepoError::DuplicateKey(_) => DomainError::email_already_exists(email),
            RepoError::NotFound => DomainError::user_not_found(id),
            other => other.into(),
        })?;
        tx.commit().await?;

        info!("Successfully updated user");
        Ok(updated)
    }

    #[instrument(
        name = "users.service.delete_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting user");

        let tx = self.store.begin(TxMode::ReadWrite).await?;
        let user = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        tx.soft_delete(&user).await?;
        tx.commit().await?;

        info!("Successfully deleted user");
        Ok(())
    }
}
