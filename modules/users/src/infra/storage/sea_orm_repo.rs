//! SeaORM-backed implementation of the persistence port.
//!
//! `SeaOrmUsersRepository` is generic over `C: ConnectionTrait`, so it runs
//! against a plain `DatabaseConnection` or an open `DatabaseTransaction`.
//! The service only ever sees the transactional flavor, handed out by
//! `SeaOrmUsersStore::begin`.

use anyhow::Context;
use chrono::{SubsecRound, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::contract::model::{NewUser, SortDirection, SortField, SortOrder, User};
use crate::domain::repo::{RepoError, TxMode, UsersRepository, UsersStore, UsersTransaction};
use crate::infra::storage::entity::{active, ActiveModel as UserAM, Column, Entity as UserEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Unique violations become `DuplicateKey`; everything else keeps its context.
fn map_db_err(err: DbErr, what: &'static str) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::DuplicateKey(detail);
    }
    RepoError::Other(anyhow::Error::new(err).context(what))
}

fn sort_column(field: SortField) -> Column {
    match field {
        SortField::FirstName => Column::FirstName,
        SortField::LastName => Column::LastName,
        SortField::Email => Column::Email,
        SortField::CreatedAt => Column::CreatedAt,
        SortField::UpdatedAt => Column::UpdatedAt,
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        // Stored precision is microseconds on every backend.
        let now = Utc::now().trunc_subsecs(6);
        let m = UserAM {
            id: Set(Uuid::now_v7()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            phone_number: Set(new_user.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
            is_active: Set(true),
        };
        let model = m
            .insert(&self.conn)
            .await
            .map_err(|e| map_db_err(e, "create failed"))?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let found = UserEntity::find_active_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find_active()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("exists_by_email failed")?;
        Ok(count > 0)
    }

    async fn find_all(
        &self,
        page: u64,
        size: u64,
        sort: &[SortOrder],
    ) -> Result<(Vec<User>, u64), RepoError> {
        let total = UserEntity::find_active()
            .count(&self.conn)
            .await
            .context("count failed")?;

        let mut query = UserEntity::find_active();
        for order in sort {
            let direction = match order.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = query.order_by(sort_column(order.field), direction);
        }
        // v7 ids are time-ordered, which keeps unsorted listings in creation order.
        query = query.order_by_asc(Column::Id);

        let rows = query
            .offset(page.saturating_mul(size))
            .limit(size)
            .all(&self.conn)
            .await
            .context("find_all failed")?;
        debug!(page, size, total, returned = rows.len(), "users page loaded");
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let now = Utc::now().trunc_subsecs(6);
        let m = UserAM {
            id: NotSet,
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            created_at: NotSet,
            updated_at: Set(now),
            is_active: NotSet,
        };
        let res = UserEntity::update_many()
            .set(m)
            .filter(Column::Id.eq(user.id))
            .filter(active())
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err(e, "update failed"))?;

        if res.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(User {
            updated_at: now,
            ..user
        })
    }

    async fn soft_delete(&self, user: &User) -> Result<(), RepoError> {
        let m = UserAM {
            is_active: Set(false),
            updated_at: Set(Utc::now().trunc_subsecs(6)),
            ..Default::default()
        };
        let res = UserEntity::update_many()
            .set(m)
            .filter(Column::Id.eq(user.id))
            .filter(active())
            .exec(&self.conn)
            .await
            .context("soft_delete failed")?;
        debug!(user_id = %user.id, rows = res.rows_affected, "soft delete applied");
        Ok(())
    }
}

#[async_trait::async_trait]
impl UsersTransaction for SeaOrmUsersRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let this = *self;
        this.conn.commit().await.context("commit failed")?;
        Ok(())
    }
}

/// Store over a pooled connection; each `begin` opens a fresh transaction.
#[derive(Clone)]
pub struct SeaOrmUsersStore {
    db: DatabaseConnection,
}

impl SeaOrmUsersStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UsersStore for SeaOrmUsersStore {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn UsersTransaction>, RepoError> {
        let supports_access_mode = matches!(
            self.db.get_database_backend(),
            DbBackend::Postgres | DbBackend::MySql
        );
        let tx = match mode {
            TxMode::ReadOnly if supports_access_mode => {
                self.db
                    .begin_with_config(None, Some(AccessMode::ReadOnly))
                    .await
            }
            _ => self.db.begin().await,
        }
        .context("begin transaction failed")?;
        Ok(Box::new(SeaOrmUsersRepository::new(tx)))
    }
}
