use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::SimpleExpr;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique among active rows only (partial index `ux_users_email_active`).
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The soft-delete restriction. Every read, update and delete goes through it.
pub fn active() -> SimpleExpr {
    Column::IsActive.eq(true)
}

impl Entity {
    /// All active users.
    pub fn find_active() -> Select<Entity> {
        Self::find().filter(active())
    }

    /// The active user with the given id, if any.
    pub fn find_active_by_id(id: Uuid) -> Select<Entity> {
        Self::find_active().filter(Column::Id.eq(id))
    }
}
