use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Pure user model for inter-module communication (no serde).
///
/// Only active users are ever handed out; deleted rows never leave the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(
        custom(function = "crate::domain::validation::first_name_present"),
        length(max = 100, message = "First name must not exceed 100 characters")
    )]
    pub first_name: String,
    #[validate(custom(function = "crate::domain::validation::last_name_present"))]
    pub last_name: String,
    #[validate(custom(function = "crate::domain::validation::email_required"))]
    pub email: String,
    #[validate(regex(
        path = *crate::domain::validation::PHONE_NUMBER,
        message = "Phone number must be valid"
    ))]
    pub phone_number: Option<String>,
}

/// Partial update data for a user. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
pub struct UserPatch {
    #[validate(length(max = 100, message = "First name must not exceed 100 characters"))]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(custom(function = "crate::domain::validation::email_format"))]
    pub email: Option<String>,
    #[validate(regex(
        path = *crate::domain::validation::PHONE_NUMBER,
        message = "Phone number must be valid"
    ))]
    pub phone_number: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }
}

/// Properties a user listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    LastName,
    Email,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = String;

    /// Accepts the wire (camelCase) property names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(Self::FirstName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(format!("Unknown sort property '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(format!("Unknown sort direction '{s}'"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Offset pagination request. `page` is 0-based; `size: None` means the configured default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: u64,
    pub size: Option<u64>,
    pub sort: Vec<SortOrder>,
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page.saturating_add(1) >= self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}
