use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::rest::error::ApiError;
use crate::contract::model::{
    NewUser, Page, PageRequest, SortDirection, SortField, SortOrder, User, UserPatch,
};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user.
///
/// Missing or `null` strings become empty so they surface as field validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// REST DTO for one page of users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageDto {
    pub content: Vec<UserDto>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            phone_number: req.phone_number,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
        }
    }
}

impl From<Page<User>> for UserPageDto {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserDto::from);
        Self {
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            page: page.page,
            size: page.size,
            total_elements: page.total,
            content: page.items,
        }
    }
}

/// Build a `PageRequest` from raw `page`, `size` and `sort` query pairs.
///
/// `sort` follows the `property[,property...][,asc|desc]` form and may repeat;
/// a trailing direction applies to every property of that parameter.
/// Unknown parameters are ignored.
pub fn parse_list_params(params: &[(String, String)]) -> Result<PageRequest, ApiError> {
    let mut request = PageRequest::default();
    for (key, value) in params {
        match key.as_str() {
            "page" => {
                request.page = value.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid page index '{value}'"))
                })?;
            }
            "size" => {
                let size = value.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid page size '{value}'"))
                })?;
                request.size = Some(size);
            }
            "sort" => request.sort.extend(parse_sort(value)?),
            _ => {}
        }
    }
    Ok(request)
}

fn parse_sort(value: &str) -> Result<Vec<SortOrder>, ApiError> {
    let mut tokens: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let direction = match tokens.last().map(|t| t.parse::<SortDirection>()) {
        Some(Ok(direction)) => {
            tokens.pop();
            direction
        }
        _ => SortDirection::Asc,
    };

    tokens
        .into_iter()
        .map(|token| {
            let field = token.parse::<SortField>().map_err(ApiError::BadRequest)?;
            Ok(SortOrder { field, direction })
        })
        .collect()
}
