pub mod client;
pub mod error;
pub mod model;

pub use client::UsersApi;
pub use error::UsersError;
pub use model::{NewUser, Page, PageRequest, SortDirection, SortField, SortOrder, User, UserPatch};
