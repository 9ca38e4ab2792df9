//! Input normalization and the partial-update merge.

use crate::contract::model::{NewUser, User, UserPatch};

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Canonical form of a create request: email normalized, blank phone dropped.
pub fn normalize_new_user(new_user: NewUser) -> NewUser {
    NewUser {
        email: normalize_email(&new_user.email),
        phone_number: non_blank(new_user.phone_number).map(|p| p.trim().to_string()),
        ..new_user
    }
}

/// Canonical form of a patch: blank values become absent, email is normalized.
pub fn normalize_patch(patch: UserPatch) -> UserPatch {
    UserPatch {
        first_name: non_blank(patch.first_name),
        last_name: non_blank(patch.last_name),
        email: non_blank(patch.email).map(|e| normalize_email(&e)),
        phone_number: non_blank(patch.phone_number).map(|p| p.trim().to_string()),
    }
}

/// Copy every present field of `patch` onto `user`. Absent fields are kept.
pub fn merge_patch(patch: UserPatch, user: &mut User) {
    if let Some(first_name) = patch.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = patch.email {
        user.email = email;
    }
    if let Some(phone_number) = patch.phone_number {
        user.phone_number = Some(phone_number);
    }
}
