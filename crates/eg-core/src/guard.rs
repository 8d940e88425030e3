//! # Guards
//!
//! The two identity checks every command starts with. They run before any
//! lookup so a rejected call never observes or touches store state.

use crate::error::{AppError, Result};
use crate::models::CurrentUser;

/// Requires some identity. Used by interaction commands.
pub fn require_user(user: Option<&CurrentUser>) -> Result<&CurrentUser> {
    user.ok_or(AppError::Unauthenticated)
}

/// Requires an identity carrying the admin capability.
///
/// `action` only feeds the error message (e.g., "create events").
pub fn require_admin<'a>(user: Option<&'a CurrentUser>, action: &str) -> Result<&'a CurrentUser> {
    let user = require_user(user)?;
    if !user.is_admin {
        return Err(AppError::PermissionDenied(format!("only administrators can {}", action)));
    }
    Ok(user)
}
