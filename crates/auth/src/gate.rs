//! Role gate: per-operation allowed-roles check.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)

use mediscribe_core::{Role, User};

use crate::error::AuthError;

/// Pass `user` through unchanged if its role is in the operation's allowed
/// set, otherwise reject with [`AuthError::Forbidden`].
///
/// `allowed` is static per-operation configuration declared at the call
/// site (e.g. a route table), not runtime data. Because [`Role`] is a
/// closed enum, an out-of-vocabulary role name cannot reach this function —
/// it is rejected where strings enter the domain, at the store read
/// boundary. The `Forbidden` payload names the actual role and the allowed
/// set for logging; the client response stays generic.
pub fn authorize<'a>(user: &'a User, allowed: &[Role]) -> Result<&'a User, AuthError> {
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        let allowed: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        Err(AuthError::Forbidden(format!(
            "role '{}' not permitted, allowed: {:?}",
            user.role, allowed
        )))
    }
}
