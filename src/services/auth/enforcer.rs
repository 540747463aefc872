use crate::services::auth::{AuthError, TokenClaims};

/// Decide whether verified claims satisfy one required permission.
///
/// Exact string match only. A token without a permissions claim is
/// distinguished from a token whose set simply lacks the permission: the
/// former cannot carry permissions at all.
pub fn ensure_permission(claims: &TokenClaims, required: &str) -> Result<(), AuthError> {
    let Some(permissions) = &claims.permissions else {
        return Err(AuthError::PermissionsClaimMissing);
    };

    if permissions.contains(required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
