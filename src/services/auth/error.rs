use thiserror::Error;

/// Every way a request can fail the bearer-token gate.
///
/// Flat on purpose: each variant is terminal for the current request, none is
/// retried. The variant names are for server-side logs; clients only ever see
/// the generic 401/403 bodies produced by `AppError`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    // --- extraction ---
    #[error("authorization header is missing")]
    MissingHeader,
    #[error("authorization header is not two space-separated parts")]
    MalformedHeader,
    #[error("authorization scheme is not 'Bearer'")]
    UnsupportedScheme,

    // --- verification ---
    #[error("token is not a well-formed JWT or lacks a key id")]
    InvalidHeader,
    #[error("token algorithm is not the configured trusted algorithm")]
    InvalidAlgorithm,
    #[error("no signing key matches the token key id")]
    UnknownSigningKey,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token is expired")]
    ExpiredToken,
    #[error("token issuer does not match")]
    InvalidIssuer,
    #[error("token audience does not match")]
    InvalidAudience,
    #[error("token claims are malformed")]
    InvalidClaims,

    // --- enforcement ---
    #[error("token carries no permissions claim")]
    PermissionsClaimMissing,
    #[error("token lacks the required permission")]
    PermissionDenied,
}

impl AuthError {
    /// Enforcement failures map to 403; everything else is an
    /// authentication failure and maps to 401.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            AuthError::PermissionsClaimMissing | AuthError::PermissionDenied
        )
    }
}
