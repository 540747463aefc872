/*
 * Responsibility
 * - Bearer トークンの検証パイプライン
 *   header parse → alg gate → key 解決 → 署名検証 → claim 検証 → permissions 抽出
 * - 失敗は AuthError に分類して short-circuit
 */
use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header, get_current_timestamp};
use serde::Deserialize;

use crate::services::auth::AuthError;
use crate::services::auth::jwks::KeyStore;

/// Decoded, verified claim set handed to protected operations.
///
/// `permissions` is `None` when the token carries no permissions claim at
/// all, as opposed to `Some(empty)` for a token that authorizes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub issuer: String,
    pub audience: String,
    pub subject: Option<String>,
    pub expires_at: u64,
    pub issued_at: Option<u64>,
    pub permissions: Option<HashSet<String>>,
}

// Raw payload as it comes off the wire. Everything except `exp` is optional
// here; presence/shape rules are enforced explicitly below so each violation
// maps to its own AuthError.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    aud: Option<serde_json::Value>,
    #[serde(default)]
    sub: Option<String>,
    exp: u64,
    #[serde(default)]
    nbf: Option<u64>,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    permissions: Option<serde_json::Value>,
}

/// Verifies externally issued bearer tokens against the provider's key set.
///
/// Stateless per request; the only process-wide state is inside the injected
/// `KeyStore`, so verifying the same token twice yields the same claims.
pub struct TokenVerifier {
    keys: Arc<dyn KeyStore>,
    issuer: String,
    audience: String,
    algorithm: Algorithm,
    leeway_seconds: u64,
}

impl TokenVerifier {
    pub fn new(
        keys: Arc<dyn KeyStore>,
        issuer: String,
        audience: String,
        algorithm: Algorithm,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            keys,
            issuer,
            audience,
            algorithm,
            leeway_seconds,
        }
    }

    pub async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        // 1. Token header: three segments, structured header, a key id.
        let header = decode_header(token).map_err(|_| AuthError::InvalidHeader)?;

        // 2. Exactly one trusted algorithm. Rejecting here, before any key
        //    lookup or signature work, closes the alg-confusion downgrade.
        if header.alg != self.algorithm {
            return Err(AuthError::InvalidAlgorithm);
        }

        let kid = header.kid.ok_or(AuthError::InvalidHeader)?;

        // 3. Key resolution; the store performs at most one refresh on miss.
        let key = self
            .keys
            .resolve(&kid)
            .await
            .ok_or(AuthError::UnknownSigningKey)?;

        // 4. Signature + exp. iss/aud are checked by hand in step 5 because
        //    the audience contract here is stricter than the library's
        //    (a multi-valued `aud` is rejected outright).
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;
        validation.validate_aud = false;

        let raw = decode::<RawClaims>(token, &key, &validation)
            .map_err(|e| classify_jwt_error(e.kind()))?
            .claims;

        // 5. Standard claims.
        if let Some(nbf) = raw.nbf
            && nbf > get_current_timestamp() + self.leeway_seconds
        {
            return Err(AuthError::InvalidClaims);
        }

        match raw.iss.as_deref() {
            Some(iss) if iss == self.issuer => {}
            _ => return Err(AuthError::InvalidIssuer),
        }

        let audience = match raw.aud {
            Some(serde_json::Value::String(aud)) if aud == self.audience => aud,
            Some(serde_json::Value::String(_)) | None => return Err(AuthError::InvalidAudience),
            // Multi-valued or non-string audiences have no defined contract
            // with this service; reject rather than guess a lenient parse.
            Some(_) => return Err(AuthError::InvalidClaims),
        };

        // 6. Permissions: absent is fine (authorizes nothing); present but
        //    not an array of strings is malformed.
        let permissions = match raw.permissions {
            None => None,
            Some(serde_json::Value::Array(items)) => {
                let mut set = HashSet::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::String(p) => {
                            set.insert(p);
                        }
                        _ => return Err(AuthError::InvalidClaims),
                    }
                }
                Some(set)
            }
            Some(_) => return Err(AuthError::InvalidClaims),
        };

        Ok(TokenClaims {
            issuer: self.issuer.clone(),
            audience,
            subject: raw.sub,
            expires_at: raw.exp,
            issued_at: raw.iat,
            permissions,
        })
    }
}

fn classify_jwt_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        // iss/aud/alg are checked by hand above, so what remains here is an
        // undecodable payload or a missing/meaningless registered claim.
        _ => AuthError::InvalidClaims,
    }
}
