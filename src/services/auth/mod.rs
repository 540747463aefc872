/*
 * Responsibility
 * - Bearer トークンの抽出 → 検証 → 認可 (extract / verify / enforce)
 * - 公開インターフェースの re-export
 */
pub mod enforcer;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod verifier;

pub use enforcer::ensure_permission;
pub use error::AuthError;
pub use extractor::extract_bearer_token;
pub use jwks::{FixedKeys, KeyStore, RemoteJwks};
pub use verifier::{TokenClaims, TokenVerifier};
