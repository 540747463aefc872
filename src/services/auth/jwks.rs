/*
 * Responsibility
 * - kid -> 公開鍵 の解決 (KeyStore trait)
 * - RemoteJwks: IdP の JWKS endpoint から lazy に取得してキャッシュ
 * - FixedKeys: テスト用の固定鍵セット (ネットワーク無し)
 */
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tracing::{debug, warn};

/// Source of verification keys, keyed by `kid`.
///
/// Injected into the verifier so tests can substitute a fixed key set
/// without any network access.
#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn resolve(&self, kid: &str) -> Option<DecodingKey>;
}

#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

// Only the fields needed to build an RSA decoding key. Entries of other key
// types are skipped rather than rejected, per the JWKS contract.
#[derive(Debug, Deserialize)]
struct Jwk {
    #[serde(default)]
    kid: Option<String>,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// Process-wide cache of the identity provider's published key set.
///
/// Lazily populated; refreshed when a token references an unknown `kid`, at
/// most once per `min_refresh_interval` so unknown-kid spam cannot amplify
/// outbound calls. Concurrent misses may race to refresh; the overwrite is
/// idempotent (a key set is immutable per version), so no refresh
/// serialization is needed. A failed fetch leaves the current cache intact.
pub struct RemoteJwks {
    jwks_url: String,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
    last_refresh: Mutex<Option<Instant>>,
    min_refresh_interval: Duration,
}

impl RemoteJwks {
    pub fn new(
        jwks_url: String,
        timeout: Duration,
        min_refresh_interval: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            jwks_url,
            http,
            keys: RwLock::new(HashMap::new()),
            last_refresh: Mutex::new(None),
            min_refresh_interval,
        })
    }

    fn lookup(&self, kid: &str) -> Option<DecodingKey> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kid)
            .cloned()
    }

    // Claim the right to refresh. Returns false while a previous refresh is
    // still within the minimum interval.
    fn begin_refresh(&self) -> bool {
        let mut last = self
            .last_refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match *last {
            Some(at) if at.elapsed() < self.min_refresh_interval => false,
            _ => {
                *last = Some(Instant::now());
                true
            }
        }
    }

    async fn refresh(&self) {
        let doc: JwksDocument = match self.fetch().await {
            Ok(doc) => doc,
            Err(e) => {
                // The current cache stays as-is; the requesting verification
                // fails closed with UnknownSigningKey.
                warn!(url = %self.jwks_url, error = %e, "JWKS refresh failed");
                return;
            }
        };

        let mut fresh: HashMap<String, DecodingKey> = HashMap::new();
        for jwk in doc.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            let (Some(kid), Some(n), Some(e)) = (jwk.kid, jwk.n, jwk.e) else {
                continue;
            };
            match DecodingKey::from_rsa_components(&n, &e) {
                Ok(key) => {
                    fresh.insert(kid, key);
                }
                Err(e) => warn!(kid = %kid, error = %e, "skipping unusable JWKS entry"),
            }
        }

        debug!(url = %self.jwks_url, keys = fresh.len(), "JWKS refreshed");
        *self.keys.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    async fn fetch(&self) -> Result<JwksDocument, reqwest::Error> {
        self.http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwksDocument>()
            .await
    }
}

#[async_trait]
impl KeyStore for RemoteJwks {
    async fn resolve(&self, kid: &str) -> Option<DecodingKey> {
        if let Some(key) = self.lookup(kid) {
            return Some(key);
        }

        // Cache miss: tolerate key rotation with a single rate-limited
        // refresh, then retry the lookup exactly once.
        if self.begin_refresh() {
            self.refresh().await;
        }

        self.lookup(kid)
    }
}

/// Fixed key set for unit and integration tests.
pub struct FixedKeys {
    keys: HashMap<String, DecodingKey>,
}

impl FixedKeys {
    pub fn new(keys: impl IntoIterator<Item = (String, DecodingKey)>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

#[async_trait]
impl KeyStore for FixedKeys {
    async fn resolve(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.get(kid).cloned()
    }
}
