//! Shared fixtures: a throwaway RSA keypair, JWK material derived from it,
//! and signed tokens. No network, no database.
#![allow(dead_code)]

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, get_current_timestamp};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::{Value, json};

pub const ISSUER: &str = "https://casting-agency.test/";
pub const AUDIENCE: &str = "casting-agency";
pub const KID: &str = "key-1";

pub struct TestKey {
    pub encoding_key: EncodingKey,
    pub n: String,
    pub e: String,
}

impl TestKey {
    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_rsa_components(&self.n, &self.e).expect("valid rsa components")
    }

    /// JWK entry as the identity provider would publish it.
    pub fn jwk(&self, kid: &str) -> Value {
        json!({
            "kty": "RSA",
            "use": "sig",
            "alg": "RS256",
            "kid": kid,
            "n": self.n,
            "e": self.e,
        })
    }
}

fn generate() -> TestKey {
    let mut rng = rand::thread_rng();
    let private = RsaPrivateKey::new(&mut rng, 2048).expect("generate rsa key");
    let der = private.to_pkcs1_der().expect("encode rsa key");
    let public = RsaPublicKey::from(&private);

    TestKey {
        encoding_key: EncodingKey::from_rsa_der(der.as_bytes()),
        n: URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
        e: URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
    }
}

/// The key the "identity provider" signs with. Generated once per test run.
pub fn primary_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(generate)
}

/// A second keypair, never part of any trusted key set.
pub fn rogue_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(generate)
}

/// RS256 token signed with `key`, carrying whatever `kid` the test wants to
/// claim (a forged token may name a kid it was not signed with).
pub fn sign(key: &TestKey, kid: &str, claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    jsonwebtoken::encode(&header, claims, &key.encoding_key).expect("sign token")
}

/// Symmetric token, for the algorithm-downgrade cases.
pub fn sign_hs256(kid: &str, claims: &Value) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(kid.to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(b"attacker-secret"))
        .expect("sign token")
}

/// Valid-for-ten-minutes claim set without a permissions claim.
pub fn base_claims() -> Value {
    let now = get_current_timestamp();
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": "auth0|producer",
        "iat": now,
        "exp": now + 600,
    })
}

pub fn claims_with_permissions(permissions: &[&str]) -> Value {
    let mut claims = base_claims();
    claims["permissions"] = json!(permissions);
    claims
}
