//! RemoteJwks cache behavior against a local stand-in for the identity
//! provider: refresh on miss, bounded refresh rate, fail-closed on outage.
mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{Json, Router, routing::get};
use jsonwebtoken::Algorithm;
use serde_json::{Value, json};

use casting_agency::services::auth::{
    AuthError, KeyStore, RemoteJwks, TokenVerifier,
};
use support::{AUDIENCE, ISSUER, KID, claims_with_permissions, primary_key, sign};

/// Serve `doc` as the JWKS document, counting fetches.
async fn serve_jwks(doc: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/.well-known/jwks.json",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/.well-known/jwks.json"), hits)
}

fn jwks_doc() -> Value {
    json!({ "keys": [primary_key().jwk(KID)] })
}

#[tokio::test]
async fn miss_refreshes_once_then_serves_from_cache() {
    let (url, hits) = serve_jwks(jwks_doc()).await;
    let jwks = RemoteJwks::new(url, Duration::from_secs(1), Duration::ZERO).unwrap();

    // Cold cache: one fetch populates it.
    assert!(jwks.resolve(KID).await.is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Warm cache: no further fetch.
    assert!(jwks.resolve(KID).await.is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_kid_triggers_exactly_one_refresh_per_lookup() {
    let (url, hits) = serve_jwks(jwks_doc()).await;
    let jwks = RemoteJwks::new(url, Duration::from_secs(1), Duration::ZERO).unwrap();

    assert!(jwks.resolve("key-nobody-has").await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // With no minimum interval, the next lookup may refresh again, but
    // still only once.
    assert!(jwks.resolve("key-nobody-has").await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn refresh_rate_is_bounded_by_the_minimum_interval() {
    let (url, hits) = serve_jwks(jwks_doc()).await;
    let jwks = RemoteJwks::new(url, Duration::from_secs(1), Duration::from_secs(3600)).unwrap();

    assert!(jwks.resolve(KID).await.is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Unknown-kid spam inside the interval must not reach the provider.
    for _ in 0..5 {
        assert!(jwks.resolve("key-nobody-has").await.is_none());
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_provider_fails_closed_as_unknown_signing_key() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let jwks = RemoteJwks::new(
        format!("http://{addr}/.well-known/jwks.json"),
        Duration::from_secs(1),
        Duration::ZERO,
    )
    .unwrap();

    let verifier = TokenVerifier::new(
        Arc::new(jwks),
        ISSUER.to_string(),
        AUDIENCE.to_string(),
        Algorithm::RS256,
        0,
    );

    let token = sign(primary_key(), KID, &claims_with_permissions(&["get:actors"]));
    assert_eq!(
        verifier.verify(&token).await,
        Err(AuthError::UnknownSigningKey)
    );
}
