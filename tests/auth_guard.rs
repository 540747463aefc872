//! Guard end-to-end on a database-free router: the composed
//! extract → verify → enforce pipeline in front of real axum handlers.
mod support;

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::MethodFilter,
};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::{Value, json};
use tower::ServiceExt;

use casting_agency::middleware::require_permission::require_permission;
use casting_agency::services::auth::{FixedKeys, TokenClaims, TokenVerifier};
use support::{AUDIENCE, ISSUER, KID, claims_with_permissions, primary_key, sign};

async fn whoami(Extension(claims): Extension<TokenClaims>) -> Json<Value> {
    Json(json!({ "sub": claims.subject }))
}

async fn delete_movie() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn test_router() -> Router {
    let keys = FixedKeys::new([(KID.to_string(), primary_key().decoding_key())]);
    let verifier = Arc::new(TokenVerifier::new(
        Arc::new(keys),
        ISSUER.to_string(),
        AUDIENCE.to_string(),
        Algorithm::RS256,
        0,
    ));

    Router::new()
        .route(
            "/actors",
            require_permission(verifier.clone(), "get:actors", MethodFilter::GET, whoami),
        )
        .route(
            "/movies/{movie_id}",
            require_permission(
                verifier,
                "delete:movies",
                MethodFilter::DELETE,
                delete_movie,
            ),
        )
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_header_is_401_with_generic_body() {
    let res = test_router()
        .oneshot(
            Request::builder()
                .uri("/actors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The body must not leak the internal denial reason.
    let body = body_json(res).await;
    assert_eq!(body["error"]["message"], "unauthorized");
}

#[tokio::test]
async fn wrong_scheme_is_401() {
    let res = test_router()
        .oneshot(
            Request::builder()
                .uri("/actors")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_an_authentication_failure() {
    let mut claims = claims_with_permissions(&["delete:movies"]);
    claims["exp"] = json!(jsonwebtoken::get_current_timestamp() - 60);
    let token = sign(primary_key(), KID, &claims);

    let res = test_router()
        .oneshot(
            Request::builder()
                .uri("/movies/2")
                .method("DELETE")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_permission_is_403_distinct_from_401() {
    let token = sign(primary_key(), KID, &claims_with_permissions(&["get:actors"]));

    let res = test_router()
        .oneshot(
            Request::builder()
                .uri("/movies/2")
                .method("DELETE")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = body_json(res).await;
    assert_eq!(body["error"]["message"], "forbidden");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_claims() {
    let token = sign(primary_key(), KID, &claims_with_permissions(&["get:actors"]));

    let res = test_router()
        .oneshot(
            Request::builder()
                .uri("/actors")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    // The handler sees the decoded claims, untouched by the guard.
    let body = body_json(res).await;
    assert_eq!(body["sub"], "auth0|producer");
}
