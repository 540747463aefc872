/*
 * Responsibility
 * - 保護された operation ごとの guard (extract → verify → enforce)
 * - 成功時に TokenClaims を request extensions に載せ、handler は再検証しない
 * - 失敗理由は warn ログのみ。クライアントへは generic 401/403
 */
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    handler::Handler,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::{MethodFilter, MethodRouter, on},
};

use crate::error::AppError;
use crate::services::auth::{
    TokenClaims, TokenVerifier, ensure_permission, extract_bearer_token,
};

#[derive(Clone)]
struct PermissionGuard {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

/// Register one protected operation: the handler runs only after the bearer
/// token is extracted, verified, and found to carry `permission`.
///
/// Every protected operation declares exactly one permission, so routes with
/// different permissions per method compose via `MethodRouter::merge`.
pub fn require_permission<H, T, S>(
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
    method: MethodFilter,
    handler: H,
) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    let guard = PermissionGuard {
        verifier,
        permission,
    };

    on(
        method,
        handler.layer(middleware::from_fn_with_state(guard, check_permission)),
    )
}

async fn check_permission(
    State(guard): State<PermissionGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is present but not valid UTF-8 cannot be the mandated
    // two-part form; let the extractor classify it as malformed.
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or(""));

    let claims = authorize(&guard, header).await.map_err(|err| {
        tracing::warn!(
            permission = guard.permission,
            error = %err,
            "request denied"
        );
        AppError::from(err)
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

async fn authorize(
    guard: &PermissionGuard,
    header: Option<&str>,
) -> Result<TokenClaims, crate::services::auth::AuthError> {
    let token = extract_bearer_token(header)?;
    let claims = guard.verifier.verify(token).await?;
    ensure_permission(&claims, guard.permission)?;
    Ok(claims)
}
