/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<TokenVerifier>) -> Self {
        Self { db, auth }
    }
}
