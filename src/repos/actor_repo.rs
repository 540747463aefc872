/*
 * Responsibility
 * - actors テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct ActorRow {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

pub async fn list(db: &PgPool) -> Result<Vec<ActorRow>, RepoError> {
    let rows = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, gender, date_of_birth
        FROM actors
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, actor_id: i32) -> Result<Option<ActorRow>, RepoError> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, gender, date_of_birth
        FROM actors
        WHERE id = $1
        "#,
    )
    .bind(actor_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    gender: &str,
    date_of_birth: NaiveDate,
) -> Result<ActorRow, RepoError> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        INSERT INTO actors (name, gender, date_of_birth)
        VALUES ($1, $2, $3)
        RETURNING id, name, gender, date_of_birth
        "#,
    )
    .bind(name)
    .bind(gender)
    .bind(date_of_birth)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    actor_id: i32,
    name: Option<&str>,
    gender: Option<&str>,
    date_of_birth: Option<NaiveDate>,
) -> Result<Option<ActorRow>, RepoError> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        UPDATE actors
        SET
            name = COALESCE($2, name),
            gender = COALESCE($3, gender),
            date_of_birth = COALESCE($4, date_of_birth)
        WHERE id = $1
        RETURNING id, name, gender, date_of_birth
        "#,
    )
    .bind(actor_id)
    .bind(name)
    .bind(gender)
    .bind(date_of_birth)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, actor_id: i32) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM actors
        WHERE id = $1
        "#,
    )
    .bind(actor_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
