/*
 * Responsibility
 * - 起動時のスキーマ bootstrap (CREATE TABLE IF NOT EXISTS)
 * - DB_RESET=true なら drop してから作り直す (使い捨て環境用)
 */
use sqlx::PgPool;

use crate::repos::error::RepoError;

pub async fn init(db: &PgPool, reset: bool) -> Result<(), RepoError> {
    if reset {
        for stmt in [
            "DROP TABLE IF EXISTS actor_of_movie",
            "DROP TABLE IF EXISTS movies",
            "DROP TABLE IF EXISTS actors",
        ] {
            sqlx::query(stmt).execute(db).await?;
        }
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS actors (
            id            SERIAL PRIMARY KEY,
            name          VARCHAR(512) NOT NULL,
            gender        VARCHAR(10) NOT NULL,
            date_of_birth DATE NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id           SERIAL PRIMARY KEY,
            title        TEXT NOT NULL,
            release_date DATE NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS actor_of_movie (
            actor_id INTEGER NOT NULL REFERENCES actors (id) ON DELETE CASCADE,
            movie_id INTEGER NOT NULL REFERENCES movies (id) ON DELETE CASCADE,
            PRIMARY KEY (actor_id, movie_id)
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}
