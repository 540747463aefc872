/*
 * Responsibility
 * - /movies 系 CRUD handler
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::movies::{CreateMovieRequest, MovieDetail, MovieShort, UpdateMovieRequest},
    error::AppError,
    repos::movie_repo,
    state::AppState,
};

pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieShort>>, AppError> {
    let rows = movie_repo::list(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|m| MovieShort {
            id: m.id,
            title: m.title,
            release_date: m.release_date,
        })
        .collect();

    Ok(Json(res))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<MovieDetail>, AppError> {
    let row = movie_repo::get(&state.db, movie_id)
        .await?
        .ok_or(AppError::not_found("movie"))?;
    let cast = movie_repo::cast(&state.db, movie_id).await?;

    Ok(Json(MovieDetail {
        title: row.title,
        release_date: row.release_date,
        cast,
    }))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(req): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieDetail>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("invalid_movie", msg))?;

    let row = movie_repo::create(&state.db, &req.title, req.release_date).await?;

    Ok((
        StatusCode::CREATED,
        Json(MovieDetail {
            title: row.title,
            release_date: row.release_date,
            cast: Vec::new(),
        }),
    ))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Json(req): Json<UpdateMovieRequest>,
) -> Result<Json<MovieDetail>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("invalid_movie", msg))?;

    let row = movie_repo::update(&state.db, movie_id, req.title.as_deref(), req.release_date)
        .await?
        .ok_or(AppError::not_found("movie"))?;
    let cast = movie_repo::cast(&state.db, movie_id).await?;

    Ok(Json(MovieDetail {
        title: row.title,
        release_date: row.release_date,
        cast,
    }))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let deleted = movie_repo::delete(&state.db, movie_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("movie"))
    }
}
