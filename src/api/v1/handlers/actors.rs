/*
 * Responsibility
 * - /actors 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → repo 呼び出し
 * - 認可は guard 済み。handler は再検証しない
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::actors::{
        ActorDetail, ActorShort, CreateActorRequest, UpdateActorRequest, format_date_of_birth,
    },
    error::AppError,
    repos::actor_repo,
    state::AppState,
};

pub async fn list_actors(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActorShort>>, AppError> {
    let rows = actor_repo::list(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|a| ActorShort {
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(Json(res))
}

pub async fn get_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<i32>,
) -> Result<Json<ActorDetail>, AppError> {
    let row = actor_repo::get(&state.db, actor_id)
        .await?
        .ok_or(AppError::not_found("actor"))?;

    Ok(Json(ActorDetail {
        name: row.name,
        gender: row.gender,
        date_of_birth: format_date_of_birth(row.date_of_birth),
    }))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Json(req): Json<CreateActorRequest>,
) -> Result<(StatusCode, Json<ActorDetail>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("invalid_actor", msg))?;

    let row = actor_repo::create(&state.db, &req.name, &req.gender, req.date_of_birth).await?;

    Ok((
        StatusCode::CREATED,
        Json(ActorDetail {
            name: row.name,
            gender: row.gender,
            date_of_birth: format_date_of_birth(row.date_of_birth),
        }),
    ))
}

pub async fn update_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<i32>,
    Json(req): Json<UpdateActorRequest>,
) -> Result<Json<ActorDetail>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("invalid_actor", msg))?;

    let row = actor_repo::update(
        &state.db,
        actor_id,
        req.name.as_deref(),
        req.gender.as_deref(),
        req.date_of_birth,
    )
    .await?
    .ok_or(AppError::not_found("actor"))?;

    Ok(Json(ActorDetail {
        name: row.name,
        gender: row.gender,
        date_of_birth: format_date_of_birth(row.date_of_birth),
    }))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let deleted = actor_repo::delete(&state.db, actor_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("actor"))
    }
}
