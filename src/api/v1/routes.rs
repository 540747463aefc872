/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 保護された operation は require_permission で 1 permission ずつ wrap する
 */
use axum::{Router, routing::MethodFilter, routing::get};

use crate::middleware::require_permission::require_permission;
use crate::state::AppState;

use crate::api::v1::handlers::{
    actors::{create_actor, delete_actor, get_actor, list_actors, update_actor},
    health::health,
    movies::{create_movie, delete_movie, get_movie, list_movies, update_movie},
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = &state.auth;

    Router::new()
        .route("/health", get(health))
        .route(
            "/actors",
            require_permission(auth.clone(), "get:actors", MethodFilter::GET, list_actors)
                .merge(require_permission(
                    auth.clone(),
                    "post:actors",
                    MethodFilter::POST,
                    create_actor,
                )),
        )
        .route(
            "/actors/{actor_id}",
            require_permission(
                auth.clone(),
                "get:actor-detail",
                MethodFilter::GET,
                get_actor,
            )
            .merge(require_permission(
                auth.clone(),
                "patch:actors",
                MethodFilter::PATCH,
                update_actor,
            ))
            .merge(require_permission(
                auth.clone(),
                "delete:actors",
                MethodFilter::DELETE,
                delete_actor,
            )),
        )
        .route(
            "/movies",
            require_permission(auth.clone(), "get:movies", MethodFilter::GET, list_movies)
                .merge(require_permission(
                    auth.clone(),
                    "post:movies",
                    MethodFilter::POST,
                    create_movie,
                )),
        )
        .route(
            "/movies/{movie_id}",
            require_permission(
                auth.clone(),
                "get:movie-detail",
                MethodFilter::GET,
                get_movie,
            )
            .merge(require_permission(
                auth.clone(),
                "patch:movies",
                MethodFilter::PATCH,
                update_movie,
            ))
            .merge(require_permission(
                auth.clone(),
                "delete:movies",
                MethodFilter::DELETE,
                delete_movie,
            )),
        )
}
