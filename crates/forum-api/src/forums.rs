use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use forum_types::api::{ForumCreate, Forums, NoData};
use forum_types::models::Forum;

use crate::error::ApiError;
use crate::extract::{ForumIdPath, ForumPath, ValidJson};
use crate::state::{AppState, run_db};

pub async fn list_forums(State(state): State<AppState>) -> Result<Json<Forums>, ApiError> {
    let rows = run_db(&state, |db| Ok(db.list_forums()?)).await?;

    Ok(Json(Forums {
        forums: rows.into_iter().map(Forum::from).collect(),
    }))
}

pub async fn create_forum(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ForumCreate>,
) -> Result<(StatusCode, Json<Forum>), ApiError> {
    let row = run_db(&state, move |db| Ok(db.create_forum(&req.title, &req.content)?)).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_forum(
    State(state): State<AppState>,
    WithRejection(Path(ForumPath { forum_id }), _): ForumIdPath,
) -> Result<Json<Forum>, ApiError> {
    let row = run_db(&state, move |db| {
        db.get_forum(forum_id)?.ok_or_else(ApiError::forum_not_found)
    })
    .await?;

    Ok(Json(row.into()))
}

pub async fn update_forum(
    State(state): State<AppState>,
    WithRejection(Path(ForumPath { forum_id }), _): ForumIdPath,
    ValidJson(req): ValidJson<ForumCreate>,
) -> Result<Json<Forum>, ApiError> {
    let row = run_db(&state, move |db| {
        db.update_forum(forum_id, &req.title, &req.content)?
            .ok_or_else(ApiError::forum_not_found)
    })
    .await?;

    Ok(Json(row.into()))
}

/// Deletes the forum together with all of its comments.
pub async fn delete_forum(
    State(state): State<AppState>,
    WithRejection(Path(ForumPath { forum_id }), _): ForumIdPath,
) -> Result<Json<NoData>, ApiError> {
    run_db(&state, move |db| {
        if db.delete_forum(forum_id)? {
            Ok(())
        } else {
            Err(ApiError::forum_not_found())
        }
    })
    .await?;

    Ok(Json(NoData {}))
}
