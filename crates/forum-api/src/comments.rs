use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use forum_db::Database;
use forum_types::api::{CommentCreate, Comments, NoData};
use forum_types::models::Comment;

use crate::error::ApiError;
use crate::extract::{CommentIdPath, CommentPath, ForumIdPath, ForumPath, ValidJson};
use crate::state::{AppState, run_db};

/// Every comment route 404s on a missing forum before touching comments.
fn require_forum(db: &Database, forum_id: i64) -> Result<(), ApiError> {
    if db.forum_exists(forum_id)? {
        Ok(())
    } else {
        Err(ApiError::forum_not_found())
    }
}

pub async fn list_comments(
    State(state): State<AppState>,
    WithRejection(Path(ForumPath { forum_id }), _): ForumIdPath,
) -> Result<Json<Comments>, ApiError> {
    let rows = run_db(&state, move |db| {
        require_forum(db, forum_id)?;
        Ok(db.list_comments(forum_id)?)
    })
    .await?;

    Ok(Json(Comments {
        comments: rows.into_iter().map(Comment::from).collect(),
    }))
}

pub async fn create_comment(
    State(state): State<AppState>,
    WithRejection(Path(ForumPath { forum_id }), _): ForumIdPath,
    ValidJson(req): ValidJson<CommentCreate>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let row = run_db(&state, move |db| {
        require_forum(db, forum_id)?;
        Ok(db.create_comment(forum_id, &req.comment)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_comment(
    State(state): State<AppState>,
    WithRejection(Path(CommentPath { forum_id, comment_id }), _): CommentIdPath,
) -> Result<Json<Comment>, ApiError> {
    let row = run_db(&state, move |db| {
        require_forum(db, forum_id)?;
        db.get_comment(forum_id, comment_id)?
            .ok_or_else(ApiError::comment_not_found)
    })
    .await?;

    Ok(Json(row.into()))
}

pub async fn update_comment(
    State(state): State<AppState>,
    WithRejection(Path(CommentPath { forum_id, comment_id }), _): CommentIdPath,
    ValidJson(req): ValidJson<CommentCreate>,
) -> Result<Json<Comment>, ApiError> {
    let row = run_db(&state, move |db| {
        require_forum(db, forum_id)?;
        db.update_comment(forum_id, comment_id, &req.comment)?
            .ok_or_else(ApiError::comment_not_found)
    })
    .await?;

    Ok(Json(row.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    WithRejection(Path(CommentPath { forum_id, comment_id }), _): CommentIdPath,
) -> Result<Json<NoData>, ApiError> {
    run_db(&state, move |db| {
        require_forum(db, forum_id)?;
        if db.delete_comment(forum_id, comment_id)? {
            Ok(())
        } else {
            Err(ApiError::comment_not_found())
        }
    })
    .await?;

    Ok(Json(NoData {}))
}
