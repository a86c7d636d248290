use axum::{Router, http::StatusCode, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::comments;
use crate::error::ApiError;
use crate::forums;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/forums", get(forums::list_forums).post(forums::create_forum))
        .route(
            "/forums/{forum_id}",
            get(forums::get_forum)
                .put(forums::update_forum)
                .delete(forums::delete_forum),
        )
        .route(
            "/forums/{forum_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/forums/{forum_id}/comments/{comment_id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::Rejected(StatusCode::NOT_FOUND, "Not Found".into())
}

async fn method_not_allowed() -> ApiError {
    ApiError::Rejected(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".into())
}
