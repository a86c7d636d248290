use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::Value;

use forum_types::validation::{FieldError, RequestBody};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ForumPath {
    pub forum_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub forum_id: i64,
    pub comment_id: i64,
}

/// Path extractors whose parse failures come back as 422 field errors.
pub type ForumIdPath = WithRejection<Path<ForumPath>, ApiError>;
pub type CommentIdPath = WithRejection<Path<CommentPath>, ApiError>;

/// JSON body checked against its schema before the handler runs.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: RequestBody,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;

        parse_body(&bytes).map(ValidJson).map_err(ApiError::Validation)
    }
}

pub fn parse_body<T: RequestBody>(bytes: &[u8]) -> Result<T, Vec<FieldError>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(vec![FieldError::missing_body()]);
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| vec![FieldError::invalid_json(e)])?;
    T::from_json(&value)
}
