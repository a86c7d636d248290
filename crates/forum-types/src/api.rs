use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Comment, Forum};
use crate::validation::{FieldError, FieldReader, RequestBody};

pub const TITLE_MAX_CHARS: usize = 20;
pub const CONTENT_MAX_CHARS: usize = 100;
pub const COMMENT_MAX_CHARS: usize = 100;

// -- Forums --

/// Body of `POST /forums` and `PUT /forums/{forum_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumCreate {
    pub title: String,
    pub content: String,
}

impl RequestBody for ForumCreate {
    fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut reader = FieldReader::new(body)?;
        let title = reader.string("title", TITLE_MAX_CHARS);
        let content = reader.string("content", CONTENT_MAX_CHARS);

        match (title, content) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(reader.into_errors()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Forums {
    pub forums: Vec<Forum>,
}

// -- Comments --

/// Body of `POST /forums/{forum_id}/comments` and the matching `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentCreate {
    pub comment: String,
}

impl RequestBody for CommentCreate {
    fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut reader = FieldReader::new(body)?;
        match reader.string("comment", COMMENT_MAX_CHARS) {
            Some(comment) => Ok(Self { comment }),
            None => Err(reader.into_errors()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Comments {
    pub comments: Vec<Comment>,
}

// -- Shared --

/// Empty success body, rendered as `{}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NoData {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub detail: Vec<FieldError>,
}
