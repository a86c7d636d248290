//! Database row types — these map directly to SQLite rows.
//! Converted into the forum-types wire models at the edge.

use chrono::NaiveDateTime;
use forum_types::models::{Comment, Forum};

pub struct ForumRow {
    pub forum_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CommentRow {
    pub forum_id: i64,
    pub comment_id: i64,
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ForumRow> for Forum {
    fn from(row: ForumRow) -> Self {
        Forum {
            forum_id: row.forum_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            forum_id: row.forum_id,
            comment_id: row.comment_id,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
