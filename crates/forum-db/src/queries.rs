use crate::models::{CommentRow, ForumRow};
use crate::Database;
use anyhow::Result;
use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;

const FORUM_COLUMNS: &str = "forum_id, title, content, created_at, updated_at";
const COMMENT_COLUMNS: &str = "forum_id, comment_id, comment, created_at, updated_at";

impl Database {
    // -- Forums --

    /// All forums, newest first.
    pub fn list_forums(&self) -> Result<Vec<ForumRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FORUM_COLUMNS} FROM forums ORDER BY forum_id DESC"
            ))?;
            let rows = stmt
                .query_map([], map_forum)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_forum(&self, title: &str, content: &str) -> Result<ForumRow> {
        let now = forum_types::timestamp::now();
        let row = self.with_conn_mut(|conn| {
            let row = conn.query_row(
                &format!(
                    "INSERT INTO forums (title, content, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?3)
                     RETURNING {FORUM_COLUMNS}"
                ),
                params![title, content, now],
                map_forum,
            )?;
            Ok(row)
        })?;

        debug!("Created forum {}", row.forum_id);
        Ok(row)
    }

    pub fn get_forum(&self, forum_id: i64) -> Result<Option<ForumRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {FORUM_COLUMNS} FROM forums WHERE forum_id = ?1"),
                    [forum_id],
                    map_forum,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Collaborator check for anything that hangs off a forum.
    pub fn forum_exists(&self, forum_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM forums WHERE forum_id = ?1)",
                [forum_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// Replace title and content. Returns `None` if the forum does not exist.
    pub fn update_forum(&self, forum_id: i64, title: &str, content: &str) -> Result<Option<ForumRow>> {
        let now = forum_types::timestamp::now();
        self.with_conn_mut(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "UPDATE forums SET title = ?2, content = ?3, updated_at = ?4
                         WHERE forum_id = ?1
                         RETURNING {FORUM_COLUMNS}"
                    ),
                    params![forum_id, title, content, now],
                    map_forum,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Delete a forum and, through the foreign key cascade, its comments.
    /// Returns whether a forum was removed.
    pub fn delete_forum(&self, forum_id: i64) -> Result<bool> {
        let deleted = self.with_conn_mut(|conn| {
            Ok(conn.execute("DELETE FROM forums WHERE forum_id = ?1", [forum_id])?)
        })?;

        if deleted > 0 {
            debug!("Deleted forum {}", forum_id);
        }
        Ok(deleted > 0)
    }

    // -- Comments --

    pub fn list_comments(&self, forum_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COMMENT_COLUMNS} FROM comments WHERE forum_id = ?1 ORDER BY comment_id"
            ))?;
            let rows = stmt
                .query_map([forum_id], map_comment)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Insert a comment with the next per-forum id (`max + 1`, starting at 1).
    /// The id is computed inside the INSERT itself, so concurrent creations
    /// on the same forum cannot collide. The caller checks the forum exists.
    pub fn create_comment(&self, forum_id: i64, comment: &str) -> Result<CommentRow> {
        let now = forum_types::timestamp::now();
        let row = self.with_conn_mut(|conn| {
            let row = conn.query_row(
                &format!(
                    "INSERT INTO comments (forum_id, comment_id, comment, created_at, updated_at)
                     SELECT ?1, COALESCE(MAX(comment_id), 0) + 1, ?2, ?3, ?3
                     FROM comments WHERE forum_id = ?1
                     RETURNING {COMMENT_COLUMNS}"
                ),
                params![forum_id, comment, now],
                map_comment,
            )?;
            Ok(row)
        })?;

        debug!("Created comment {} on forum {}", row.comment_id, row.forum_id);
        Ok(row)
    }

    pub fn get_comment(&self, forum_id: i64, comment_id: i64) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {COMMENT_COLUMNS} FROM comments
                         WHERE forum_id = ?1 AND comment_id = ?2"
                    ),
                    [forum_id, comment_id],
                    map_comment,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Replace the comment text. Returns `None` if the comment does not exist.
    pub fn update_comment(
        &self,
        forum_id: i64,
        comment_id: i64,
        comment: &str,
    ) -> Result<Option<CommentRow>> {
        let now = forum_types::timestamp::now();
        self.with_conn_mut(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "UPDATE comments SET comment = ?3, updated_at = ?4
                         WHERE forum_id = ?1 AND comment_id = ?2
                         RETURNING {COMMENT_COLUMNS}"
                    ),
                    params![forum_id, comment_id, comment, now],
                    map_comment,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn delete_comment(&self, forum_id: i64, comment_id: i64) -> Result<bool> {
        let deleted = self.with_conn_mut(|conn| {
            Ok(conn.execute(
                "DELETE FROM comments WHERE forum_id = ?1 AND comment_id = ?2",
                [forum_id, comment_id],
            )?)
        })?;

        if deleted > 0 {
            debug!("Deleted comment {} on forum {}", comment_id, forum_id);
        }
        Ok(deleted > 0)
    }
}

fn map_forum(row: &Row<'_>) -> rusqlite::Result<ForumRow> {
    Ok(ForumRow {
        forum_id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn map_comment(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        forum_id: row.get(0)?,
        comment_id: row.get(1)?,
        comment: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_forum_ids_increment() {
        let db = db();
        let ids: Vec<i64> = (0..3)
            .map(|_| db.create_forum("title", "content").unwrap().forum_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_forum_ids_not_reused_after_delete() {
        let db = db();
        db.create_forum("a", "a").unwrap();
        let second = db.create_forum("b", "b").unwrap();
        assert!(db.delete_forum(second.forum_id).unwrap());
        assert_eq!(db.create_forum("c", "c").unwrap().forum_id, 3);
    }

    #[test]
    fn test_list_forums_newest_first() {
        let db = db();
        assert!(db.list_forums().unwrap().is_empty());
        for _ in 0..3 {
            db.create_forum("title", "content").unwrap();
        }
        let ids: Vec<i64> = db.list_forums().unwrap().iter().map(|f| f.forum_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_get_and_update_forum() {
        let db = db();
        let created = db.create_forum("title", "content").unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let fetched = db.get_forum(created.forum_id).unwrap().unwrap();
        assert_eq!(fetched.title, "title");
        assert_eq!(fetched.created_at, created.created_at);

        let updated = db.update_forum(created.forum_id, "new", "body").unwrap().unwrap();
        assert_eq!(updated.forum_id, created.forum_id);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.content, "body");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        assert!(db.get_forum(42).unwrap().is_none());
        assert!(db.update_forum(42, "x", "y").unwrap().is_none());
    }

    #[test]
    fn test_forum_exists() {
        let db = db();
        assert!(!db.forum_exists(1).unwrap());
        db.create_forum("title", "content").unwrap();
        assert!(db.forum_exists(1).unwrap());
    }

    #[test]
    fn test_comment_ids_are_per_forum() {
        let db = db();
        let a = db.create_forum("a", "a").unwrap().forum_id;
        let b = db.create_forum("b", "b").unwrap().forum_id;

        for expected in 1..=3 {
            assert_eq!(db.create_comment(a, "on a").unwrap().comment_id, expected);
        }
        assert_eq!(db.create_comment(b, "on b").unwrap().comment_id, 1);

        let ids: Vec<i64> = db.list_comments(a).unwrap().iter().map(|c| c.comment_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(db.list_comments(b).unwrap().len(), 1);
    }

    #[test]
    fn test_comment_id_follows_current_max() {
        let db = db();
        let forum = db.create_forum("a", "a").unwrap().forum_id;
        db.create_comment(forum, "1").unwrap();
        db.create_comment(forum, "2").unwrap();

        // Deleting a lower id leaves the max alone
        assert!(db.delete_comment(forum, 1).unwrap());
        assert_eq!(db.create_comment(forum, "3").unwrap().comment_id, 3);

        // Emptying the forum restarts numbering
        assert!(db.delete_comment(forum, 2).unwrap());
        assert!(db.delete_comment(forum, 3).unwrap());
        assert_eq!(db.create_comment(forum, "again").unwrap().comment_id, 1);
    }

    #[test]
    fn test_update_comment_keeps_identity() {
        let db = db();
        let forum = db.create_forum("a", "a").unwrap().forum_id;
        let created = db.create_comment(forum, "before").unwrap();

        let updated = db.update_comment(forum, created.comment_id, "after").unwrap().unwrap();
        assert_eq!(updated.comment, "after");
        assert_eq!(updated.forum_id, forum);
        assert_eq!(updated.comment_id, created.comment_id);
        assert_eq!(updated.created_at, created.created_at);

        assert!(db.update_comment(forum, 99, "x").unwrap().is_none());
        assert!(db.get_comment(forum, 99).unwrap().is_none());
    }

    #[test]
    fn test_delete_forum_cascades() {
        let db = db();
        let forum = db.create_forum("a", "a").unwrap().forum_id;
        db.create_comment(forum, "x").unwrap();
        db.create_comment(forum, "y").unwrap();

        assert!(db.delete_forum(forum).unwrap());
        assert!(!db.delete_forum(forum).unwrap());

        let remaining: i64 = db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM comments", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let db = db();
        let forum = db.create_forum("a", "a").unwrap().forum_id;
        db.create_comment(forum, "x").unwrap();

        db.reset().unwrap();
        assert!(db.list_forums().unwrap().is_empty());
        assert_eq!(db.create_forum("b", "b").unwrap().forum_id, 1);
    }
}
