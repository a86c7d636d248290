use anyhow::Result;
use tracing::info;

use crate::Database;

const SAMPLE_FORUMS: &[(&str, &str)] = &[
    ("First post", "This is my first post."),
    ("Recent music", "What have you been listening to lately?"),
    ("Ever been to Africa?", "Has anyone here been to Africa?"),
    ("Why visit Kyushu?", "What makes Kyushu worth the trip?"),
    ("Book recommendations", "What books would you recommend?"),
];

const SAMPLE_COMMENTS: &[&str] = &[
    "I love manga.",
    "Something that will help you in the future.",
];

/// Insert the sample forums, plus a couple of comments on the last one.
/// Goes through the normal insert paths, so ids follow the usual rules.
pub fn insert_sample_data(db: &Database) -> Result<()> {
    let mut last_forum = None;
    for (title, content) in SAMPLE_FORUMS {
        last_forum = Some(db.create_forum(title, content)?.forum_id);
    }

    if let Some(forum_id) = last_forum {
        for comment in SAMPLE_COMMENTS {
            db.create_comment(forum_id, comment)?;
        }
    }

    info!(
        "Seeded {} forums and {} comments",
        SAMPLE_FORUMS.len(),
        SAMPLE_COMMENTS.len()
    );
    Ok(())
}
