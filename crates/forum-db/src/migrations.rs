use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (forums, comments)");
        conn.execute_batch(
            "
            CREATE TABLE forums (
                forum_id    INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                content     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE TABLE comments (
                forum_id    INTEGER NOT NULL REFERENCES forums(forum_id) ON DELETE CASCADE,
                comment_id  INTEGER NOT NULL,
                comment     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                PRIMARY KEY (forum_id, comment_id)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

/// Drop all tables and migrate again. Dropping `forums` also discards its
/// AUTOINCREMENT counter, so ids restart at 1.
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "
        DROP TABLE IF EXISTS comments;
        DROP TABLE IF EXISTS forums;
        DROP TABLE IF EXISTS schema_version;
        ",
    )?;
    run(&tx)?;
    tx.commit()?;

    info!("Database schema recreated");
    Ok(())
}
