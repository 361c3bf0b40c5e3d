use super::{PersistenceResult, PostStore};
use crate::post::ContentPost;
use rusqlite::{Connection, params};
use std::sync::Mutex;

pub struct SqlitePostStore {
    connection: Mutex<Connection>,
}

impl SqlitePostStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    // The position column preserves insertion order across a round-trip;
    // within-day ordering depends on it.
    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS scheduled_posts (
                position INTEGER PRIMARY KEY,
                id TEXT NOT NULL UNIQUE,
                post_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl PostStore for SqlitePostStore {
    fn save_posts(&self, posts: &[ContentPost]) -> PersistenceResult<()> {
        super::validate_posts(posts)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM scheduled_posts", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO scheduled_posts (position, id, post_json) VALUES (?1, ?2, ?3)",
            )?;
            for (position, post) in posts.iter().enumerate() {
                let json = serde_json::to_string(post)?;
                stmt.execute(params![position as i64, post.id, json])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_posts(&self) -> PersistenceResult<Vec<ContentPost>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT post_json FROM scheduled_posts ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut posts = Vec::new();
        for json in rows {
            let json = json?;
            let post: ContentPost = serde_json::from_str(&json)?;
            posts.push(post);
        }

        super::validate_posts(&posts)?;
        Ok(posts)
    }
}
