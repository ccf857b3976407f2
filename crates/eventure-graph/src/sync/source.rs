//! Relational source the synchronizer reads from.
//!
//! Five fixed tables: `user_account(id)`, `event(id)`, `category(id)`,
//! `event_category(event_id, category_id)`, `user_interests(username,
//! category_id)`.

use std::path::Path;
use std::sync::Mutex;

use eventure_core::EngineResult;
use rusqlite::Connection;

/// Read-only row iteration over the five sync tables.
pub trait RelationalSource: Send + Sync {
    fn user_ids(&self) -> EngineResult<Vec<String>>;
    fn event_ids(&self) -> EngineResult<Vec<String>>;
    fn category_ids(&self) -> EngineResult<Vec<String>>;
    /// `(event_id, category_id)` pairs.
    fn event_categories(&self) -> EngineResult<Vec<(String, String)>>;
    /// `(username, category_id)` pairs. Usernames are user-node ids.
    fn user_interests(&self) -> EngineResult<Vec<(String, String)>>;
}

/// SQLite-backed relational source.
pub struct SqliteSource {
    conn: Mutex<Connection>,
}

impl SqliteSource {
    /// Open a database file.
    pub fn open(path: impl AsRef<Path>) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database. Mostly useful in tests and local dev.
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create the five sync tables if they do not exist yet.
    pub fn ensure_schema(&self) -> EngineResult<()> {
        let conn = self.lock();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS user_account (id TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS event (id TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS category (id TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS event_category (
                 event_id TEXT NOT NULL,
                 category_id TEXT NOT NULL,
                 PRIMARY KEY (event_id, category_id)
             );
             CREATE TABLE IF NOT EXISTS user_interests (
                 username TEXT NOT NULL,
                 category_id TEXT NOT NULL,
                 PRIMARY KEY (username, category_id)
             );",
        )?;
        Ok(())
    }

    /// Insert a fixture snapshot into the five tables. Useful for tests and
    /// local development; existing rows are kept.
    pub fn seed(
        &self,
        users: &[&str],
        events: &[&str],
        categories: &[&str],
        event_categories: &[(&str, &str)],
        user_interests: &[(&str, &str)],
    ) -> EngineResult<()> {
        let conn = self.lock();
        for id in users {
            conn.execute("INSERT OR IGNORE INTO user_account (id) VALUES (?1)", [id])?;
        }
        for id in events {
            conn.execute("INSERT OR IGNORE INTO event (id) VALUES (?1)", [id])?;
        }
        for id in categories {
            conn.execute("INSERT OR IGNORE INTO category (id) VALUES (?1)", [id])?;
        }
        for (event_id, category_id) in event_categories {
            conn.execute(
                "INSERT OR IGNORE INTO event_category (event_id, category_id) VALUES (?1, ?2)",
                [event_id, category_id],
            )?;
        }
        for (username, category_id) in user_interests {
            conn.execute(
                "INSERT OR IGNORE INTO user_interests (username, category_id) VALUES (?1, ?2)",
                [username, category_id],
            )?;
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("relational source lock poisoned")
    }

    fn select_ids(&self, sql: &str) -> EngineResult<Vec<String>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    fn select_pairs(&self, sql: &str) -> EngineResult<Vec<(String, String)>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut pairs = Vec::new();
        for pair in rows {
            pairs.push(pair?);
        }
        Ok(pairs)
    }
}

impl RelationalSource for SqliteSource {
    fn user_ids(&self) -> EngineResult<Vec<String>> {
        self.select_ids("SELECT id FROM user_account")
    }

    fn event_ids(&self) -> EngineResult<Vec<String>> {
        self.select_ids("SELECT id FROM event")
    }

    fn category_ids(&self) -> EngineResult<Vec<String>> {
        self.select_ids("SELECT id FROM category")
    }

    fn event_categories(&self) -> EngineResult<Vec<(String, String)>> {
        self.select_pairs("SELECT event_id, category_id FROM event_category")
    }

    fn user_interests(&self) -> EngineResult<Vec<(String, String)>> {
        self.select_pairs("SELECT username, category_id FROM user_interests")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteSource {
        let source = SqliteSource::open_in_memory().unwrap();
        source.ensure_schema().unwrap();
        source
            .seed(
                &["u1", "u2"],
                &["e1"],
                &["c1", "c2"],
                &[("e1", "c1")],
                &[("u1", "c1"), ("u2", "c1")],
            )
            .unwrap();
        source
    }

    #[test]
    fn reads_all_five_tables() {
        let source = seeded();
        assert_eq!(source.user_ids().unwrap(), vec!["u1", "u2"]);
        assert_eq!(source.event_ids().unwrap(), vec!["e1"]);
        assert_eq!(source.category_ids().unwrap(), vec!["c1", "c2"]);
        assert_eq!(
            source.event_categories().unwrap(),
            vec![("e1".to_string(), "c1".to_string())]
        );
        assert_eq!(source.user_interests().unwrap().len(), 2);
    }

    #[test]
    fn empty_tables_read_as_empty_vectors() {
        let source = SqliteSource::open_in_memory().unwrap();
        source.ensure_schema().unwrap();
        assert!(source.user_ids().unwrap().is_empty());
        assert!(source.event_categories().unwrap().is_empty());
    }

    #[test]
    fn seeding_twice_keeps_rows_unique() {
        let source = seeded();
        source
            .seed(&["u1"], &["e1"], &[], &[("e1", "c1")], &[])
            .unwrap();
        assert_eq!(source.user_ids().unwrap().len(), 2);
        assert_eq!(source.event_categories().unwrap().len(), 1);
    }

    #[test]
    fn ensure_schema_is_rerunnable() {
        let source = SqliteSource::open_in_memory().unwrap();
        source.ensure_schema().unwrap();
        source.ensure_schema().unwrap();
    }
}
