//! SQLite Settings Backend
//! Named options in a single `options` table

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::backend::{validate_name, SettingsBackend};
use super::error::Result;

pub struct SqliteSettings {
    conn: Connection,
}

impl SqliteSettings {
    pub fn new(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let settings = Self { conn };
        settings.init_schema()?;
        Ok(settings)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let settings = Self { conn };
        settings.init_schema()?;
        Ok(settings)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS options (
                option_id INTEGER PRIMARY KEY AUTOINCREMENT,
                option_name TEXT NOT NULL UNIQUE,
                option_value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // PRAGMA returns the resulting mode ("memory" for in-memory databases)
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        Ok(())
    }
}

impl SettingsBackend for SqliteSettings {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT option_value FROM options WHERE option_name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn add(&mut self, name: &str, value: &str) -> Result<bool> {
        validate_name(name)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO options (option_name, option_value, updated_at)
             VALUES (?1, ?2, datetime('now'))",
            params![name, value],
        )?;
        Ok(inserted > 0)
    }

    fn update(&mut self, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        self.conn.execute(
            "INSERT INTO options (option_name, option_value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(option_name) DO UPDATE SET
                option_value = excluded.option_value,
                updated_at = excluded.updated_at",
            params![name, value],
        )?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM options WHERE option_name = ?1", params![name])?;
        Ok(deleted > 0)
    }
}
