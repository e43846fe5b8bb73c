//! Read-only access to the Lutris `pga.db` game catalog.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::LutrisError;

/// An open, read-only handle to the Lutris catalog.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Opens the catalog at `path` without creating it.
    pub fn open(path: &Path) -> Result<Self, LutrisError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path = %path.display(), "catalog opened");
        Ok(Self { conn })
    }

    /// Returns every non-empty slug in the `games` table, in row order.
    pub fn game_slugs(&self) -> Result<Vec<String>, LutrisError> {
        let mut stmt = self.conn.prepare("SELECT slug FROM games")?;
        let rows = stmt.query_map([], |r| r.get::<_, Option<String>>(0))?;

        let mut slugs = Vec::new();
        for row in rows {
            match row? {
                Some(slug) if !slug.is_empty() => slugs.push(slug),
                _ => {}
            }
        }
        Ok(slugs)
    }
}

/// Opens the catalog at `path`, reads all slugs and closes it again.
pub fn read_game_slugs(path: &Path) -> Result<Vec<String>, LutrisError> {
    Catalog::open(path)?.game_slugs()
}
