//! Bookmark repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide select-by-user, insert-returning-row and
//!   delete-by-user-and-team over `bookmarks` storage.
//! - Map storage rows into `Bookmark` values.
//!
//! # Invariants
//! - `insert_bookmark` returns the single row for `(user_id, team_id)`,
//!   creating it only when absent.
//! - `delete_bookmark` is delete-if-exists and reports the removed count.
//! - `list_bookmarks` returns rows in insertion order.

use crate::db::DbError;
use crate::model::bookmark::Bookmark;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure reported by a bookmark backend.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored row does not map onto a valid `Bookmark`.
    InvalidData(String),
    /// Backend could not be reached or rejected the request.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid bookmark data: {message}"),
            Self::Unavailable(message) => write!(f, "bookmark backend unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row-level operations the bookmark store needs from its backend.
pub trait BookmarkRepository {
    fn list_bookmarks(&self, user_id: &str) -> RepoResult<Vec<Bookmark>>;
    fn insert_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<Bookmark>;
    fn delete_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<usize>;
}

impl<T: BookmarkRepository + ?Sized> BookmarkRepository for &T {
    fn list_bookmarks(&self, user_id: &str) -> RepoResult<Vec<Bookmark>> {
        (**self).list_bookmarks(user_id)
    }

    fn insert_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<Bookmark> {
        (**self).insert_bookmark(user_id, team_id)
    }

    fn delete_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<usize> {
        (**self).delete_bookmark(user_id, team_id)
    }
}

/// SQLite-backed bookmark repository.
///
/// The `UNIQUE (user_id, team_id)` constraint in the schema is what keeps
/// concurrent toggles from producing duplicate rows.
pub struct SqliteBookmarkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookmarkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find(&self, user_id: &str, team_id: &str) -> RepoResult<Option<Bookmark>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, team_id, created_at
             FROM bookmarks
             WHERE user_id = ?1 AND team_id = ?2;",
        )?;
        let mut rows = stmt.query(params![user_id, team_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_bookmark_row(row)?)),
            None => Ok(None),
        }
    }
}

impl BookmarkRepository for SqliteBookmarkRepository<'_> {
    fn list_bookmarks(&self, user_id: &str) -> RepoResult<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, team_id, created_at
             FROM bookmarks
             WHERE user_id = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut bookmarks = Vec::new();
        while let Some(row) = rows.next()? {
            bookmarks.push(parse_bookmark_row(row)?);
        }
        Ok(bookmarks)
    }

    fn insert_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<Bookmark> {
        let inserted = self.conn.execute(
            "INSERT INTO bookmarks (id, user_id, team_id)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, team_id) DO NOTHING;",
            params![Uuid::new_v4().to_string(), user_id, team_id],
        )?;
        if inserted == 0 {
            debug!("event=bookmark_insert module=repo status=exists team_id={team_id}");
        }

        self.find(user_id, team_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "bookmark for team `{team_id}` missing after insert"
            ))
        })
    }

    fn delete_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM bookmarks WHERE user_id = ?1 AND team_id = ?2;",
            params![user_id, team_id],
        )?;
        Ok(removed)
    }
}

fn parse_bookmark_row(row: &Row<'_>) -> RepoResult<Bookmark> {
    let id: String = row.get("id")?;
    if Uuid::parse_str(&id).is_err() {
        return Err(RepoError::InvalidData(format!(
            "invalid uuid value `{id}` in bookmarks.id"
        )));
    }

    Ok(Bookmark {
        id,
        user_id: row.get("user_id")?,
        team_id: row.get("team_id")?,
        created_at: row.get("created_at")?,
    })
}
