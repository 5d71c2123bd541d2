//! Client-side bookmark cache for the current identity.
//!
//! # Responsibility
//! - Mirror the current identity's bookmarks from a `BookmarkRepository`.
//! - Gate mutations on an authenticated identity.
//! - Keep the local sequence consistent with successful remote writes.
//!
//! # Invariants
//! - The local sequence never holds two entries with the same `team_id`.
//! - A failed remote call leaves the local sequence untouched.
//! - Losing the identity clears the local sequence without a remote call.
//! - Every failure is logged here; callers may ignore the returned error.

use crate::model::bookmark::Bookmark;
use crate::model::identity::Identity;
use crate::model::team::TeamId;
use crate::repo::bookmark_repo::{BookmarkRepository, RepoError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type BookmarkResult<T> = Result<T, BookmarkError>;

/// Failure of a bookmark store operation.
#[derive(Debug)]
pub enum BookmarkError {
    /// Mutation attempted with no authenticated identity.
    MissingIdentity,
    Repo(RepoError),
}

impl Display for BookmarkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIdentity => write!(f, "no authenticated identity"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookmarkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingIdentity => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for BookmarkError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added(Bookmark),
    Removed,
}

impl BookmarkToggle {
    /// Membership after the toggle.
    pub fn is_bookmarked(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Bookmark cache and mutation gateway.
pub struct BookmarkStore<R: BookmarkRepository> {
    repo: R,
    identity: Option<Identity>,
    bookmarks: Vec<Bookmark>,
    loading: bool,
}

impl<R: BookmarkRepository> BookmarkStore<R> {
    /// Creates a store and performs the initial load when `identity` is set.
    ///
    /// A failed initial load is logged and leaves the store empty.
    pub fn new(repo: R, identity: Option<Identity>) -> Self {
        let mut store = Self {
            repo,
            identity,
            bookmarks: Vec::new(),
            loading: false,
        };
        let _ = store.load();
        store
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Local bookmark sequence for rendering.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// True while a load is waiting on the repository.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Applies an identity transition from the session provider.
    ///
    /// - Absent: clears the local sequence synchronously.
    /// - Same user: keeps bookmarks and refreshes profile fields.
    /// - New or different user: discards the sequence and reloads.
    pub fn set_identity(&mut self, identity: Option<Identity>) -> BookmarkResult<()> {
        let Some(next) = identity else {
            if self.identity.take().is_some() {
                info!(
                    "event=bookmark_clear module=bookmarks status=ok dropped={}",
                    self.bookmarks.len()
                );
            }
            self.bookmarks.clear();
            self.loading = false;
            return Ok(());
        };

        let same_user = self
            .identity
            .as_ref()
            .is_some_and(|current| current.same_user(&next));
        self.identity = Some(next);
        if same_user {
            return Ok(());
        }

        self.bookmarks.clear();
        self.load().map(|_| ())
    }

    /// Replaces the local sequence with the identity's stored bookmarks.
    ///
    /// Returns the number of bookmarks loaded. Without an identity the
    /// sequence is cleared and `Ok(0)` returned.
    pub fn load(&mut self) -> BookmarkResult<usize> {
        let Some(identity) = self.identity.as_ref() else {
            self.bookmarks.clear();
            self.loading = false;
            return Ok(0);
        };

        let started_at = Instant::now();
        self.loading = true;
        let result = self.repo.list_bookmarks(&identity.id);
        self.loading = false;

        match result {
            Ok(rows) => {
                self.bookmarks = unique_by_team(rows);
                info!(
                    "event=bookmark_load module=bookmarks status=ok count={} duration_ms={}",
                    self.bookmarks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(self.bookmarks.len())
            }
            Err(err) => {
                error!(
                    "event=bookmark_load module=bookmarks status=error kept={} duration_ms={} error={}",
                    self.bookmarks.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Same as `load`; named for presentation callers.
    pub fn reload(&mut self) -> BookmarkResult<usize> {
        self.load()
    }

    /// Bookmarks `team_id` for the current identity.
    pub fn add(&mut self, team_id: &str) -> BookmarkResult<Bookmark> {
        let identity = self.require_identity("add", team_id)?;
        match self.repo.insert_bookmark(&identity.id, team_id) {
            Ok(bookmark) => {
                self.bookmarks.retain(|entry| entry.team_id != bookmark.team_id);
                self.bookmarks.push(bookmark.clone());
                info!(
                    "event=bookmark_add module=bookmarks status=ok team_id={team_id} count={}",
                    self.bookmarks.len()
                );
                Ok(bookmark)
            }
            Err(err) => {
                error!("event=bookmark_add module=bookmarks status=error team_id={team_id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Removes the bookmark for `team_id`, dropping every local match.
    pub fn remove(&mut self, team_id: &str) -> BookmarkResult<()> {
        let identity = self.require_identity("remove", team_id)?;
        match self.repo.delete_bookmark(&identity.id, team_id) {
            Ok(removed_rows) => {
                self.bookmarks.retain(|entry| entry.team_id != team_id);
                info!(
                    "event=bookmark_remove module=bookmarks status=ok team_id={team_id} removed_rows={removed_rows} count={}",
                    self.bookmarks.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=bookmark_remove module=bookmarks status=error team_id={team_id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Flips membership of `team_id` based on the local sequence.
    pub fn toggle(&mut self, team_id: &str) -> BookmarkResult<BookmarkToggle> {
        if self.is_bookmarked(team_id) {
            self.remove(team_id).map(|()| BookmarkToggle::Removed)
        } else {
            self.add(team_id).map(BookmarkToggle::Added)
        }
    }

    pub fn is_bookmarked(&self, team_id: &str) -> bool {
        self.bookmarks.iter().any(|entry| entry.team_id == team_id)
    }

    /// Team ids of the local sequence.
    pub fn bookmarked_ids(&self) -> Vec<TeamId> {
        self.bookmarks
            .iter()
            .map(|entry| entry.team_id.clone())
            .collect()
    }

    fn require_identity(&self, op: &str, team_id: &str) -> BookmarkResult<&Identity> {
        self.identity.as_ref().ok_or_else(|| {
            warn!("event=bookmark_{op} module=bookmarks status=rejected team_id={team_id} reason=missing_identity");
            BookmarkError::MissingIdentity
        })
    }
}

// Backends without a uniqueness constraint may return duplicates; keep the
// earliest row per team.
fn unique_by_team(rows: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.team_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{unique_by_team, BookmarkError, BookmarkStore, BookmarkToggle};
    use crate::model::bookmark::Bookmark;
    use crate::model::identity::Identity;
    use crate::repo::bookmark_repo::{BookmarkRepository, RepoError, RepoResult};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryRepo {
        rows: RefCell<Vec<Bookmark>>,
        next_id: Cell<u32>,
        fail: Cell<bool>,
        list_calls: Cell<u32>,
    }

    impl MemoryRepo {
        fn check(&self) -> RepoResult<()> {
            if self.fail.get() {
                return Err(RepoError::Unavailable("simulated outage".to_string()));
            }
            Ok(())
        }
    }

    impl BookmarkRepository for MemoryRepo {
        fn list_bookmarks(&self, user_id: &str) -> RepoResult<Vec<Bookmark>> {
            self.list_calls.set(self.list_calls.get() + 1);
            self.check()?;
            Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|row| row.user_id == user_id)
                .cloned()
                .collect())
        }

        fn insert_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<Bookmark> {
            self.check()?;
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let row = Bookmark {
                id: format!("bm-{id}"),
                user_id: user_id.to_string(),
                team_id: team_id.to_string(),
                created_at: i64::from(id),
            };
            self.rows.borrow_mut().push(row.clone());
            Ok(row)
        }

        fn delete_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<usize> {
            self.check()?;
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| !(row.user_id == user_id && row.team_id == team_id));
            Ok(before - rows.len())
        }
    }

    fn alice() -> Identity {
        Identity::new("user-alice", "alice@example.com", "Alice Dela Cruz")
    }

    fn bookmark(id: &str, team_id: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            user_id: "user-alice".to_string(),
            team_id: team_id.to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn mutations_without_identity_fail_without_side_effects() {
        let repo = MemoryRepo::default();
        let mut store = BookmarkStore::new(&repo, None);

        assert!(matches!(store.add("1"), Err(BookmarkError::MissingIdentity)));
        assert!(matches!(store.remove("1"), Err(BookmarkError::MissingIdentity)));
        assert!(matches!(store.toggle("1"), Err(BookmarkError::MissingIdentity)));
        assert!(store.is_empty());
        assert!(repo.rows.borrow().is_empty());
        assert_eq!(repo.list_calls.get(), 0);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let repo = MemoryRepo::default();
        let mut store = BookmarkStore::new(&repo, Some(alice()));

        let first = store.toggle("4").unwrap();
        assert!(first.is_bookmarked());
        assert!(store.is_bookmarked("4"));

        assert_eq!(store.toggle("4").unwrap(), BookmarkToggle::Removed);
        assert!(!store.is_bookmarked("4"));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_add_leaves_local_state_unchanged() {
        let repo = MemoryRepo::default();
        let mut store = BookmarkStore::new(&repo, Some(alice()));
        store.add("1").unwrap();

        repo.fail.set(true);
        assert!(matches!(store.add("2"), Err(BookmarkError::Repo(_))));
        assert!(matches!(store.remove("1"), Err(BookmarkError::Repo(_))));
        assert_eq!(store.bookmarked_ids(), vec!["1".to_string()]);
    }

    #[test]
    fn identity_loss_clears_without_remote_call() {
        let repo = MemoryRepo::default();
        let mut store = BookmarkStore::new(&repo, Some(alice()));
        store.add("1").unwrap();
        let calls_before = repo.list_calls.get();

        repo.fail.set(true);
        store.set_identity(None).unwrap();
        assert!(store.is_empty());
        assert!(store.identity().is_none());
        assert_eq!(repo.list_calls.get(), calls_before);
    }

    #[test]
    fn same_identity_does_not_reload() {
        let repo = MemoryRepo::default();
        let mut store = BookmarkStore::new(&repo, Some(alice()));
        let calls_before = repo.list_calls.get();

        let mut renamed = alice();
        renamed.full_name = "Alice D. Cruz".to_string();
        store.set_identity(Some(renamed)).unwrap();
        assert_eq!(repo.list_calls.get(), calls_before);
        assert_eq!(
            store.identity().map(|identity| identity.full_name.as_str()),
            Some("Alice D. Cruz")
        );
    }

    #[test]
    fn unique_by_team_keeps_first_row() {
        let rows = vec![bookmark("a", "1"), bookmark("b", "2"), bookmark("c", "1")];
        let ids: Vec<String> = unique_by_team(rows).into_iter().map(|row| row.id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn remove_drops_every_local_match() {
        let repo = MemoryRepo::default();
        repo.rows
            .borrow_mut()
            .extend([bookmark("a", "3"), bookmark("b", "5")]);
        let mut store = BookmarkStore::new(&repo, Some(alice()));
        store.bookmarks.push(bookmark("dup", "3"));

        store.remove("3").unwrap();
        assert_eq!(store.bookmarked_ids(), vec!["5".to_string()]);
    }
}
