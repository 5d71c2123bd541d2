use bukalert_core::db::open_db_in_memory;
use bukalert_core::{
    Bookmark, BookmarkError, BookmarkRepository, BookmarkStore, Identity, RepoError, RepoResult,
    SqliteBookmarkRepository,
};
use std::cell::Cell;
use std::collections::HashSet;

/// Wraps a real repository and fails every call while `offline` is set.
struct FlakyRepo<R> {
    inner: R,
    offline: Cell<bool>,
    list_calls: Cell<u32>,
}

impl<R> FlakyRepo<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            offline: Cell::new(false),
            list_calls: Cell::new(0),
        }
    }

    fn gate(&self) -> RepoResult<()> {
        if self.offline.get() {
            Err(RepoError::Unavailable("network unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl<R: BookmarkRepository> BookmarkRepository for FlakyRepo<R> {
    fn list_bookmarks(&self, user_id: &str) -> RepoResult<Vec<Bookmark>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.gate()?;
        self.inner.list_bookmarks(user_id)
    }

    fn insert_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<Bookmark> {
        self.gate()?;
        self.inner.insert_bookmark(user_id, team_id)
    }

    fn delete_bookmark(&self, user_id: &str, team_id: &str) -> RepoResult<usize> {
        self.gate()?;
        self.inner.delete_bookmark(user_id, team_id)
    }
}

fn maria() -> Identity {
    Identity::new("user-maria", "maria@example.com", "Maria Santos")
}

fn pedro() -> Identity {
    Identity::new("user-pedro", "pedro@example.com", "Pedro Reyes")
}

#[test]
fn loaded_bookmarks_drive_membership_and_toggle_adds() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteBookmarkRepository::new(&conn);
    sqlite.insert_bookmark("user-maria", "2").unwrap();

    let mut store = BookmarkStore::new(sqlite, Some(maria()));
    assert!(store.is_bookmarked("2"));
    assert!(!store.is_bookmarked("3"));

    let toggled = store.toggle("3").unwrap();
    assert!(toggled.is_bookmarked());
    assert!(store.is_bookmarked("3"));

    let ids: HashSet<String> = store.bookmarked_ids().into_iter().collect();
    assert_eq!(ids, HashSet::from(["2".to_string(), "3".to_string()]));
}

#[test]
fn failed_first_load_keeps_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepo::new(SqliteBookmarkRepository::new(&conn));
    repo.inner.insert_bookmark("user-maria", "1").unwrap();
    repo.offline.set(true);

    let store = BookmarkStore::new(&repo, Some(maria()));
    assert!(store.bookmarks().is_empty());
    assert!(!store.loading());
}

#[test]
fn failed_reload_keeps_previous_sequence() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepo::new(SqliteBookmarkRepository::new(&conn));
    let mut store = BookmarkStore::new(&repo, Some(maria()));
    store.add("1").unwrap();
    store.add("4").unwrap();
    let before = store.bookmarks().to_vec();

    repo.offline.set(true);
    let err = store.reload().unwrap_err();
    assert!(matches!(err, BookmarkError::Repo(RepoError::Unavailable(_))));
    assert_eq!(store.bookmarks(), before.as_slice());
}

#[test]
fn add_then_remove_updates_membership_immediately() {
    let conn = open_db_in_memory().unwrap();
    let mut store = BookmarkStore::new(SqliteBookmarkRepository::new(&conn), Some(maria()));

    let added = store.add("6").unwrap();
    assert_eq!(added.user_id, "user-maria");
    assert!(store.is_bookmarked("6"));

    store.remove("6").unwrap();
    assert!(!store.is_bookmarked("6"));
}

#[test]
fn ids_stay_unique_across_repeated_mutations() {
    let conn = open_db_in_memory().unwrap();
    let mut store = BookmarkStore::new(SqliteBookmarkRepository::new(&conn), Some(maria()));

    for team_id in ["1", "2", "1", "3", "2", "2"] {
        store.add(team_id).unwrap();
    }
    store.remove("3").unwrap();
    store.add("3").unwrap();
    store.toggle("1").unwrap();
    store.toggle("1").unwrap();

    let ids = store.bookmarked_ids();
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(unique.len(), 3);
}

#[test]
fn toggle_twice_returns_to_original_state_for_every_team() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteBookmarkRepository::new(&conn);
    sqlite.insert_bookmark("user-maria", "2").unwrap();
    let mut store = BookmarkStore::new(sqlite, Some(maria()));

    for team_id in ["1", "2", "3", "4", "5", "6"] {
        let original = store.is_bookmarked(team_id);
        store.toggle(team_id).unwrap();
        assert_ne!(store.is_bookmarked(team_id), original);
        store.toggle(team_id).unwrap();
        assert_eq!(store.is_bookmarked(team_id), original);
    }
}

#[test]
fn sign_out_clears_synchronously_and_sign_in_reloads() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepo::new(SqliteBookmarkRepository::new(&conn));
    let mut store = BookmarkStore::new(&repo, None);
    assert_eq!(repo.list_calls.get(), 0);

    store.set_identity(Some(maria())).unwrap();
    store.add("5").unwrap();
    assert_eq!(repo.list_calls.get(), 1);

    repo.offline.set(true);
    store.set_identity(None).unwrap();
    assert!(store.bookmarks().is_empty());
    assert_eq!(repo.list_calls.get(), 1);

    repo.offline.set(false);
    store.set_identity(Some(maria())).unwrap();
    assert_eq!(store.bookmarked_ids(), vec!["5".to_string()]);
}

#[test]
fn switching_identity_replaces_bookmarks() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteBookmarkRepository::new(&conn);
    sqlite.insert_bookmark("user-maria", "1").unwrap();
    sqlite.insert_bookmark("user-pedro", "6").unwrap();

    let mut store = BookmarkStore::new(sqlite, Some(maria()));
    assert_eq!(store.bookmarked_ids(), vec!["1".to_string()]);

    store.set_identity(Some(pedro())).unwrap();
    assert_eq!(store.bookmarked_ids(), vec!["6".to_string()]);
}

#[test]
fn failed_load_after_identity_switch_does_not_leak_previous_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepo::new(SqliteBookmarkRepository::new(&conn));
    repo.inner.insert_bookmark("user-maria", "1").unwrap();
    let mut store = BookmarkStore::new(&repo, Some(maria()));
    assert_eq!(store.len(), 1);

    repo.offline.set(true);
    assert!(store.set_identity(Some(pedro())).is_err());
    assert!(store.is_empty());
    assert_eq!(store.identity().map(|identity| identity.id.as_str()), Some("user-pedro"));
}
