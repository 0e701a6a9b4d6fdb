use std::collections::HashSet;
use watermelon_core::db::open_db;
use watermelon_core::{
    KvStore, MemoryKvStore, Note, NoteStore, PersistIssue, SqliteKvStore, StoreError, StoreState,
    NOTES_KEY,
};

fn seeded(titles: &[&str]) -> NoteStore<MemoryKvStore> {
    let mut store = NoteStore::open(MemoryKvStore::new());
    for title in titles {
        store.add(*title, format!("{title} body"));
    }
    store
}

fn titles<S: KvStore>(store: &NoteStore<S>) -> Vec<&str> {
    store.notes().iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn save_then_fresh_load_roundtrips_order_and_ids() {
    let mut kv = MemoryKvStore::new();
    let before = {
        let mut store = NoteStore::open(&mut kv);
        store.add("groceries", "melon\nmint");
        store.add("", "untitled is fine at the store level");
        store.add("ideas", "");
        store.notes().to_vec()
    };

    let reopened = NoteStore::open(&mut kv);
    assert_eq!(reopened.notes(), before.as_slice());
    assert!(reopened.last_issue().is_none());
}

#[test]
fn load_twice_without_mutation_is_idempotent() {
    let mut store = seeded(&["a", "b"]);
    store.load();
    let first = store.notes().to_vec();
    store.load();
    assert_eq!(store.notes(), first.as_slice());
    assert_eq!(store.state(), StoreState::Loaded);
}

#[test]
fn add_appends_one_note_with_fresh_id() {
    let mut store = seeded(&["a", "b"]);
    let known: HashSet<_> = store.notes().iter().map(|note| note.id).collect();

    let id = store.add("c", "third");

    assert_eq!(store.len(), 3);
    let last = store.notes().last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.title, "c");
    assert_eq!(last.content, "third");
    assert!(!known.contains(&id));
}

#[test]
fn add_persists_immediately() {
    let mut kv = MemoryKvStore::new();
    assert!(kv.is_empty());
    {
        let mut store = NoteStore::open(&mut kv);
        store.add("persisted", "now");
    }
    assert_eq!(kv.len(), 1);

    let saved: Vec<Note> = serde_json::from_slice(kv.raw(NOTES_KEY).unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].title, "persisted");
}

#[test]
fn delete_first_and_third_of_three_leaves_middle() {
    let mut store = seeded(&["A", "B", "C"]);

    let removed = store.delete([0, 2]).unwrap();

    assert_eq!(titles(&store), vec!["B"]);
    let removed_titles: Vec<_> = removed.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(removed_titles, vec!["A", "C"]);
}

#[test]
fn delete_order_of_positions_does_not_matter() {
    let mut store = seeded(&["A", "B", "C", "D"]);
    store.delete([3, 1]).unwrap();
    assert_eq!(titles(&store), vec!["A", "C"]);
}

#[test]
fn delete_out_of_bounds_is_rejected_without_partial_removal() {
    let mut kv = MemoryKvStore::new();
    let mut store = NoteStore::open(&mut kv);
    store.add("A", "");
    store.add("B", "");
    let persisted_before = store.storage().raw(NOTES_KEY).map(<[u8]>::to_vec);

    let err = store.delete([0, 5]).unwrap_err();

    assert_eq!(err, StoreError::PositionOutOfBounds { position: 5, len: 2 });
    assert_eq!(titles(&store), vec!["A", "B"]);
    assert_eq!(store.storage().raw(NOTES_KEY).map(<[u8]>::to_vec), persisted_before);
}

#[test]
fn delete_persists_remaining_notes() {
    let mut kv = MemoryKvStore::new();
    {
        let mut store = NoteStore::open(&mut kv);
        store.add("keep", "");
        store.add("drop", "");
        store.delete([1]).unwrap();
    }

    let reopened = NoteStore::open(&mut kv);
    assert_eq!(titles(&reopened), vec!["keep"]);
}

#[test]
fn corrupt_blob_loads_as_empty_and_records_issue() {
    let mut kv = MemoryKvStore::new();
    kv.insert_raw(NOTES_KEY, b"{not json".to_vec());

    let store = NoteStore::open(kv);

    assert!(store.is_empty());
    assert_eq!(store.state(), StoreState::Loaded);
    assert!(matches!(store.last_issue(), Some(PersistIssue::Decode(_))));
}

#[test]
fn duplicate_ids_in_blob_are_made_unique_on_load() {
    let mut kv = MemoryKvStore::new();
    kv.insert_raw(
        NOTES_KEY,
        br#"[
            {"id":"11111111-2222-4333-8444-555555555555","title":"a","content":""},
            {"id":"11111111-2222-4333-8444-555555555555","title":"b","content":""},
            {"id":"21111111-2222-4333-8444-555555555555","title":"c","content":""}
        ]"#
        .to_vec(),
    );

    let store = NoteStore::open(kv);

    assert_eq!(titles(&store), vec!["a", "b", "c"]);
    let ids: HashSet<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), store.len());
    assert_eq!(
        store.notes()[0].id.to_string(),
        "11111111-2222-4333-8444-555555555555"
    );
    assert_eq!(
        store.notes()[2].id.to_string(),
        "21111111-2222-4333-8444-555555555555"
    );
}

#[test]
fn blob_with_wrong_shape_loads_as_empty() {
    let mut kv = MemoryKvStore::new();
    kv.insert_raw(NOTES_KEY, br#"[{"title":"no id","content":""}]"#.to_vec());

    let store = NoteStore::open(kv);
    assert!(store.is_empty());
    assert_eq!(store.last_issue().map(PersistIssue::code), Some("decode_failed"));
}

#[test]
fn unreadable_storage_loads_as_empty() {
    let mut kv = MemoryKvStore::new();
    kv.set_fail_reads(true);

    let mut store = NoteStore::open(kv);
    assert!(store.is_empty());
    assert!(matches!(store.take_issue(), Some(PersistIssue::Read(_))));
    assert!(store.last_issue().is_none());
}

#[test]
fn save_failure_keeps_memory_authoritative() {
    let mut kv = MemoryKvStore::new();
    kv.set_fail_writes(true);
    let mut store = NoteStore::open(kv);

    store.add("unsaved", "still visible");

    assert_eq!(titles(&store), vec!["unsaved"]);
    assert!(matches!(store.last_issue(), Some(PersistIssue::Write(_))));

    let mut kv = store.into_storage();
    assert!(kv.raw(NOTES_KEY).is_none());

    kv.set_fail_writes(false);
    let mut store = NoteStore::open(kv);
    store.add("saved", "");
    assert!(store.last_issue().is_none());
}

#[test]
fn corrupt_blob_is_replaced_by_next_mutation() {
    let mut kv = MemoryKvStore::new();
    kv.insert_raw(NOTES_KEY, b"garbage".to_vec());
    {
        let mut store = NoteStore::open(&mut kv);
        store.add("fresh", "");
        assert!(store.last_issue().is_none());
    }

    let reopened = NoteStore::open(&mut kv);
    assert_eq!(titles(&reopened), vec!["fresh"]);
}

#[test]
fn sqlite_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watermelon.sqlite3");

    let ids = {
        let conn = open_db(&path).unwrap();
        let mut store = NoteStore::open(SqliteKvStore::new(&conn));
        vec![store.add("one", "1"), store.add("two", "2")]
    };

    let conn = open_db(&path).unwrap();
    let store = NoteStore::open(SqliteKvStore::new(&conn));
    let reloaded: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(reloaded, ids);
}
