use watermelon_core::db::open_db_in_memory;
use watermelon_core::{
    Appearance, KvStore, MemoryKvStore, NoteStore, SettingsStore, SqliteKvStore, DARK_MODE_KEY,
    NOTES_KEY,
};

#[test]
fn dark_mode_defaults_to_light() {
    let settings = SettingsStore::new(MemoryKvStore::new());
    assert!(!settings.is_dark_mode());
    assert_eq!(settings.appearance(), Appearance::Light);
}

#[test]
fn toggle_flips_and_persists() {
    let mut kv = MemoryKvStore::new();
    {
        let mut settings = SettingsStore::new(&mut kv);
        assert!(settings.toggle_dark_mode().unwrap());
    }
    assert_eq!(kv.raw(DARK_MODE_KEY), Some(&b"true"[..]));

    let mut settings = SettingsStore::new(&mut kv);
    assert_eq!(settings.appearance(), Appearance::Dark);
    assert!(!settings.toggle_dark_mode().unwrap());
    assert!(!settings.is_dark_mode());
}

#[test]
fn corrupt_flag_reads_as_light() {
    let mut kv = MemoryKvStore::new();
    kv.insert_raw(DARK_MODE_KEY, b"maybe".to_vec());

    let settings = SettingsStore::new(kv);
    assert!(!settings.is_dark_mode());
}

#[test]
fn write_failure_is_returned() {
    let mut kv = MemoryKvStore::new();
    kv.set_fail_writes(true);

    let mut settings = SettingsStore::new(kv);
    assert!(settings.set_dark_mode(true).is_err());
    assert!(!settings.is_dark_mode());
}

#[test]
fn flag_and_notes_use_separate_keys() {
    let conn = open_db_in_memory().unwrap();
    let mut notes = NoteStore::open(SqliteKvStore::new(&conn));
    let mut settings = SettingsStore::new(SqliteKvStore::new(&conn));

    notes.add("note", "");
    settings.set_dark_mode(true).unwrap();

    let kv = SqliteKvStore::new(&conn);
    assert_eq!(
        kv.keys().unwrap(),
        vec![DARK_MODE_KEY.to_string(), NOTES_KEY.to_string()]
    );
    assert_eq!(kv.get(DARK_MODE_KEY).unwrap().as_deref(), Some(&b"true"[..]));
    assert_eq!(notes.len(), 1);
}
