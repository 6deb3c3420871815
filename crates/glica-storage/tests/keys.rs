use uuid::Uuid;

use glica_storage::keys;

#[test]
fn history_key_round_trips() {
    let id = Uuid::new_v4();
    let key = keys::history_entry(id);
    assert!(key.starts_with(keys::HISTORY_PREFIX));
    assert!(key.ends_with(".json"));
    assert_eq!(keys::parse_history_entry(&key), Some(id));
}

#[test]
fn foreign_keys_are_rejected() {
    assert_eq!(keys::parse_history_entry("history/notes.txt"), None);
    assert_eq!(keys::parse_history_entry("history/.json"), None);
    assert_eq!(
        keys::parse_history_entry("reports/3f0c8f8e-0000-0000-0000-000000000000.json"),
        None
    );
    assert_eq!(keys::parse_history_entry(""), None);
}
