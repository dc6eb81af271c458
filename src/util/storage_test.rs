use super::*;

fn record() -> (Rc<MemoryStore>, DurableRecord) {
    let store = Rc::new(MemoryStore::new());
    let record = DurableRecord::new(store.clone());
    (store, record)
}

fn jane() -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        full_name: "Jane Roe".to_owned(),
        email: "jane@example.com".to_owned(),
    }
}

#[test]
fn memory_store_round_trips_items() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set_item("k", "v");
    assert_eq!(store.get_item("k"), Some("v".to_owned()));
    store.remove_item("k");
    assert_eq!(store.get_item("k"), None);
}

#[test]
fn token_empty_string_counts_as_absent() {
    let (_, record) = record();
    record.set_token("");
    assert_eq!(record.token(), None);
    record.set_token("t1");
    assert_eq!(record.token(), Some("t1".to_owned()));
}

#[test]
fn mirror_identity_writes_user_id_and_profile() {
    let (_, record) = record();
    record.mirror_identity(&jane());
    assert_eq!(record.user_id(), Some("u1".to_owned()));
    assert_eq!(record.current_user(), Some(jane()));
}

#[test]
fn corrupt_profile_blob_reads_as_absent() {
    let (store, record) = record();
    store.set_item("currentUser", "{not json");
    assert_eq!(record.current_user(), None);
}

#[test]
fn clear_removes_all_three_keys() {
    let (store, record) = record();
    record.set_token("t1");
    record.mirror_identity(&jane());
    store.set_item("unrelated", "keep");
    assert_eq!(store.len(), 4);

    record.clear();
    assert_eq!(record.token(), None);
    assert_eq!(record.user_id(), None);
    assert_eq!(record.current_user(), None);
    assert_eq!(store.get_item("unrelated"), Some("keep".to_owned()));
}
