//! Lifecycle events emitted by RecordStore.

#![cfg(feature = "emitter")]

use std::sync::mpsc;
use std::time::Duration;

use flatfile_rust::{events, EventEmitter, InMemoryFilesystem, RecordStore, Schema};

fn listen(emitter: &mut EventEmitter, event: &str) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    emitter.on(event, move |id: String| {
        let _ = tx.send(id);
    });
    rx
}

#[test]
fn save_emits_saved_with_id() {
    let mut emitter = EventEmitter::new();
    let saved = listen(&mut emitter, events::SAVED);

    let store =
        RecordStore::new(InMemoryFilesystem::new(), Schema::new("id")).with_emitter(emitter);
    let mut alice = store.new_record().with("id", "alice");
    store.save(&mut alice).unwrap();

    let id = saved
        .recv_timeout(Duration::from_secs(1))
        .expect("saved listener never fired");
    assert_eq!(id, "alice");
}

#[test]
fn failed_save_emits_nothing() {
    let mut emitter = EventEmitter::new();
    let saved = listen(&mut emitter, events::SAVED);

    let store =
        RecordStore::new(InMemoryFilesystem::new(), Schema::new("id")).with_emitter(emitter);
    let mut nameless = store.new_record().with("age", 3);
    assert!(store.save(&mut nameless).is_err());

    assert!(saved.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn delete_duplicate_and_rename_emit() {
    let mut emitter = EventEmitter::new();
    let deleted = listen(&mut emitter, events::DELETED);
    let duplicated = listen(&mut emitter, events::DUPLICATED);
    let renamed = listen(&mut emitter, events::RENAMED);

    let store =
        RecordStore::new(InMemoryFilesystem::new(), Schema::new("id")).with_emitter(emitter);
    let mut alice = store.new_record().with("id", "alice");
    store.save(&mut alice).unwrap();

    let mut copy = store.duplicate(&alice, "alice_copy").unwrap();
    store.rename(&mut copy, "alicia").unwrap();
    store.delete(&alice).unwrap();

    let timeout = Duration::from_secs(1);
    assert_eq!(duplicated.recv_timeout(timeout).unwrap(), "alice_copy");
    assert_eq!(renamed.recv_timeout(timeout).unwrap(), "alicia");
    assert_eq!(deleted.recv_timeout(timeout).unwrap(), "alice");
}

#[test]
fn duplicate_emits_only_duplicated() {
    let mut emitter = EventEmitter::new();
    let saved = listen(&mut emitter, events::SAVED);
    let duplicated = listen(&mut emitter, events::DUPLICATED);

    let store =
        RecordStore::new(InMemoryFilesystem::new(), Schema::new("id")).with_emitter(emitter);
    let mut alice = store.new_record().with("id", "alice");
    store.save(&mut alice).unwrap();

    let timeout = Duration::from_secs(1);
    assert_eq!(saved.recv_timeout(timeout).unwrap(), "alice");

    store.duplicate(&alice, "alice_copy").unwrap();
    assert_eq!(duplicated.recv_timeout(timeout).unwrap(), "alice_copy");
    assert!(saved.recv_timeout(Duration::from_millis(200)).is_err());
}
