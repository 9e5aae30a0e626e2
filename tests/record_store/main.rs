//! Integration tests for RecordStore over the in-memory filesystem.


use flatfile_rust::{
    Context, FileRecord, Filesystem, Filters, InMemoryFilesystem, Record, RecordError,
    RecordStore, Schema,
};
use people::{person_rules, Draft, Person, Post};
use serde_json::{json, Value};

fn people_store() -> RecordStore<InMemoryFilesystem> {
    RecordStore::new(InMemoryFilesystem::new(), Schema::of::<Person>())
}

fn save_person(store: &RecordStore<InMemoryFilesystem>, person: &Person) -> Record {
    let mut record = Record::from_serialize(Schema::of::<Person>(), person).unwrap();
    store.save(&mut record).unwrap();
    record
}

#[test]
fn derived_schemas() {
    assert_eq!(Person::PK, "id");
    assert_eq!(Person::EXT, "json");
    assert_eq!(Post::PK, "postSlug");
    assert_eq!(Post::EXT, "post");

    let posts = RecordStore::new(InMemoryFilesystem::new(), Schema::of::<Post>());
    assert_eq!(posts.resolve_filename("hello").unwrap(), "hello.post");
}

#[test]
fn alice_round_trip() {
    let store = RecordStore::new(InMemoryFilesystem::new(), Schema::new("id"));

    let mut alice = store.new_record().with("id", "alice").with("age", 30);
    store.save(&mut alice).unwrap();

    let stored: Value =
        serde_json::from_slice(&store.filesystem().read("alice.json").unwrap()).unwrap();
    assert_eq!(stored, json!({"id": "alice", "age": 30}));

    let loaded = store.get_item("alice").unwrap();
    assert_eq!(loaded, alice);
    assert_eq!(loaded.context(), Context::Update);
}

#[test]
fn traversal_is_blocked_before_filesystem_access() {
    let store = people_store();
    store.filesystem().put("secret.json", b"{}").unwrap();

    for id in ["../etc/passwd", "../secret", "secret.json", "a/b", ""] {
        assert!(
            matches!(store.get_item(id), Err(RecordError::NotFound { .. })),
            "{:?} should be rejected",
            id
        );
    }
}

#[test]
fn typed_records_round_trip() {
    let store = people_store();
    let bob = Person::new("bob", "Bob", 41).with_role("admin");
    save_person(&store, &bob);

    let loaded: Person = store.get_item("bob").unwrap().deserialize_into().unwrap();
    assert_eq!(loaded, bob);
}

#[test]
fn posts_keyed_on_renamed_field() {
    let store = RecordStore::new(InMemoryFilesystem::new(), Schema::of::<Post>());
    let post = Post {
        slug: "hello_world".into(),
        title: "Hello".into(),
    };
    let mut record = Record::from_serialize(Schema::of::<Post>(), &post).unwrap();
    store.save(&mut record).unwrap();

    assert!(store.filesystem().has("hello_world.post").unwrap());
    let loaded: Post = store
        .get_item("hello_world")
        .unwrap()
        .deserialize_into()
        .unwrap();
    assert_eq!(loaded, post);
}

#[test]
fn drafts_keyed_on_camel_case_field() {
    assert_eq!(Draft::PK, "draftSlug");

    let store = RecordStore::new(InMemoryFilesystem::new(), Schema::of::<Draft>());
    let draft = Draft {
        draft_slug: "intro".into(),
        word_count: 120,
    };
    let mut record = Record::from_serialize(Schema::of::<Draft>(), &draft).unwrap();
    store.save(&mut record).unwrap();

    assert_eq!(record.id(), Some("intro"));
    let loaded: Draft = store.get_item("intro").unwrap().deserialize_into().unwrap();
    assert_eq!(loaded, draft);
}

#[test]
fn validation_depends_on_context() {
    let fs = InMemoryFilesystem::new();
    let store = RecordStore::new(fs.clone(), Schema::new("id")).with_validator(person_rules);

    let mut record = store
        .new_record()
        .with("id", "carol")
        .with("name", "")
        .with("age", 200);
    let err = store.save(&mut record).unwrap_err();
    assert_eq!(
        err.messages(),
        [
            "name is required".to_string(),
            "age is out of range".to_string(),
            "password is required on create".to_string(),
        ]
    );
    assert!(fs.list_contents("").unwrap().is_empty());

    record.set("name", "Carol");
    record.set("age", 33);
    record.set("password", "hunter2");
    store.save(&mut record).unwrap();

    // Updates no longer need the password.
    let mut loaded = store.get_item("carol").unwrap();
    loaded.remove("password");
    store.save(&mut loaded).unwrap();
    assert!(!store.get_item("carol").unwrap().has("password"));
}

#[test]
fn collection_in_listing_order_with_filters() {
    let store = people_store();
    save_person(&store, &Person::new("dave", "Dave", 20).with_role("user"));
    save_person(&store, &Person::new("alice", "Alice", 30).with_role("admin"));
    save_person(&store, &Person::new("carol", "Carol", 30).with_role("admin"));
    store.filesystem().put("README.md", b"# people").unwrap();

    let everyone = store.get_collection(&Filters::new()).unwrap();
    let ids: Vec<_> = everyone.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["alice", "carol", "dave"]);

    let admins_of_thirty: Vec<Person> = store
        .get_collection(&Filters::new().eq("role", "admin").eq("age", 30))
        .unwrap()
        .iter()
        .map(|r| r.deserialize_into().unwrap())
        .collect();
    assert_eq!(admins_of_thirty.len(), 2);

    let nobody = store
        .get_collection(&Filters::new().eq("role", "owner"))
        .unwrap();
    assert!(nobody.is_empty());
}

#[test]
fn collection_rereads_files_each_call() {
    let store = people_store();
    save_person(&store, &Person::new("erin", "Erin", 25));
    assert_eq!(store.get_collection(&Filters::new()).unwrap().len(), 1);

    store
        .filesystem()
        .put("erin.json", br#"{"id":"erin","name":"Erin","age":26}"#)
        .unwrap();
    let records = store.get_collection(&Filters::new()).unwrap();
    assert_eq!(records[0].get("age"), Some(&json!(26)));
}

#[test]
fn load_then_delete() {
    let store = people_store();
    save_person(&store, &Person::new("frank", "Frank", 50));

    let frank = store.get_item("frank").unwrap();
    assert!(store.delete(&frank).unwrap());
    assert!(matches!(
        store.get_item("frank"),
        Err(RecordError::FileNotFound { .. })
    ));
}

#[test]
fn duplicate_then_rename() {
    let store = people_store();
    let grace = save_person(&store, &Person::new("grace", "Grace", 36));

    let mut copy = store.duplicate(&grace, "grace_2").unwrap();
    assert_eq!(copy.get("name"), Some(&json!("Grace")));

    store.rename(&mut copy, "gracie").unwrap();
    let ids: Vec<String> = store
        .get_collection(&Filters::new())
        .unwrap()
        .iter()
        .filter_map(|r| r.id().map(str::to_string))
        .collect();
    assert_eq!(ids, vec!["grace", "gracie"]);

    let gracie: Person = store.get_item("gracie").unwrap().deserialize_into().unwrap();
    assert_eq!(gracie.id, "gracie");
}

#[test]
fn malformed_file_is_a_serde_error() {
    let store = people_store();
    store.filesystem().put("broken.json", b"[1, 2").unwrap();
    assert!(matches!(
        store.get_item("broken"),
        Err(RecordError::Serde(_))
    ));
}

#[test]
fn store_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RecordStore<InMemoryFilesystem>>();
}
