//! Tests for the catalog registry and schema loader

use std::fs;
use std::sync::Arc;

use tempfile::tempdir;

use super::*;
use crate::records::FieldDef;
use crate::storage::PAGE_SIZE;
use crate::types::{FieldType, DEFAULT_STRING_LEN};

fn sample_desc() -> TupleDesc {
    TupleDesc::new(vec![
        FieldDef::new("id", FieldType::Int),
        FieldDef::new("name", FieldType::Str(DEFAULT_STRING_LEN)),
    ])
    .unwrap()
}

fn open_file(dir: &std::path::Path, name: &str) -> Arc<HeapFile> {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; PAGE_SIZE]).unwrap();
    Arc::new(HeapFile::open(&path, sample_desc()).unwrap())
}

#[test]
fn registered_table_resolves_id_schema_file_and_pkey() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let file = open_file(dir.path(), "users.dat");

    catalog.register_table(Arc::clone(&file), "users", Some("id"));

    let id = catalog.table_id("users").unwrap();
    assert_eq!(id, file.id());
    assert_eq!(*catalog.tuple_desc(id).unwrap(), sample_desc());
    assert_eq!(catalog.file(id).unwrap().id(), file.id());
    assert_eq!(catalog.table_name(id).unwrap(), "users");
    assert_eq!(catalog.primary_key(id), Some("id".to_string()));
}

#[test]
fn unknown_names_and_ids_are_not_found() {
    let catalog = Catalog::new();

    assert!(catalog.table_id("missing").is_err());
    assert!(catalog.file(42).is_err());
    assert!(catalog.tuple_desc(42).is_err());
    assert!(catalog.table_name(42).is_err());
    assert_eq!(catalog.primary_key(42), None);
}

#[test]
fn second_primary_key_for_a_file_is_ignored() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let file = open_file(dir.path(), "users.dat");

    catalog.register_table(Arc::clone(&file), "users", Some("id"));
    catalog.register_table(Arc::clone(&file), "users", Some("name"));

    assert_eq!(catalog.primary_key(file.id()), Some("id".to_string()));
}

#[test]
fn empty_primary_key_registers_nothing() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let file = open_file(dir.path(), "users.dat");

    catalog.register_table(Arc::clone(&file), "users", Some(""));

    assert_eq!(catalog.primary_key(file.id()), None);
}

#[test]
fn reregistering_a_name_replaces_the_mapping() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let old = open_file(dir.path(), "old.dat");
    let new = open_file(dir.path(), "new.dat");

    catalog.register_table(Arc::clone(&old), "t", None);
    catalog.register_table(Arc::clone(&new), "t", None);

    assert_eq!(catalog.table_id("t").unwrap(), new.id());
    assert_eq!(catalog.table_ids().len(), 1);
}

#[test]
fn table_ids_follow_registration_order_and_restart_per_call() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let a = open_file(dir.path(), "a.dat");
    let b = open_file(dir.path(), "b.dat");
    let c = open_file(dir.path(), "c.dat");

    catalog.register_table(Arc::clone(&a), "a", None);
    catalog.register_table(Arc::clone(&b), "b", None);
    catalog.register_table(Arc::clone(&c), "c", None);

    let expected = vec![a.id(), b.id(), c.id()];
    assert_eq!(catalog.table_ids(), expected);
    assert_eq!(catalog.table_ids(), expected);
}

#[test]
fn clear_drops_everything_and_is_idempotent() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new();
    let file = open_file(dir.path(), "users.dat");
    catalog.register_table(Arc::clone(&file), "users", Some("id"));

    catalog.clear();
    catalog.clear();

    assert!(catalog.table_id("users").is_err());
    assert_eq!(catalog.primary_key(file.id()), None);
    assert!(catalog.table_ids().is_empty());
}

#[test]
fn concurrent_registration_and_lookup_need_no_external_locking() {
    let dir = tempdir().unwrap();
    let catalog = Arc::new(Catalog::new());

    let files: Vec<_> = (0..8)
        .map(|i| open_file(dir.path(), &format!("t{}.dat", i)))
        .collect();

    let handles: Vec<_> = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let catalog = Arc::clone(&catalog);
            let file = Arc::clone(file);
            std::thread::spawn(move || {
                let name = format!("t{}", i);
                catalog.register_table(file, &name, Some("id"));
                catalog.table_id(&name).unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(catalog.table_ids().len(), 8);
}

#[test]
fn load_schema_registers_tables_with_types_and_pkeys() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("schema.txt"),
        "users(id int pk, name string)\norders(id int, note string)\n",
    )
    .unwrap();
    fs::write(dir.path().join("users.dat"), vec![0u8; PAGE_SIZE]).unwrap();
    fs::write(dir.path().join("orders.dat"), "").unwrap();

    let catalog = Catalog::new();
    catalog.load_schema(dir.path().join("schema.txt")).unwrap();

    let users = catalog.table_id("users").unwrap();
    let desc = catalog.tuple_desc(users).unwrap();
    assert_eq!(desc.field_count(), 2);
    assert_eq!(desc.field_name(0).unwrap(), "id");
    assert_eq!(desc.field_type(0).unwrap(), FieldType::Int);
    assert_eq!(
        desc.field_type(1).unwrap(),
        FieldType::Str(DEFAULT_STRING_LEN)
    );
    assert_eq!(catalog.primary_key(users), Some("id".to_string()));

    let orders = catalog.table_id("orders").unwrap();
    assert_eq!(catalog.primary_key(orders), None);
    assert_eq!(catalog.file(orders).unwrap().page_count(), 0);
}

#[test]
fn load_schema_accepts_mixed_case_types() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schema.txt"), "users(id INT pk, name String)").unwrap();
    fs::write(dir.path().join("users.dat"), "").unwrap();

    let catalog = Catalog::new();
    catalog.load_schema(dir.path().join("schema.txt")).unwrap();

    assert!(catalog.table_id("users").is_ok());
}

#[test]
fn load_schema_fails_on_malformed_line() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schema.txt"), "users id int").unwrap();

    let catalog = Catalog::new();
    let result = catalog.load_schema(dir.path().join("schema.txt"));

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("schema.txt:1"));
}

#[test]
fn load_schema_fails_on_unknown_type() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schema.txt"), "users(id bigint)").unwrap();

    let catalog = Catalog::new();
    let result = catalog.load_schema(dir.path().join("schema.txt"));

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("unknown type"));
}

#[test]
fn load_schema_fails_on_unknown_annotation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schema.txt"), "users(id int unique)").unwrap();

    let catalog = Catalog::new();
    let result = catalog.load_schema(dir.path().join("schema.txt"));

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("unknown annotation"));
}

#[test]
fn load_schema_fails_when_data_file_is_missing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schema.txt"), "users(id int)").unwrap();

    let catalog = Catalog::new();
    assert!(catalog.load_schema(dir.path().join("schema.txt")).is_err());
}
