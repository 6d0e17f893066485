use super::*;
use std::io::Read as _;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("store_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_back(store: &dyn DocumentStore, id: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut input = store.open_input(id).unwrap();
    input.read_to_end(&mut bytes).unwrap();
    bytes
}

#[test]
fn memory_store_publishes_only_on_commit() {
    let mut store = MemoryStore::new();
    {
        let mut out = store.open_output("doc").unwrap();
        out.write_all(b"hello").unwrap();
    }
    assert!(store.get("doc").is_none());
    assert!(store.open_input("doc").is_err());

    store.commit("doc").unwrap();
    assert_eq!(read_back(&store, "doc"), b"hello");
}

#[test]
fn memory_store_commit_without_output_fails() {
    let mut store = MemoryStore::new();
    let err = store.commit("doc").unwrap_err();
    assert_eq!(err.tag(), Some("store.nothing_staged"));
}

#[test]
fn fs_store_round_trips_through_staging() {
    let dir = scratch_dir("round_trip");
    let mut store = FsStore::new(&dir);
    {
        let mut out = store.open_output("nested/out.bin").unwrap();
        out.write_all(&[1, 2, 3]).unwrap();
        out.flush().unwrap();
    }
    assert!(!dir.join("nested/out.bin").exists());
    store.commit("nested/out.bin").unwrap();

    assert_eq!(read_back(&store, "nested/out.bin"), vec![1, 2, 3]);
}

#[test]
fn fs_store_rejects_escaping_ids() {
    let store = FsStore::new(scratch_dir("escape"));
    let err = store.open_input("../secret").err().unwrap();
    assert_eq!(err.tag(), Some("store.bad_id"));
}

#[test]
fn fs_store_missing_input_is_wrapped_io_error() {
    let store = FsStore::new(scratch_dir("missing"));
    let err = store.open_input("absent.bin").err().unwrap();
    assert_eq!(err.kind(), crate::foundation::error::ErrorKind::Other);
    assert!(err.to_string().contains("absent.bin"));
}
