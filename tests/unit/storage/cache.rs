use super::*;

#[test]
fn memory_cache_put_get_has() {
    let mut cache = MemoryCache::new();
    assert!(cache.is_empty());
    assert!(!cache.has("k"));
    assert_eq!(cache.get("k").unwrap(), None);

    cache.put("k", b"v1").unwrap();
    cache.put("k", b"v2").unwrap();
    assert!(cache.has("k"));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("k").unwrap(), Some(b"v2".to_vec()));
}

#[test]
fn fs_cache_persists_entries_as_files() {
    let dir = PathBuf::from("target").join("cache_unit").join("persist");
    let _ = std::fs::remove_dir_all(&dir);

    let mut cache = FsCache::new(&dir);
    assert!(!cache.has("00ff"));
    cache.put("00ff", b"bytes").unwrap();
    assert!(dir.join("00ff").is_file());

    let reopened = FsCache::new(&dir);
    assert!(reopened.has("00ff"));
    assert_eq!(reopened.get("00ff").unwrap(), Some(b"bytes".to_vec()));
}

#[test]
fn fs_cache_rejects_path_like_keys() {
    let mut cache = FsCache::new(PathBuf::from("target").join("cache_unit").join("keys"));
    let err = cache.put("../x", b"").unwrap_err();
    assert_eq!(err.tag(), Some("cache.bad_key"));
    assert!(!cache.has("a/b"));
}
