//! Delete and purge tests.

use std::fs;

use sourcemod_pipeline::{Filter, delete, discover};
use tempfile::TempDir;

#[test]
fn test_delete_and_purge_cascade() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("classes");
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::create_dir_all(root.join("keep")).unwrap();
    fs::write(root.join("a/b/c/FooTemplate.class"), "").unwrap();
    fs::write(root.join("keep/BarTemplate.class"), "").unwrap();
    fs::write(root.join("keep/Bar.class"), "").unwrap();

    let filter = Filter::new(["**/*Template.class"], Vec::<String>::new(), true).unwrap();
    let files = discover(std::slice::from_ref(&root), &filter);
    assert_eq!(files.len(), 2);

    let outcome = delete(&files, true);

    assert_eq!(outcome.deleted.len(), 2);
    assert!(outcome.failed.is_empty());
    assert!(!root.join("a").exists());
    assert!(root.join("keep/Bar.class").exists());
    assert!(!root.join("keep/BarTemplate.class").exists());
    // c, b and a are emptied in turn; keep and the root still hold entries.
    assert_eq!(outcome.purged, 3);
    assert!(root.exists());
}

#[test]
fn test_delete_without_purge_keeps_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();
    fs::write(temp.path().join("a/b/Gone.class"), "").unwrap();

    let filter = Filter::new(Vec::<String>::new(), Vec::<String>::new(), false).unwrap();
    let files = discover(&[temp.path().to_path_buf()], &filter);
    let outcome = delete(&files, false);

    assert_eq!(outcome.deleted.len(), 1);
    assert_eq!(outcome.purged, 0);
    assert!(temp.path().join("a/b").is_dir());
}

#[test]
fn test_purge_climbs_past_emptied_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("outer/classes");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("Only.class"), "").unwrap();
    fs::write(temp.path().join("marker"), "").unwrap();

    let filter = Filter::new(Vec::<String>::new(), Vec::<String>::new(), false).unwrap();
    let files = discover(std::slice::from_ref(&root), &filter);
    let outcome = delete(&files, true);

    assert!(!root.exists());
    assert!(!temp.path().join("outer").exists());
    assert!(temp.path().join("marker").exists());
    assert_eq!(outcome.purged, 2);
}
