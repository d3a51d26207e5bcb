//! Directory scanning integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use webready::{WebReadyError, scan_videos};

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, b"").expect("Failed to create file");
    path
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

#[test]
fn finds_videos_at_every_depth() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    let expected = vec![
        touch(root, "a.mp4"),
        touch(root, "nested/b.mkv"),
        touch(root, "nested/deeper/still/c.flv"),
    ];

    let found = scan_videos(root).expect("scan");
    assert_eq!(sorted(found), sorted(expected));
}

#[test]
fn ignores_unrecognized_extensions() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    let video = touch(root, "clip.webm");
    touch(root, "notes.txt");
    touch(root, "poster.jpg");
    touch(root, "clip.webm.part");
    touch(root, "README");

    let found = scan_videos(root).expect("scan");
    assert_eq!(found, vec![video]);
}

#[test]
fn matches_extensions_case_insensitively() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    let expected = vec![touch(root, "UPPER.MP4"), touch(root, "Mixed.MoV")];

    let found = scan_videos(root).expect("scan");
    assert_eq!(sorted(found), sorted(expected));
}

#[test]
fn skips_directories_named_like_videos() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    fs::create_dir_all(root.join("project.mov")).expect("Failed to create directory");
    let inner = touch(root, "project.mov/take.avi");

    let found = scan_videos(root).expect("scan");
    assert_eq!(found, vec![inner]);
}

#[test]
fn empty_directory_yields_nothing() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let found = scan_videos(temporary_directory.path()).expect("scan");
    assert!(found.is_empty());
}

#[test]
fn missing_root_is_a_scan_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temporary_directory.path().join("does-not-exist");

    match scan_videos(&missing) {
        Err(WebReadyError::Scan { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Scan error, got: {other:?}"),
    }
}

#[test]
fn scan_error_message_names_the_directory() {
    let error = scan_videos("this_directory_does_not_exist").unwrap_err();
    let error_message = error.to_string();
    assert!(
        error_message.contains("this_directory_does_not_exist"),
        "Error message should mention the directory: {error_message}",
    );
}

#[cfg(unix)]
#[test]
fn includes_symlinks_to_video_files() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();
    let target = touch(root, "store/clip.mp4");
    let library = root.join("library");
    fs::create_dir_all(&library).expect("Failed to create directory");
    let linked = library.join("linked.mp4");
    std::os::unix::fs::symlink(&target, &linked).expect("Failed to create symlink");

    let found = scan_videos(&library).expect("scan");
    assert_eq!(found, vec![linked]);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();
    let readable = touch(root, "readable.mov");
    touch(root, "locked/hidden.mp4");
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))
        .expect("Failed to lock directory");

    let result = scan_videos(root);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
        .expect("Failed to unlock directory");

    // Privileged users can still read the locked directory.
    let found = result.expect("scan should not fail on a nested directory");
    assert!(found.contains(&readable), "{found:?}");
}

#[test]
fn root_file_is_not_a_candidate() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let file = touch(temporary_directory.path(), "single.mp4");

    let found = scan_videos(&file).expect("scan");
    assert!(found.is_empty(), "{found:?}");
}
