use std::fs;

use alien_invasion::high_score::*;

#[test]
fn missing_file_loads_as_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileHighScore::new(tmp.path().join("nope.txt"));
    assert_eq!(store.load(), 0);
    assert!(matches!(store.read(), Err(HighScoreError::Io { .. })));
}

#[test]
fn garbage_file_loads_as_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("score.txt");
    fs::write(&path, "not a number").unwrap();
    let store = FileHighScore::new(&path);
    assert_eq!(store.load(), 0);
    assert!(matches!(store.read(), Err(HighScoreError::Parse { .. })));
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("score.txt");
    fs::write(&path, "  170\n").unwrap();
    assert_eq!(FileHighScore::new(&path).load(), 170);
}

#[test]
fn save_overwrites_with_plain_integer() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("score.txt");
    let mut store = FileHighScore::new(&path);
    store.save(250).unwrap();
    store.save(90).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "90");
    assert_eq!(store.load(), 90);
}

#[test]
fn save_into_missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileHighScore::new(tmp.path().join("missing").join("score.txt"));
    let err = store.save(10).unwrap_err();
    assert!(err.to_string().contains("score.txt"), "{err}");
}
