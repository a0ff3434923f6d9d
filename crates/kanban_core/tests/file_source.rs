use kanban_core::{Board, BoardError, FileDataSource, Project};
use serde_json::json;
use std::fs;

#[test]
fn board_saves_to_and_reloads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    fs::write(
        &path,
        json!({
            "clients": [{ "id": 1, "name": "Acme" }],
            "projects": [{ "id": 10, "name": "Site", "clientID": 1 }],
            "activeProjects": [10]
        })
        .to_string(),
    )
    .unwrap();

    let mut board = Board::open(FileDataSource::new(&path)).unwrap();
    board.add_project(Project::new(11, "Blog")).unwrap();
    board.mark_project_active(11).unwrap();
    board.save().unwrap();

    let reloaded = Board::open(FileDataSource::new(&path)).unwrap();
    assert!(reloaded.is_active_project(10));
    assert!(reloaded.is_active_project(11));
    assert_eq!(reloaded.source().path(), path.as_path());
}

#[test]
fn load_from_switches_the_bound_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    fs::write(&first, json!({ "projects": [{ "id": 1, "name": "A" }] }).to_string()).unwrap();
    fs::write(&second, json!({ "projects": [{ "id": 2, "name": "B" }] }).to_string()).unwrap();

    let mut board = Board::open(FileDataSource::new(&first)).unwrap();
    board.load_from(FileDataSource::new(&second)).unwrap();
    assert!(board.has_project(2));
    assert!(!board.has_project(1));

    board.save().unwrap();
    let saved = fs::read_to_string(&second).unwrap();
    assert!(saved.contains("\"B\""));
}

#[test]
fn missing_and_empty_files_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Board::open(FileDataSource::new(&missing)),
        Err(BoardError::Source(_))
    ));

    let empty = dir.path().join("empty.json");
    fs::write(&empty, "").unwrap();
    match Board::open(FileDataSource::new(&empty)) {
        Err(BoardError::EmptySource { source }) => assert!(source.ends_with("empty.json")),
        other => panic!("unexpected result: {other:?}"),
    }
}
