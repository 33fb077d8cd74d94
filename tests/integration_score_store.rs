use assert_matches::assert_matches;
use astra::score_store::{partition_sort, ScoreStore, SCOREBOARD_CAPACITY};
use tempfile::tempdir;

#[test]
fn top_ten_truncation_worked_example() {
    let dir = tempdir().unwrap();
    let store = ScoreStore::with_path(dir.path().join("highscores.txt"));

    for score in [3u32, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9] {
        store.record(score).unwrap();
    }

    assert_eq!(store.load(), vec![9, 9, 9, 8, 7, 6, 5, 5, 5, 4]);
}

#[test]
fn store_never_exceeds_capacity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscores.txt");
    let store = ScoreStore::with_path(&path);

    for score in 0..50u32 {
        store.record(score).unwrap();
        assert!(store.load().len() <= SCOREBOARD_CAPACITY);
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), SCOREBOARD_CAPACITY);
}

#[test]
fn load_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = ScoreStore::with_path(dir.path().join("highscores.txt"));

    for score in [8u32, 2, 2, 11] {
        store.record(score).unwrap();
    }

    assert_eq!(store.load(), store.load());
}

#[test]
fn round_trip_persistence_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscores.txt");

    let before = {
        let store = ScoreStore::with_path(&path);
        for score in [14u32, 3, 99, 7, 7, 21] {
            store.record(score).unwrap();
        }
        store.load()
        // store dropped here, simulating process termination
    };

    let reopened = ScoreStore::with_path(&path);
    assert_eq!(reopened.load(), before);
}

#[test]
fn low_score_leaves_full_board_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscores.txt");
    let store = ScoreStore::with_path(&path);

    for score in 100..110u32 {
        store.record(score).unwrap();
    }
    let before = store.load();
    let file_before = std::fs::read_to_string(&path).unwrap();

    store.record(1).unwrap();

    assert_eq!(store.load(), before);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), file_before);
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscores.txt");
    std::fs::write(&path, "42\ngarbage\n\n17\n3.5\n8\n").unwrap();

    let store = ScoreStore::with_path(&path);
    assert_eq!(store.load(), vec![42, 17, 8]);

    // Recording normalizes the file back to valid lines only.
    store.record(30).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "42\n30\n17\n8\n");
}

#[test]
fn write_failure_surfaces_as_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    // Parent of the store path is a regular file, so the write must fail.
    let store = ScoreStore::with_path(blocker.join("highscores.txt"));
    assert_matches!(store.record(5), Err(_));
    assert!(store.load().is_empty());
}

#[test]
fn partition_sort_matches_standard_descending_sort() {
    let inputs: Vec<Vec<u32>> = vec![
        vec![],
        vec![1],
        vec![2, 2, 2],
        vec![5, 4, 3, 2, 1],
        vec![1, 2, 3, 4, 5],
        vec![9, 0, 2, 9, 4, 4, 4, 1, 7, 100, 0],
    ];

    for input in inputs {
        let mut expected = input.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(partition_sort(&input), expected, "input {input:?}");
    }
}
