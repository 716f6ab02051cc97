//! 세션 파일 흐름 통합 테스트.
//!
//! 입력 → 로드 편집 → 저장 → 다시 열기 → 이력 전환을 크레이트 경계를 넘어 검증한다.

use retime_app::{LoadCheck, RetimeSession};
use retime_core::config::AppConfig;
use retime_core::mod_note::ModNoteTemplate;
use retime_core::models::LoadInterval;
use tempfile::TempDir;

fn session() -> RetimeSession {
    RetimeSession::new(AppConfig::default_config())
}

#[test]
fn enter_loads_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("any%.json");

    let mut session = session();
    session.set_start("0").unwrap();
    session.set_end("7200").unwrap();
    assert_eq!(session.add_load(100, 160, false).unwrap(), LoadCheck::Added);
    assert_eq!(
        session.displays(),
        ("2:00.000".to_string(), "1:59.000".to_string())
    );

    session.save_as(&path).unwrap();
    assert_eq!(session.file_path(), Some(path.as_path()));

    let mut reopened = RetimeSession::new(AppConfig::default_config());
    reopened.open(&path).unwrap();
    assert_eq!(reopened.time(), session.time());
    assert_eq!(reopened.mod_note(), session.mod_note());
}

#[test]
fn save_overwrites_current_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");

    let mut session = session();
    session.set_end("600").unwrap();
    session.save_as(&path).unwrap();

    session.add_load(0, 60, false).unwrap();
    session.save().unwrap();

    let mut reopened = RetimeSession::new(AppConfig::default_config());
    reopened.open(&path).unwrap();
    assert_eq!(reopened.time().loads(), [LoadInterval::new(0, 60)]);
}

#[test]
fn history_tracks_previous_files() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let mut session = session();
    session.set_end("3600").unwrap();
    session.save_as(&first).unwrap();

    session.set_end("7200").unwrap();
    session.save_as(&second).unwrap();
    assert_eq!(session.history().get(0), Some(first.as_path()));

    session.open_from_history(0).unwrap();
    assert_eq!(session.file_path(), Some(first.as_path()));
    assert_eq!(session.time().end_frame(), 3600);
    assert_eq!(session.history().get(0), Some(second.as_path()));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn new_time_retires_current_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");

    let mut session = session();
    session.set_end("900").unwrap();
    session.save_as(&path).unwrap();

    session.new_time();
    assert!(session.file_path().is_none());
    assert_eq!(session.time().end_frame(), 0);
    assert_eq!(session.history().iter().collect::<Vec<_>>(), [path.as_path()]);
}

#[test]
fn batch_delete_keeps_remaining_order() {
    let mut session = session();
    session.set_end("10000").unwrap();
    for start in [0, 100, 200, 300] {
        session.add_load(start, start + 50, false).unwrap();
    }

    let removed = session.delete_loads(&[2, 0, 2]).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(
        session.time().loads(),
        [LoadInterval::new(100, 150), LoadInterval::new(300, 350)]
    );

    session.edit_load(1, None, Some(400)).unwrap();
    assert_eq!(session.time().loads()[1], LoadInterval::new(300, 400));

    session.clear_loads();
    assert!(session.time().loads().is_empty());
}

#[test]
fn configured_template_and_precision() {
    let mut config = AppConfig::default_config();
    config.retime.precision = 2;
    config.mod_note.format = ModNoteTemplate::new("{time_without_loads} / {fps}");

    let mut session = RetimeSession::new(config);
    session.set_framerate("30").unwrap();
    session.set_end("95").unwrap();
    session.add_load(0, 5, false).unwrap();

    assert_eq!(session.mod_note(), "03.000 / 30");
    assert_eq!(session.load_list(), ["1: 0.17"]);
}

#[test]
fn session_file_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");

    let mut session = session();
    session.set_framerate("59.94").unwrap();
    session.set_end("1000").unwrap();
    session.add_load(10, 20, false).unwrap();
    session.save_as(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "start_frame": 0,
            "end_frame": 1000,
            "framerate": "59.94",
            "loads": [[10, 20]]
        })
    );
}
