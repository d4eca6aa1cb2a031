use anyhow::Result;
use logsift::session::{
    MENU_NEW_SEARCH, MSG_FINISHED, MSG_HIT, MSG_INVALID_CHOICE, MSG_NO_HIT, PROMPT_LOG_PATH,
    PROMPT_SEARCH,
};
use logsift::{Rejection, Session, SessionConfig, SessionEnd, SiftError};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Run {
    end: std::result::Result<SessionEnd, SiftError>,
    console: String,
}

fn run_session(output_root: &Path, script: &[&str]) -> Run {
    let mut input = script.join("\n");
    input.push('\n');

    let config = SessionConfig::default()
        .with_output_root(output_root)
        .with_color(false);
    let mut session = Session::new(Cursor::new(input.into_bytes()), Vec::new(), config);
    let end = session.run();
    let console = String::from_utf8(session.into_output()).expect("console output is UTF-8");
    Run { end, console }
}

fn create_log(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path.to_str().expect("temp path is UTF-8").to_string())
}

/// Every file under `dir`, recursively
fn output_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(output_files(&path)?);
        } else {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_timestamp_file(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    path.extension().and_then(|e| e.to_str()) == Some("txt")
        && stem.len() == 14
        && stem.chars().all(|c| c.is_ascii_digit())
}

#[test]
fn test_search_writes_matches_and_exits() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "ERROR start\nINFO ok\nERROR stop\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "ERROR", "3"]);
    assert_eq!(run.end?, SessionEnd::Exited);

    let files = output_files(&out_root)?;
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert!(is_timestamp_file(file), "{}", file.display());
    assert_eq!(
        file.parent(),
        Some(out_root.join("app.log").join("ERROR").as_path())
    );
    assert_eq!(
        fs::read_to_string(file)?,
        "Search String: ERROR\nERROR startERROR stop"
    );

    assert!(run.console.contains(PROMPT_LOG_PATH));
    assert!(run.console.contains(PROMPT_SEARCH));
    assert!(run.console.contains(MSG_HIT));
    assert!(run.console.contains(MSG_FINISHED));
    Ok(())
}

#[test]
fn test_empty_search_string_is_a_hit() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "ERROR start\nINFO ok\nERROR stop\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "", "3"]);
    assert_eq!(run.end?, SessionEnd::Exited);
    assert!(run.console.contains(MSG_HIT));

    let files = output_files(&out_root)?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].parent(), Some(out_root.join("app.log").as_path()));
    assert_eq!(
        fs::read_to_string(&files[0])?,
        "Search String: \nERROR startINFO okERROR stop"
    );
    Ok(())
}

#[test]
fn test_no_hit_still_writes_header() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "INFO ok\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "PANIC", "3"]);
    assert_eq!(run.end?, SessionEnd::Exited);
    assert!(run.console.contains(MSG_NO_HIT));
    assert!(run.console.contains(MSG_FINISHED));

    let files = output_files(&out_root)?;
    assert_eq!(fs::read_to_string(&files[0])?, "Search String: PANIC\n");
    Ok(())
}

#[test]
fn test_forbidden_characters_skip_search_directory() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "GET /a/b 200\nGET /c 404\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "a/b", "3"]);
    assert_eq!(run.end?, SessionEnd::Exited);

    let files = output_files(&out_root)?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].parent(), Some(out_root.join("app.log").as_path()));
    Ok(())
}

#[test]
fn test_rejected_paths_reprompt_with_first_reason() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.txt");
    let notes = create_log(&dir, "notes.txt", "not a log")?;
    let latin1 = dir.path().join("latin1.log");
    fs::write(&latin1, b"caf\xe9\n")?;
    let log = create_log(&dir, "app.log", "ERROR start\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(
        &out_root,
        &[
            missing.to_str().unwrap(),
            notes.as_str(),
            latin1.to_str().unwrap(),
            log.as_str(),
            "ERROR",
            "3",
        ],
    );
    assert_eq!(run.end?, SessionEnd::Exited);

    assert_eq!(run.console.matches(PROMPT_LOG_PATH).count(), 4);
    assert_eq!(run.console.matches(&Rejection::NotFound.to_string()).count(), 1);
    assert_eq!(
        run.console
            .matches(&Rejection::WrongExtension.to_string())
            .count(),
        1
    );
    assert_eq!(run.console.matches(&Rejection::NotUtf8.to_string()).count(), 1);
    assert!(!run.console.contains(&Rejection::Invalid.to_string()));
    Ok(())
}

#[test]
fn test_new_search_reuses_file_and_change_file_reprompts() -> Result<()> {
    let dir = tempdir()?;
    let app = create_log(&dir, "app.log", "ERROR start\nWARN slow\n")?;
    let db = create_log(&dir, "db.log", "WARN lock\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(
        &out_root,
        &[
            app.as_str(),
            "ERROR",
            "1",
            "WARN",
            "2",
            db.as_str(),
            "WARN",
            "3",
        ],
    );
    assert_eq!(run.end?, SessionEnd::Exited);

    assert_eq!(run.console.matches(PROMPT_LOG_PATH).count(), 2);
    assert_eq!(run.console.matches(PROMPT_SEARCH).count(), 3);
    assert_eq!(run.console.matches(MENU_NEW_SEARCH).count(), 3);

    assert_eq!(output_files(&out_root.join("app.log").join("ERROR"))?.len(), 1);
    assert_eq!(output_files(&out_root.join("app.log").join("WARN"))?.len(), 1);
    let db_files = output_files(&out_root.join("db.log"))?;
    assert_eq!(db_files.len(), 1);
    assert_eq!(fs::read_to_string(&db_files[0])?, "Search String: WARN\nWARN lock");
    Ok(())
}

#[test]
fn test_invalid_menu_choice_then_exit() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "INFO ok\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "INFO", "9", "3"]);
    assert_eq!(run.end?, SessionEnd::Exited);
    assert_eq!(run.console.matches(MSG_INVALID_CHOICE).count(), 1);
    Ok(())
}

#[test]
fn test_input_closed_after_search() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "INFO ok\n")?;
    let out_root = dir.path().join("output");

    let run = run_session(&out_root, &[log.as_str(), "INFO"]);
    assert_eq!(run.end?, SessionEnd::InputClosed);
    assert_eq!(output_files(&out_root)?.len(), 1);
    Ok(())
}

#[test]
fn test_unwritable_output_root_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let log = create_log(&dir, "app.log", "ERROR start\n")?;
    let blocker = dir.path().join("output");
    fs::write(&blocker, "a plain file")?;

    let run = run_session(&blocker, &[log.as_str(), "ERROR", "3"]);
    let err = run.end.expect_err("output root is a file");
    assert!(matches!(err, SiftError::CreateDir { .. }));
    assert!(!run.console.contains(MSG_FINISHED));
    Ok(())
}

#[test]
fn test_non_utf8_console_path_is_rejected_not_fatal() -> Result<()> {
    let dir = tempdir()?;
    let config = SessionConfig::default()
        .with_output_root(dir.path().join("output"))
        .with_color(false);
    let mut session = Session::new(Cursor::new(b"caf\xe9.log\n".to_vec()), Vec::new(), config);

    assert_eq!(session.run()?, SessionEnd::InputClosed);
    assert_eq!(session.stats().paths_rejected, 1);

    let console = String::from_utf8(session.into_output())?;
    assert_eq!(console.matches(&Rejection::NotFound.to_string()).count(), 1);
    assert_eq!(console.matches(PROMPT_LOG_PATH).count(), 2);
    Ok(())
}
