use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Mutex, MutexGuard};

use social_schema::diagram::{DiagramRenderer, DotRenderer};
use social_schema::{render_er, AppError, Catalog, DiagramConfig};

// Serializes tests that spawn processes, so no child inherits a script's
// open write handle (ETXTBSY).
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn lock_spawn() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Writes an executable stand-in for `dot`. It is called as
/// `dot -T<fmt> -o <path>`, so `$3` is the output path.
fn fake_dot(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-dot");
    fs::write(&path, format!("#!/bin/sh\ncat > /dev/null\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn graphviz_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[test]
fn text_formats_are_written_without_graphviz() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::social();

    for name in ["diagram.dot", "diagram.er", "diagram.mmd", "schema.json"] {
        let config = DiagramConfig::default().with_output(dir.path().join(name));
        render_er(&catalog, &config).unwrap();

        let written = fs::read_to_string(&config.output).unwrap();
        assert!(!written.is_empty(), "{name}");
    }

    let dot = fs::read_to_string(dir.path().join("diagram.dot")).unwrap();
    assert_eq!(dot, DotRenderer.render(&catalog));
}

#[test]
fn json_dump_describes_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default().with_output(dir.path().join("schema.json"));
    render_er(&Catalog::social(), &config).unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&fs::read(&config.output).unwrap()).unwrap();
    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 5);

    let users = tables.iter().find(|t| t["name"] == "users").unwrap();
    let username = users["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "username")
        .unwrap();
    assert_eq!(username["unique"], true);
    assert_eq!(username["sql_type"]["kind"], "varchar");
    assert_eq!(username["sql_type"]["length"], 50);
}

#[test]
fn png_is_rendered_when_graphviz_is_installed() {
    let _lock = lock_spawn();
    if !graphviz_available() {
        eprintln!("skipping: graphviz `dot` not found");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default().with_output(dir.path().join("diagram.png"));
    render_er(&Catalog::social(), &config).unwrap();

    let bytes = fs::read(&config.output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn unwritable_destination_is_an_error() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let config = DiagramConfig::default().with_output(missing.join("diagram.dot"));
    let err = render_er(&Catalog::social(), &config).unwrap_err();
    assert!(matches!(err, AppError::Io(_)), "{err:?}");

    // Without graphviz the spawn fails, with it dot cannot open the file.
    let config = DiagramConfig::default().with_output(missing.join("diagram.png"));
    assert!(render_er(&Catalog::social(), &config).is_err());
    assert!(!missing.exists());
}

#[test]
fn missing_graphviz_is_an_error() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default()
        .with_output(dir.path().join("diagram.png"))
        .with_dot_binary(dir.path().join("not-dot"));

    let err = render_er(&Catalog::social(), &config).unwrap_err();
    assert!(matches!(err, AppError::GraphvizMissing { .. }), "{err:?}");
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default().with_output(dir.path().join("diagram.txt"));

    let err = render_er(&Catalog::social(), &config).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedFormat(_)));
}

#[test]
fn binary_reports_success_and_failure() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_social-schema"))
        .current_dir(dir.path())
        .env("PATH", dir.path())
        .output()
        .unwrap();

    // No dot on PATH: the failure line is printed and the exit status is non-zero.
    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "There was a problem generating the diagram"
    );

    if graphviz_available() {
        let output = Command::new(env!("CARGO_BIN_EXE_social-schema"))
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            "Success! Check the diagram.png file"
        );
        assert!(fs::metadata(dir.path().join("diagram.png")).unwrap().len() > 0);
    }
}

#[test]
fn image_from_renderer_output_is_accepted() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default()
        .with_output(dir.path().join("diagram.png"))
        .with_dot_binary(fake_dot(dir.path(), r#"printf '\211PNG fake' > "$3""#));

    render_er(&Catalog::social(), &config).unwrap();

    let bytes = fs::read(&config.output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn empty_renderer_output_is_an_error() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default()
        .with_output(dir.path().join("diagram.png"))
        .with_dot_binary(fake_dot(dir.path(), r#": > "$3""#));

    let err = render_er(&Catalog::social(), &config).unwrap_err();
    assert!(matches!(err, AppError::EmptyOutput(ref p) if *p == config.output), "{err:?}");
}

#[test]
fn renderer_exiting_cleanly_without_output_is_an_error() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default()
        .with_output(dir.path().join("diagram.svg"))
        .with_dot_binary(fake_dot(dir.path(), "exit 0"));

    let err = render_er(&Catalog::social(), &config).unwrap_err();
    assert!(matches!(err, AppError::EmptyOutput(_)), "{err:?}");
}

#[test]
fn renderer_failure_carries_status_and_stderr() {
    let _lock = lock_spawn();
    let dir = tempfile::tempdir().unwrap();
    let config = DiagramConfig::default()
        .with_output(dir.path().join("diagram.png"))
        .with_dot_binary(fake_dot(dir.path(), "echo 'syntax error in line 1' >&2\nexit 3"));

    let err = render_er(&Catalog::social(), &config).unwrap_err();
    match err {
        AppError::Graphviz { status, stderr } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "syntax error in line 1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.output.exists());
}
