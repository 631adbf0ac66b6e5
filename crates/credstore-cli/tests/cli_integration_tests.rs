//! CLI integration tests
//!
//! Run the `credstore` binary against scratch stores and check exit status
//! and output.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn credstore(dir: &Path, backend: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_credstore"))
        .current_dir(dir)
        .args(["--backend", backend])
        .args(["--database", dir.join("users.db").to_str().unwrap()])
        .args(["--document-root", dir.join("docs").to_str().unwrap()])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_register_login_search() {
    for backend in ["sqlite", "document"] {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        for name in ["john", "joanna", "mark"] {
            let output = credstore(dir, backend, &["register", name, "--password", "hunter22"]);
            assert!(output.status.success(), "{}: {}", backend, stderr(&output));
        }

        let ok = credstore(dir, backend, &["login", "john", "--password", "hunter22"]);
        assert!(ok.status.success());
        assert!(stdout(&ok).contains("Login successful"));

        let bad = credstore(dir, backend, &["login", "john", "--password", "hunter23"]);
        assert_eq!(bad.status.code(), Some(1));

        let unknown = credstore(dir, backend, &["login", "nobody", "--password", "hunter22"]);
        assert_eq!(unknown.status.code(), Some(1));
        assert_eq!(stderr(&bad).lines().last(), stderr(&unknown).lines().last());

        let search = credstore(dir, backend, &["search", "jo"]);
        assert!(search.status.success());
        assert_eq!(stdout(&search), "joanna\njohn\n");
    }
}

#[test]
fn test_duplicate_registration_reports_username_taken() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let first = credstore(dir, "sqlite", &["register", "alice", "--password", "secret"]);
    assert!(first.status.success());

    let second = credstore(dir, "sqlite", &["register", "alice", "--password", "other1"]);
    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("Error: username taken"));
}

#[test]
fn test_confirmation_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let output = credstore(
        temp_dir.path(),
        "document",
        &["register", "alice", "--password", "secret", "--confirm", "secreT"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("passwords do not match"));
}

#[test]
fn test_password_from_stdin_never_logged() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let mut child = Command::new(env!("CARGO_BIN_EXE_credstore"))
        .current_dir(dir)
        .args(["--database", dir.join("users.db").to_str().unwrap()])
        .args(["register", "alice"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"s3cr3t-value\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stderr(&output).contains("s3cr3t-value"));
    assert!(!stdout(&output).contains("s3cr3t-value"));

    let login = credstore(dir, "sqlite", &["login", "alice", "--password", "s3cr3t-value"]);
    assert!(login.status.success());
}

#[test]
fn test_product_add_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let add = credstore(dir, "sqlite", &["product", "add", "Caderno", "3", "12.5"]);
    assert!(add.status.success(), "{}", stderr(&add));

    let invalid = credstore(dir, "sqlite", &["product", "add", "Caneta", "-1", "2"]);
    assert_eq!(invalid.status.code(), Some(1));
    assert!(stderr(&invalid).contains("invalid quantity"));

    let list = credstore(dir, "sqlite", &["product", "list"]);
    assert!(list.status.success());
    let listing = stdout(&list);
    assert!(listing.contains("Caderno"));
    assert!(listing.contains("R$ 12,50"));
    assert!(!listing.contains("Caneta"));
}

#[test]
fn test_config_file_selects_backend() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let config_path = dir.join("credstore.toml");
    std::fs::write(
        &config_path,
        "backend = \"document\"\ndocument_root = \"from-config\"\nlog_format = \"json\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_credstore"))
        .current_dir(dir)
        .args(["--config", config_path.to_str().unwrap()])
        .args(["register", "alice", "--password", "secret"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(dir.join("from-config").join("users").is_dir());
    assert!(!dir.join("users.db").exists());
}

#[test]
fn test_unreadable_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_credstore"))
        .current_dir(temp_dir.path())
        .args(["--config", "missing.toml", "search", "a"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: cannot load configuration from missing.toml"));
    assert!(!stderr(&output).contains("see the log"));
}
