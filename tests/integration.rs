use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_npdoc")))
}

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(path).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_inserts_docstrings() {
    let assert = cmd()
        .write_stdin(fixture("defaults.py"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("defaults.expected.py"));
}

#[test]
fn stdin_mode_renders_container_hints() {
    let assert = cmd().write_stdin(fixture("hints.py")).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("hints.expected.py"));
}

#[test]
fn stdin_mode_class_constructor() {
    let assert = cmd()
        .write_stdin(fixture("class_constructor.py"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("class_constructor.expected.py"));
}

#[test]
fn stdin_mode_documented_file_unchanged() {
    let assert = cmd()
        .write_stdin(fixture("documented.py"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("documented.py"));
}

#[test]
fn stdin_mode_is_idempotent() {
    let assert = cmd()
        .write_stdin(fixture("defaults.expected.py"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("defaults.expected.py"));
}

#[test]
fn stdin_mode_invalid_syntax_fails() {
    cmd()
        .write_stdin("def broken(:\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid Python syntax"));
}

#[test]
fn stdin_mode_custom_indentation() {
    let assert = cmd()
        .args(["--indentation-spaces", "2"])
        .write_stdin("def f(a):\n  return a\n")
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let expected = concat!(
        "def f(a):\n",
        "  \"\"\"\n",
        "  FIXME\n",
        "\n",
        "  Parameters\n",
        "  ----------\n",
        "  a : FIXME\n",
        "      FIXME\n",
        "\n",
        "  \"\"\"\n",
        "  return a\n",
    );
    assert_eq!(output, expected);
}

// -- file mode --

#[test]
fn file_mode_rewrites_in_place_with_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.py");
    fs::write(&path, fixture("defaults.py")).unwrap();

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("processed"));

    let backup = dir.path().join("defaults.py--");
    assert_eq!(fs::read_to_string(&backup).unwrap(), fixture("defaults.py"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        fixture("defaults.expected.py")
    );
}

#[test]
fn file_mode_no_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.py");
    fs::write(&path, fixture("defaults.py")).unwrap();

    cmd().arg("--no-backup").arg(&path).assert().success();

    assert!(!dir.path().join("defaults.py--").exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        fixture("defaults.expected.py")
    );
}

#[test]
fn file_mode_skips_unparseable_files() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.py");
    let fine = dir.path().join("fine.py");
    fs::write(&broken, "def broken(:\n").unwrap();
    fs::write(&fine, fixture("defaults.py")).unwrap();

    cmd()
        .arg(&broken)
        .arg(&fine)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: skipping"));

    // the broken file is untouched, the fine one is processed
    assert_eq!(fs::read_to_string(&broken).unwrap(), "def broken(:\n");
    assert_eq!(
        fs::read_to_string(&fine).unwrap(),
        fixture("defaults.expected.py")
    );
}

// -- dir mode --

#[test]
fn dir_mode_recurses_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("pkg").join("sub");
    fs::create_dir_all(&nested).unwrap();
    let top = dir.path().join("top.py");
    let deep = nested.join("deep.py");
    fs::write(&top, fixture("defaults.py")).unwrap();
    fs::write(&deep, fixture("hints.py")).unwrap();

    cmd()
        .args(["--dir", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("top.py").and(predicate::str::contains("deep.py")));

    assert_eq!(
        fs::read_to_string(&top).unwrap(),
        fixture("defaults.expected.py")
    );
    assert_eq!(
        fs::read_to_string(&deep).unwrap(),
        fixture("hints.expected.py")
    );
    assert!(top.with_file_name("top.py--").exists());
}

#[test]
fn dir_mode_unknown_directory_fails() {
    cmd()
        .args(["--dir", "/no/such/directory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown directory"));
}

#[test]
fn dir_mode_ignores_other_file_types() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not python\n").unwrap();

    cmd()
        .args(["--dir", dir.path().to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&notes).unwrap(), "not python\n");
    assert!(!dir.path().join("notes.txt--").exists());
}
