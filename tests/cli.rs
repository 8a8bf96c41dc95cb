use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("provision-mysql");
    Command::new(path)
}

fn write_payloads(dir: &Path) -> [PathBuf; 3] {
    let paths = [
        dir.join("setup-mysql.ps1"),
        dir.join("mysql.zip"),
        dir.join("schema-install.sql"),
    ];
    for path in &paths {
        fs::write(path, "payload").unwrap();
    }
    paths
}

#[test]
fn help_and_version_flags_do_not_report_success() {
    let dir = tempdir().unwrap();
    for flag in ["--version", "-h"] {
        bin()
            .env("ARABIC_POETRY_INSTALL_LOG", dir.path().join("provision.log"))
            .env("SystemRoot", dir.path().join("NoWindows"))
            .arg(flag)
            .assert()
            .code(3)
            .stderr(contains("Missing provisioning payload(s)."));
    }
}

#[test]
fn leading_double_dash_is_the_script_path() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("provision.log");

    bin()
        .env("ARABIC_POETRY_INSTALL_LOG", &log)
        .args(["--", "a.zip", "b.sql"])
        .assert()
        .code(3);

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("Args: -- | a.zip | b.sql"));
    assert!(content.contains("Resolved setup-mysql.ps1: --"));
    assert!(content.contains("Resolved mysql.zip:       a.zip"));
    assert!(content.contains("Resolved schema SQL:      b.sql"));
}

#[test]
fn missing_payloads_exit_3_and_log_to_override() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("logs").join("provision.log");

    bin()
        .env("ARABIC_POETRY_INSTALL_LOG", &log)
        .args(["install", "a.ps1", "b.zip", "c.sql"])
        .assert()
        .code(3)
        .stderr(contains("Missing provisioning payload(s)."))
        .stderr(contains("(exists=false)"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("=== ArabicPoetry MySQL provisioning runner ==="));
    assert!(content.contains("Args: install | a.ps1 | b.zip | c.sql"));
    assert!(content.contains("Resolved mysql.zip:       b.zip"));
}

#[test]
fn missing_interpreter_exits_4() {
    let dir = tempdir().unwrap();
    let [script, archive, schema] = write_payloads(dir.path());

    bin()
        .env("ARABIC_POETRY_INSTALL_LOG", dir.path().join("provision.log"))
        .env("SystemRoot", dir.path().join("NoWindows"))
        .arg(&script)
        .arg(&archive)
        .arg(&schema)
        .assert()
        .code(4)
        .stderr(contains("powershell.exe not found at:"));
}

#[cfg(unix)]
#[test]
fn child_exit_code_becomes_process_exit_code() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let [script, archive, schema] = write_payloads(dir.path());
    let root = dir.path().join("Windows");
    let powershell = root
        .join("System32")
        .join("WindowsPowerShell")
        .join("v1.0")
        .join("powershell.exe");
    fs::create_dir_all(powershell.parent().unwrap()).unwrap();
    fs::write(&powershell, "#!/bin/sh\necho OK\nexit 42\n").unwrap();
    fs::set_permissions(&powershell, fs::Permissions::from_mode(0o755)).unwrap();
    let log = dir.path().join("provision.log");

    bin()
        .env("ARABIC_POETRY_INSTALL_LOG", &log)
        .env("SystemRoot", &root)
        .arg("Install")
        .arg(&script)
        .arg(&archive)
        .arg(&schema)
        .assert()
        .code(42);

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("--- PowerShell STDOUT ---\nOK\n"));
    assert!(content.contains("PowerShell exit code: 42"));
}
