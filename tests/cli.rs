use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn artplay_cmd() -> Command {
    Command::cargo_bin("artplay").expect("binary exists")
}

#[test]
fn artplay_help_prints_usage() {
    artplay_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3D stroke drawing core with grab-and-throw physics",
        ));
}

#[test]
fn no_flags_prints_controls() {
    artplay_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("artplay --demo"))
        .stdout(predicate::str::contains("undo: Ctrl+Z"));
}

#[test]
fn demo_reports_throw_and_cleanup() {
    let temp = TempDir::new().unwrap();

    artplay_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .arg("--demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed 3 strokes"))
        .stdout(predicate::str::contains("Thrown stroke"))
        .stdout(predicate::str::contains("Live meshes: 0, live bodies: 0"));
}

#[test]
fn demo_uses_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("artplay.toml");
    std::fs::write(&path, "[drawing]\nmax_strokes = 2\n").unwrap();

    artplay_cmd()
        .arg("--demo")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 evicted, 1 discarded)"));
}

#[test]
fn print_config_reflects_clamped_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("artplay.toml");
    std::fs::write(&path, "[drawing]\ntessellation = 500\n\n[throw]\nscale = 40.0\n").unwrap();

    artplay_cmd()
        .args(["--print-config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tessellation = 64"))
        .stdout(predicate::str::contains("scale = 40.0"));
}

#[test]
fn malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[drawing\nmax_strokes = ").unwrap();

    artplay_cmd()
        .args(["--demo", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn missing_config_file_fails() {
    let temp = TempDir::new().unwrap();

    artplay_cmd()
        .arg("--print-config")
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn schema_dump_is_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"throw\""))
        .stdout(predicate::str::contains("\"keybindings\""));
}
