use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("preview_core_cli").unwrap();
    cmd.env("PREVIEW_CORE_CLI_SCRIPT", "1")
        .env("PREVIEW_CORE_HOME", home);
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("model pixel-7\ndark on\nclasses\nexit\n")
        .assert()
        .success()
        .stdout(contains("[initial] device-frame"))
        .stdout(contains("[interaction] device-frame obsidian frame-pixel-7"))
        .stdout(contains("device-frame obsidian frame-pixel-7 size-6-3 scaled dark"));

    let settings = std::fs::read_to_string(home.path().join("settings.json")).unwrap();
    assert!(settings.contains("pixel-7"), "selection was persisted");
}

#[test]
fn persisted_selection_survives_a_restart() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("model galaxy-s8\nrotate portrait\nexit\n")
        .assert()
        .success();

    cli(home.path())
        .write_stdin("status\nexit\n")
        .assert()
        .success()
        .stdout(contains("Galaxy S8"))
        .stdout(contains("portrait"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("clases\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `clases`"))
        .stdout(contains("Suggestion: `classes`?"));
}

#[test]
fn unknown_model_suggests_the_closest_name() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("model pixel7\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown model `pixel7`"))
        .stdout(contains("Closest match: `pixel-7`"));
}

#[test]
fn apply_accepts_raw_json_payloads() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("apply {\"model\": \"iphone-8\", \"dark_mode\": true}\nstatus\nexit\n")
        .assert()
        .success()
        .stdout(contains("[programmatic] device-frame silver frame-iphone-8"))
        .stdout(contains("iPhone 8"))
        .stdout(contains("Dark mode:   on"));
}

#[test]
fn reset_reports_when_already_at_defaults() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("reset\nexit\n")
        .assert()
        .success()
        .stdout(contains("Already at defaults."));
}
