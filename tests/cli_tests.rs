#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_seed_and_delete_post() {
    run_cli("seed\ndelete 2\nquit\n")
        .success()
        .stdout(str_contains("Loaded 5 demo posts."))
        .stdout(str_contains("Deleted post 2."));
}

#[test]
fn cli_reports_validation_errors_on_add() {
    run_cli("add 2024-13-40 09:00 text Broken date\nquit\n")
        .success()
        .stdout(str_contains("invalid date '2024-13-40'"));
}

#[test]
fn cli_delete_of_missing_post_reports_not_found() {
    run_cli("seed\ndelete 99\nquit\n")
        .success()
        .stdout(str_contains("post 99 not found"));
}

#[test]
fn cli_month_navigation_changes_the_grid_header() {
    run_cli("seed\nmonth 2024-10\nnext\nprev\nquit\n")
        .success()
        .stdout(str_contains("October 2024"))
        .stdout(str_contains("November 2024"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "seed\nsave json {}\nadd 2024-10-30 08:00 text Temp post\nload json {}\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Posts loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output.split("Posts loaded from").last().unwrap_or_default();
    assert!(
        !after_reload.contains("Temp post"),
        "post added after the save should not survive the reload:\n{}",
        after_reload
    );
    assert!(
        after_reload.contains("Team building"),
        "seeded posts should be back after the reload"
    );
}
