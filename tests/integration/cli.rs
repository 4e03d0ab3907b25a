//! Binary behaviour against an isolated data directory

use predicates::prelude::*;

use super::common::cli::TestHome;

#[test]
fn test_commands_lists_one_console() {
    let home = TestHome::new();
    home.command()
        .args(["commands", "--context", "6"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[6] Orchestrator console\n"))
        .stdout(predicate::str::contains("    kubectl get pods -n myapp-prod"))
        .stdout(predicate::str::contains("docker").not());
}

#[test]
fn test_run_prints_transcript() {
    let home = TestHome::new();
    home.command()
        .args(["run", "--context", "2", "docker", "images"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$ docker images\n"))
        .stdout(predicate::str::contains(
            "openjdk      17     a1b2c3d4e5f6   3 weeks ago      274MB",
        ));
}

#[test]
fn test_run_hyphenated_command() {
    let home = TestHome::new();
    home.command()
        .args(["run", "--context", "2", "docker", "build", "-t", "myapp:1.0", "."])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Successfully tagged myapp:1.0\n"));
}

#[test]
fn test_run_unknown_command() {
    let home = TestHome::new();
    home.command()
        .args(["run", "--context", "3", "foo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Command not recognized in simulator. Try the suggested commands below!",
        ));
}

#[test]
fn test_first_run_writes_example_config() {
    let home = TestHome::new();
    home.command().args(["commands"]).assert().success();
    assert!(home.dir.path().join("config.toml").exists());
}

#[test]
fn test_progress_round_trip() {
    let home = TestHome::new();
    home.command()
        .args(["progress", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Challenge 1 completed (+100)"));

    home.command()
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100  Completed: 1/6 (17%)"))
        .stdout(predicate::str::contains("  1. done"))
        .stdout(predicate::str::contains("  2. active"));

    home.command()
        .args(["progress", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0  Completed: 0/6 (0%)"));
}

#[test]
fn test_progress_rejects_unknown_challenge() {
    let home = TestHome::new();
    home.command()
        .args(["progress", "complete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown challenge 9"));
}

#[test]
fn test_check_order() {
    let home = TestHome::new();
    home.command()
        .args(["check-order", "1", "2", "3", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🎉 Perfect! That's the correct order!"));

    home.command()
        .args(["check-order", "2", "1", "3", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Not quite right."));
}

#[test]
fn test_check_blanks() {
    let home = TestHome::new();
    home.command()
        .args(["check-blanks", "--expected", "FROM", "--expected", "EXPOSE", "from", " expose "])
        .assert()
        .success()
        .stdout(predicate::str::contains("🎉 All 2 answers correct!"));
}

#[test]
fn test_chart_file() {
    let home = TestHome::new();
    home.command()
        .args(["chart", "values-yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# values.yaml\nreplicaCount: 2"));

    home.command()
        .args(["chart", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found"));
}

#[test]
fn test_shell_plays_piped_commands_before_exiting() {
    let home = TestHome::new();
    home.realtime_command()
        .args(["shell", "--context", "2"])
        .write_stdin("docker images\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Container build console (console 2)\n"))
        .stdout(predicate::str::ends_with(
            "openjdk      17     a1b2c3d4e5f6   3 weeks ago      274MB\n",
        ));
}

#[test]
fn test_shell_exit_waits_for_running_sessions() {
    let home = TestHome::new();
    home.realtime_command()
        .args(["shell", "--context", "6"])
        .write_stdin("kubectl get svc -n myapp-prod\nfoo bar\nexit\nkubectl get pods -n myapp-prod\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("10.43.124.55"))
        .stdout(predicate::str::contains(
            "Command not recognized in simulator. Try the suggested commands below!",
        ))
        .stdout(predicate::str::contains("Running").not());
}

#[test]
fn test_check_answer() {
    let home = TestHome::new();
    home.command()
        .args(["check-answer", "3", "--correct", "3"])
        .assert()
        .success()
        .stdout("🎉 Correct! Great job!\n");

    home.command()
        .args(["check-answer", "1", "--correct", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Correct answer: option 3\n"))
        .stdout(predicate::str::contains("❌ Not quite."));
}
