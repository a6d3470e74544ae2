use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = "App: Core, Logging\nCore: Utils\nLogging: Utils\nUtils:\n";

fn depviz(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depviz").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn manifest(dir: &TempDir) -> String {
    let path = dir.path().join("deps.txt");
    fs::write(&path, MANIFEST).unwrap();
    path.display().to_string()
}

#[test]
fn direct_dependencies_by_default() {
    let dir = TempDir::new().unwrap();
    let repo = manifest(&dir);

    depviz(&dir)
        .args(["--test-mode", "--repo", &repo, "--package", "App"])
        .assert()
        .success()
        .stdout("Direct dependencies of 'App':\n  1. Core\n  2. Logging\n");
}

#[test]
fn ascii_tree_flag_prints_tree() {
    let dir = TempDir::new().unwrap();
    let repo = manifest(&dir);

    depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "App", "--ascii-tree", "--charset", "ascii"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+-- Core\n|   \\-- Utils"))
        .stdout(predicate::str::contains("\\-- Logging\n    \\-- Utils"));
}

#[test]
fn load_order_subcommand() {
    let dir = TempDir::new().unwrap();
    let repo = manifest(&dir);

    depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "App", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Utils\n  2. Core\n  3. Logging\n  4. App"));
}

#[test]
fn output_file_receives_report() {
    let dir = TempDir::new().unwrap();
    let repo = manifest(&dir);
    let out = dir.path().join("out/diagram.puml");

    depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "App", "-o"])
        .arg(&out)
        .arg("plantuml")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote report"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"App\" --> \"Core\""));
}

#[test]
fn validation_errors_are_reported_together() {
    let dir = TempDir::new().unwrap();

    depviz(&dir)
        .args(["-t", "-r", "missing.txt", "--max-depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package name cannot be empty"))
        .stderr(predicate::str::contains("max depth must be a positive number"))
        .stderr(predicate::str::contains("test file not found: missing.txt"));
}

#[test]
fn unknown_root_reports_lookup_failure() {
    let dir = TempDir::new().unwrap();
    let repo = manifest(&dir);

    depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "Nope"])
        .assert()
        .success()
        .stdout("Direct dependencies of 'Nope':\n  (no dependencies)\n")
        .stderr(predicate::str::contains("Nope: lookup failed"));
}

#[test]
fn omitted_max_depth_walks_whole_graph() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chain.txt");
    fs::write(&path, "L0: L1\nL1: L2\nL2: L3\nL3: L4\nL4: L5\nL5:\n").unwrap();
    let repo = path.display().to_string();

    depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "L0", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("L5"))
        .stdout(predicate::str::contains("(...)").not());
}

#[test]
fn failed_lookup_reported_once_per_channel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.txt");
    fs::write(&path, "App: Core, Ghost\nCore:\n").unwrap();
    let repo = path.display().to_string();

    let output = depviz(&dir)
        .args(["-t", "-r", &repo, "-p", "App", "--log-level", "1", "tree"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mentions = stderr.lines().filter(|line| line.contains("Ghost")).count();
    assert_eq!(mentions, 2, "one log event and one status line:\n{}", stderr);
}
