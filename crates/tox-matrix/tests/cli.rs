use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn run_tox_matrix(envs: &[(&str, &str)], args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_tox-matrix");
    Command::new(exe)
        .env_clear()
        .envs(envs.iter().copied())
        .args(args)
        .output()
        .expect("run tox-matrix")
}

fn parse_json_stdout(out: &Output) -> Value {
    serde_json::from_slice(&out.stdout).expect("parse stdout JSON")
}

fn job_names(matrix: &Value) -> Vec<String> {
    matrix["include"]
        .as_array()
        .expect("include[]")
        .iter()
        .map(|j| j["name"].as_str().expect("job.name").to_string())
        .collect()
}

fn assert_success(out: &Output) {
    assert_eq!(
        out.status.code(),
        Some(0),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

const LINUX_MACOS: &[(&str, &str)] = &[
    ("INPUT_MIN_PYTHON", "3.8"),
    ("INPUT_MAX_PYTHON", "3.9"),
    ("INPUT_PLATFORMS", "linux,macos"),
    ("INPUT_LINUX", "full"),
    ("INPUT_MACOS", "minmax"),
    ("INPUT_OTHER_NAMES", "lint"),
];

#[test]
fn json_flag_prints_matrix_from_action_inputs() {
    let out = run_tox_matrix(LINUX_MACOS, &["--json"]);
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(
        job_names(&v),
        vec!["lint", "py38", "py38-macos", "py39", "py39-macos"]
    );
    assert_eq!(v["include"][0]["python_version"], "3.9");
    assert_eq!(v["include"][2]["os"], "macos-13");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Generated 5 matrix entries."), "{stderr}");
    assert!(stderr.contains("Env var INPUT_MACOS=minmax"), "{stderr}");
}

#[test]
fn matrix_is_appended_to_github_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output_file = dir.path().join("output.txt");
    let mut envs: Vec<(&str, &str)> = LINUX_MACOS.to_vec();
    let output_str = output_file.to_str().expect("utf-8 path");
    envs.push(("GITHUB_OUTPUT", output_str));

    let out = run_tox_matrix(&envs, &[]);
    assert_success(&out);

    let written = std::fs::read_to_string(&output_file).expect("read GITHUB_OUTPUT");
    let value = written
        .strip_prefix("matrix=")
        .and_then(|s| s.strip_suffix('\n'))
        .expect("matrix=<json> line");
    let v: Value = serde_json::from_str(value).expect("parse matrix JSON");
    assert_eq!(job_names(&v).len(), 5);
}

#[test]
fn legacy_set_output_without_output_file() {
    let out = run_tox_matrix(&[("INPUT_OTHER_NAMES", "lint")], &[]);
    assert_success(&out);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.starts_with("::set-output name=matrix::{\"include\":["),
        "{stdout}"
    );
}

#[test]
fn flags_override_environment() {
    let out = run_tox_matrix(
        LINUX_MACOS,
        &["--json", "--platforms", "linux", "--max-python", "3.10"],
    );
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(job_names(&v), vec!["lint", "py38", "py39", "py310"]);
}

#[test]
fn duplicate_job_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output_file = dir.path().join("output.txt");
    let output_str = output_file.to_str().expect("utf-8 path");
    let envs = [
        ("INPUT_MIN_PYTHON", "3.8"),
        ("INPUT_MAX_PYTHON", "3.9"),
        ("INPUT_PLATFORMS", "linux"),
        ("INPUT_OTHER_NAMES", "py38:pytest"),
        ("GITHUB_OUTPUT", output_str),
    ];
    let out = run_tox_matrix(&envs, &[]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.starts_with("::error::Action failed due to "),
        "{stdout}"
    );
    assert!(stdout.contains("duplicate name py38"), "{stdout}");
    assert!(!Path::new(&output_file).exists());
}

#[test]
fn invalid_strategy_is_reported() {
    let out = run_tox_matrix(
        &[("INPUT_PLATFORMS", "windows"), ("INPUT_WINDOWS", "half")],
        &["--json"],
    );
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("invalid testing strategy for windows"), "{stdout}");
}

#[test]
fn multi_command_job_round_trips_through_cli() {
    let out = run_tox_matrix(
        &[
            ("INPUT_OTHER_NAMES", "lint\nall-macos:tox -e unit;tox -e integration"),
            ("INPUT_SKIP_EXPLODE", "1"),
            ("INPUT_PLATFORMS", "linux"),
        ],
        &["--json"],
    );
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(job_names(&v), vec!["all-macos", "lint"]);
    let all = &v["include"][0];
    assert_eq!(all["command"], "tox -e unit");
    assert_eq!(all["command2"], "tox -e integration");
    assert_eq!(all["os"], "macos-13");
}
