use assert_cmd::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::process::Command;

#[test]
fn prints_a_bash_script() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lgm"));
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("_lgm()"));
}

#[test]
fn version_flag_prints_semver() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("lgm")).arg("--version").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let re = Regex::new(r"^lgm \d+\.\d+\.\d+").unwrap();
    assert!(re.is_match(&stdout), "unexpected version output: {stdout}");
}
