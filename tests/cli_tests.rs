use std::io::Write;
use std::process::Command;

const BINARY_NAME: &str = "kleenexp";

/// Run the CLI with arguments and return its output.
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--bin", BINARY_NAME, "--"])
        .args(args)
        .output()
        .expect("failed to execute command")
}

/// Run the CLI, feeding `stdin_input` on standard input.
fn run_cli_with_stdin(args: &[&str], stdin_input: &str) -> std::process::Output {
    let mut cmd = Command::new("cargo")
        .args(["run", "--bin", BINARY_NAME, "--"])
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .expect("failed to spawn command");

    if let Some(stdin) = cmd.stdin.as_mut() {
        stdin
            .write_all(stdin_input.as_bytes())
            .expect("failed to write to stdin");
    }

    cmd.wait_with_output().expect("failed to read output")
}

#[test]
fn compiles_a_source_argument() {
    let output = run_cli(&["[#digit]"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "\\d");
}

#[test]
fn reads_source_from_stdin_when_omitted() {
    let output = run_cli_with_stdin(&[], "[#digit]");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "\\d");
}

#[test]
fn ecmascript_flavor_changes_string_anchor() {
    let output = run_cli(&["--flavor", "ecmascript", "[#start_string]"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "^");
}

#[test]
fn unknown_macro_exits_nonzero_with_message() {
    let output = run_cli(&["[#nope]"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown macro"));
}

#[test]
fn debug_flag_prints_trace_to_stderr() {
    let output = run_cli(&["--debug", "[#digit]"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("COMPILE START"));
}
