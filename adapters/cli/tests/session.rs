use std::{
    io::Write,
    process::{Command, Stdio},
};

fn run_with_input(input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sneak"))
        .args(["--no-color", "--frame-interval-ms", "1", "--seed", "11"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch sneak");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write requests");
    child.wait_with_output().expect("sneak exits")
}

/// Position of the player glyph in the last frame printed to stdout.
fn final_player_position(stdout: &str) -> Option<(usize, usize)> {
    let frame_start = stdout.rfind("Sneak (session")?;
    stdout[frame_start..]
        .lines()
        .skip(1)
        .enumerate()
        .find_map(|(row, line)| {
            line.chars()
                .position(|glyph| matches!(glyph, '^' | '<' | 'v' | '>'))
                .map(|column| (column, row))
        })
}

fn click_at_tile(column: u32, row: u32) -> String {
    format!("click {} {}\n", column * 16 + 8, row * 16 + 8)
}

#[test]
fn click_moves_the_player() {
    let output = run_with_input(&click_at_tile(20, 14));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(final_player_position(&stdout), Some((20, 14)));
}

#[test]
fn clicks_still_move_the_player_after_new_game_and_move() {
    let input = format!("n\nmove 20 15\n{}", click_at_tile(20, 14));
    let output = run_with_input(&input);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(final_player_position(&stdout), Some((20, 14)));
}

#[test]
fn quits_on_request() {
    let output = run_with_input("n\nq\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Sneak."));
}

#[test]
fn malformed_requests_are_reported_and_skipped() {
    let output = run_with_input("jump\nmove 1\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown request `jump`"));
    assert!(stderr.contains("missing argument `row`"));
}

#[test]
fn missing_config_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_sneak"))
        .args(["--config", "does/not/exist.toml"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to launch sneak");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read config"));
}
