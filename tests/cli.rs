use std::io::Write;
use std::process::{Command, Output, Stdio};

const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

const LOOP: &str = ".#...\n.^..#\n#....\n...#.\n";

fn run_bin(bin: &str, input: &str, args: &[&str]) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn run_guard(input: &str, args: &[&str]) -> Output {
    run_bin(env!("CARGO_BIN_EXE_guard"), input, args)
}

#[test]
fn test_prints_steps_then_places() {
    let out = run_guard(SAMPLE, &[]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "44\n41\n");
}

#[test]
fn test_blocked_exits_cleanly() {
    let out = run_guard("#.\n^#\n", &[]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "0\n1\n");
}

#[test]
fn test_render_goes_to_stderr() {
    let out = run_guard(".#.\n.^.\n...\n", &["--render"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "1\n2\n");
    assert!(String::from_utf8(out.stderr).unwrap().contains(".X>"));
}

#[test]
fn test_bad_input_is_fatal() {
    for bad in ["...\n...\n", "..^\n..\n", ""] {
        let out = run_guard(bad, &[]);
        assert!(!out.status.success(), "accepted {bad:?}");
        assert!(out.stdout.is_empty());
    }
}

#[test]
fn test_reads_puzzle_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.txt");
    std::fs::write(&path, SAMPLE).unwrap();
    let out = run_guard("", &[path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "44\n41\n");
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-puzzle.txt");
    let out = run_guard("", &[path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8(out.stderr).unwrap().contains("reading puzzle from"));
}

#[test]
fn test_loop_exits_cleanly() {
    let out = run_guard(LOOP, &[]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "6\n6\n");
}

#[test]
fn test_print_walk_frames_then_report() {
    let out = run_bin(env!("CARGO_BIN_EXE_print_walk"), LOOP, &[]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with(".#...\n.^..#\n"));
    assert!(!stdout.contains("\n\n"), "blank line between frames:\n{stdout}");
    assert!(stdout.contains("turned >\n"));
    assert_eq!(stdout.lines().last(), Some("Looped after 6 steps, 6 distinct places"));
}
