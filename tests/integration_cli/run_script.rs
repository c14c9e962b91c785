use std::fs;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::tempdir;

const SPIN_SCRIPT: &str = r#"
def spin():
    n = 0
    for i in range(100000):
        for j in range(100000):
            n += 1
    return n

spin()
"#;

fn anvil() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_black-anvil"));
    cmd.env("RUST_LOG", "off")
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    cmd
}

#[test]
fn run_exits_after_script_timeout() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("spin.star");
    fs::write(&script, SPIN_SCRIPT).expect("write script");

    let mut child = anvil()
        .env("ANVIL_SCRIPT_TIMEOUT_MS", "200")
        .arg("run")
        .arg(&script)
        .spawn()
        .expect("spawn black-anvil");

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait().expect("poll child") {
            break status;
        }
        if started.elapsed() > Duration::from_secs(20) {
            let _ = child.kill();
            panic!("black-anvil run still alive 20s after a 200ms timeout");
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .expect("stdout piped")
        .read_to_string(&mut stdout)
        .expect("read stdout");
    assert!(!status.success());
    assert!(stdout.starts_with("Running...\n"), "{stdout}");
    assert!(stdout.contains("Error: E-ANVIL-0604"), "{stdout}");
}

#[test]
fn run_prints_result_of_quick_script() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("sum.star");
    fs::write(&script, "1+1").expect("write script");

    let output = anvil().arg("run").arg(&script).output().expect("run black-anvil");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Running...\n2\n");
}
