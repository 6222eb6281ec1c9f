use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::io::Write;

/// Stand-in for a real chain tool: hands out sequential addresses from a
/// counter file and logs every invocation
#[allow(dead_code)]
const FAKE_CHAIN: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$@" >> "$dir/calls.log"
case "$1" in
  deployer)
    echo "0x0000000000000000000000000000000000000009"
    ;;
  deploy)
    if [ "$2" = "$FAKE_FAIL_ARTIFACT" ]; then
      echo "error: insufficient funds for gas" >&2
      exit 1
    fi
    n=$(cat "$dir/counter" 2>/dev/null || echo "${FAKE_FIRST_ADDRESS:-100}")
    echo $((n + 1)) > "$dir/counter"
    echo "waiting for confirmation of $2"
    printf '0x%040d\n' "$n"
    ;;
  call)
    if [ "$3" = "$FAKE_FAIL_METHOD" ]; then
      echo "error: execution reverted" >&2
      exit 1
    fi
    ;;
  *)
    exit 2
    ;;
esac
"#;

/// Write the fake chain script into `dir` and return its path
#[allow(dead_code)]
pub fn install_fake_chain(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-chain.sh");
    fs::write(&path, FAKE_CHAIN).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[allow(dead_code)]
pub fn chain_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[allow(dead_code)]
pub fn addr(n: u64) -> String {
    format!("0x{:040}", n)
}

/// Run the binary in `dir` with a clean environment for Shipyard variables
#[allow(dead_code)]
pub fn shipyard(dir: &Path, args: &[&str], envs: &[(&str, &str)], stdin: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shipyard"));
    cmd.current_dir(dir)
        .args(args)
        .env_remove("SHIPYARD_PLAN")
        .env_remove("SHIPYARD_LEDGER")
        .env_remove("SHIPYARD_CHAIN_CMD")
        .env_remove("SHIPYARD_BUILD_INFO")
        .env_remove("SHIPYARD_OUTPUT")
        .env_remove("SHIPYARD_EXPLORER_URL")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("failed to start shipyard");
    if let Some(text) = stdin {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(text.as_bytes())
            .unwrap();
    }
    drop(child.stdin.take());
    child.wait_with_output().expect("failed to wait for shipyard")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
