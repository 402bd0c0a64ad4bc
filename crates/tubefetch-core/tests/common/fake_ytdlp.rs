//! Stand-in yt-dlp for integration tests.
//!
//! Writes a small POSIX shell script that counts its invocations, records the
//! arguments of each run, fails the first `failures` runs with a yt-dlp style
//! error on stderr, and afterwards creates a file in the `-P` directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub struct FakeYtDlp {
    pub program: PathBuf,
    state_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FakeOptions {
    /// Number of leading runs that exit with status 1.
    pub failures: u32,
    /// Seconds to sleep before doing anything (for timeout tests).
    pub sleep_secs: u32,
}

/// Name of the file a successful run creates in the output dir.
pub const OUTPUT_FILE: &str = "Test_Video.mp4";

impl FakeYtDlp {
    pub fn install(dir: &Path, opts: FakeOptions) -> Self {
        let state_dir = dir.join("fake-state");
        fs::create_dir_all(&state_dir).unwrap();
        let program = dir.join("yt-dlp");
        let script = format!(
            r#"#!/bin/sh
state="{state}"
if [ {sleep} -gt 0 ]; then sleep {sleep}; fi
n=$(cat "$state/count" 2>/dev/null || echo 0)
n=$((n + 1))
echo "$n" > "$state/count"
printf '%s\n' "$@" > "$state/args-$n"
if [ "$n" -le {failures} ]; then
  echo "ERROR: [youtube] unable to download video data: HTTP Error 503: Service Unavailable" >&2
  exit 1
fi
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-P" ]; then out="$a"; fi
  prev="$a"
done
echo "[download] Destination: $out/{file}"
: > "$out/{file}"
exit 0
"#,
            state = state_dir.display(),
            sleep = opts.sleep_secs,
            failures = opts.failures,
            file = OUTPUT_FILE,
        );
        fs::write(&program, script).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
        Self { program, state_dir }
    }

    /// How many times the script has run.
    pub fn runs(&self) -> u32 {
        fs::read_to_string(self.state_dir.join("count"))
            .map(|s| s.trim().parse().unwrap())
            .unwrap_or(0)
    }

    /// Arguments of run `n` (1-based).
    pub fn args(&self, n: u32) -> Vec<String> {
        fs::read_to_string(self.state_dir.join(format!("args-{n}")))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
