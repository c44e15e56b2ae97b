//! Launching the external benchmark executable.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::sweep::TrialParams;

/// Argument the benchmark recognises as "call madvise on the allocation".
pub const ADVISE_MARKER: &str = "madvise";

/// Captured output of one finished invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs one benchmark invocation to completion.
///
/// Implementations return both captured streams whatever the exit status was.
/// An `Err` means the invocation could not happen at all and aborts the sweep.
pub trait BenchmarkRunner {
    fn run(&self, params: &TrialParams) -> io::Result<RawOutput>;
}

/// Positional arguments for one invocation: strategy id, byte count and the
/// advise marker (empty string when advise is off).
pub fn benchmark_args(params: &TrialParams) -> [String; 3] {
    [
        params.strategy.to_string(),
        params.bytes.to_string(),
        if params.advise {
            ADVISE_MARKER.to_string()
        } else {
            String::new()
        },
    ]
}

/// Spawns the real benchmark executable as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    executable: PathBuf,
}

impl ProcessRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl BenchmarkRunner for ProcessRunner {
    fn run(&self, params: &TrialParams) -> io::Result<RawOutput> {
        // Blocks until exit; no timeout, a hung benchmark hangs the sweep.
        let output = Command::new(&self.executable)
            .args(benchmark_args(params))
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                io::Error::new(
                    err.kind(),
                    format!("failed to run {}: {err}", self.executable.display()),
                )
            })?;

        if !output.status.success() {
            log::debug!(
                "{} exited with {} for strategy {}",
                self.executable.display(),
                output.status,
                params.strategy
            );
        }

        Ok(RawOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(advise: bool) -> TrialParams {
        TrialParams {
            strategy: 3,
            bytes: 1_048_576,
            advise,
        }
    }

    #[test]
    fn advise_flag_maps_to_marker_or_empty() {
        assert_eq!(benchmark_args(&params(true)), ["3", "1048576", "madvise"]);
        assert_eq!(benchmark_args(&params(false)), ["3", "1048576", ""]);
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_captures_stdout() {
        let runner = ProcessRunner::new("echo");
        let out = runner.run(&params(true)).unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "3 1048576 madvise\n");
        assert!(out.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_returns_stderr_despite_failed_exit() {
        // `sh 3 ...` tries to open a script named "3" and complains on stderr.
        let runner = ProcessRunner::new("sh");
        let out = runner.run(&params(false)).unwrap();
        assert!(!out.stderr.is_empty());
    }

    #[test]
    fn missing_executable_is_an_io_error() {
        let runner = ProcessRunner::new("./definitely-not-a-benchmark-binary");
        let err = runner.run(&params(false)).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-benchmark-binary"));
    }
}
