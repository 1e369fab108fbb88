use std::fs::File;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::runner::traits::{RunVerdict, Runner, RunnerError};

/// Runs a submission's executable with its standard streams tied to files.
///
/// stdin comes from the fixed input file, stdout goes to the capture file and
/// stderr is discarded; the child gets no other handles to write through. The
/// wait is deadline-based rather than a poll loop, and a child that outlives
/// the deadline is killed and reaped instead of being left orphaned.
#[derive(Clone, Debug, Default)]
pub struct SandboxRunner;

#[async_trait::async_trait]
impl Runner for SandboxRunner {
    async fn run(
        &self,
        executable: &Path,
        input: &Path,
        capture: &Path,
        timeout_secs: u64,
    ) -> Result<RunVerdict, RunnerError> {
        let stdin = File::open(input).map_err(|e| RunnerError::Setup {
            path: input.display().to_string(),
            msg: e.to_string(),
        })?;
        let stdout = File::create(capture).map_err(|e| RunnerError::Setup {
            path: capture.display().to_string(),
            msg: e.to_string(),
        })?;

        let mut child = Command::new(executable)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RunnerError::Spawn { msg: e.to_string() })?;

        match timeout(Duration::from_secs(timeout_secs), child.wait()).await {
            Ok(status) => {
                let status = status.map_err(|e| RunnerError::Spawn { msg: e.to_string() })?;
                tracing::debug!(code = ?status.code(), "submission process exited");
                Ok(RunVerdict::Completed)
            }
            Err(_) => {
                if let Err(err) = child.kill().await {
                    tracing::warn!(%err, "failed to kill timed-out process");
                }
                tracing::debug!(executable = %executable.display(), "submission timed out");
                Ok(RunVerdict::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Instant;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    #[tokio::test]
    async fn test_completed_run_captures_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.txt");
        let capture = dir.path().join("out.txt");
        fs::write(&input, "line one\nline two\n").expect("write input");
        let script = write_script(dir.path(), "echo.sh", "#!/bin/sh\ncat\n");

        let verdict = SandboxRunner
            .run(&script, &input, &capture, 5)
            .await
            .expect("run");

        assert_eq!(verdict, RunVerdict::Completed);
        let captured = fs::read_to_string(&capture).expect("read capture");
        assert_eq!(captured, "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_capture_file_is_truncated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.txt");
        let capture = dir.path().join("out.txt");
        fs::write(&input, "short\n").expect("write input");
        fs::write(&capture, "previous much longer contents\n").expect("write stale capture");
        let script = write_script(dir.path(), "echo.sh", "#!/bin/sh\ncat\n");

        SandboxRunner
            .run(&script, &input, &capture, 5)
            .await
            .expect("run");

        let captured = fs::read_to_string(&capture).expect("read capture");
        assert_eq!(captured, "short\n");
    }

    #[tokio::test]
    async fn test_crash_still_counts_as_completed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.txt");
        fs::write(&input, "").expect("write input");
        let script = write_script(dir.path(), "crash.sh", "#!/bin/sh\nexit 42\n");

        let verdict = SandboxRunner
            .run(&script, &input, &dir.path().join("out.txt"), 5)
            .await
            .expect("run");

        assert_eq!(verdict, RunVerdict::Completed);
    }

    #[tokio::test]
    async fn test_timeout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.txt");
        fs::write(&input, "").expect("write input");
        let script = write_script(
            dir.path(),
            "loop.sh",
            "#!/bin/sh\nwhile :; do sleep 1; done\n",
        );

        let started = Instant::now();
        let verdict = SandboxRunner
            .run(&script, &input, &dir.path().join("out.txt"), 1)
            .await
            .expect("run");

        assert_eq!(verdict, RunVerdict::TimedOut);
        assert!(started.elapsed() >= Duration::from_secs(1));
        // The child is killed, not waited out, so this should not take
        // anywhere near the loop's own lifetime.
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_missing_input_is_a_setup_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(dir.path(), "echo.sh", "#!/bin/sh\ncat\n");

        let result = SandboxRunner
            .run(
                &script,
                &dir.path().join("missing.txt"),
                &dir.path().join("out.txt"),
                5,
            )
            .await;

        assert!(matches!(result, Err(RunnerError::Setup { .. })));
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.txt");
        fs::write(&input, "").expect("write input");

        let result = SandboxRunner
            .run(
                &dir.path().join("missing.out"),
                &input,
                &dir.path().join("out.txt"),
                5,
            )
            .await;

        assert!(matches!(result, Err(RunnerError::Spawn { .. })));
    }
}
