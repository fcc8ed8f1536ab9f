//! # Subprocess Runner
//!
//! Shared execution path for every process-based compressor adapter.
//!
//! The contract with external tools is streams and exit status only: stdin
//! optionally fed with source text, stdout captured as the result, stderr
//! captured in full as diagnostics. Both streams are drained to EOF before
//! the exit status is evaluated, so the output can never be truncated.
//! Children are spawned with `kill_on_drop` so an abandoned invocation does
//! not leak its subprocess.

use crate::error::MinifyError;
use crate::platform::PlatformCommands;
use crate::utils::to_string_vec;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured outcome of one subprocess run
#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// Spawn a compressor process and capture it completely.
///
/// `stdin_data`, when given, is streamed to the child while both output
/// streams are drained, so a tool that interleaves reading and writing
/// cannot deadlock on full pipe buffers.
pub async fn run_process(
    program: &str,
    args: &[String],
    stdin_data: Option<&str>,
    buffer: usize,
) -> Result<ProcessOutput, MinifyError> {
    debug!("Spawning {} {}", program, args.join(" "));

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if stdin_data.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            MinifyError::MissingDependency(program.to_string())
        } else {
            MinifyError::Io(err)
        }
    })?;

    let stdin_handle = child.stdin.take();
    let mut stdout_pipe = child.stdout.take().expect("stdout is piped");
    let mut stderr_pipe = child.stderr.take().expect("stderr is piped");

    let feed_stdin = async {
        if let (Some(mut stdin), Some(data)) = (stdin_handle, stdin_data) {
            stdin.write_all(data.as_bytes()).await?;
            stdin.shutdown().await?;
        }
        Ok::<_, std::io::Error>(())
    };

    let mut stdout_buf = Vec::with_capacity(buffer);
    let mut stderr_buf = Vec::new();

    // Drain both streams to EOF before looking at the exit status.
    tokio::try_join!(
        feed_stdin,
        stdout_pipe.read_to_end(&mut stdout_buf),
        stderr_pipe.read_to_end(&mut stderr_buf),
    )?;

    let status = child.wait().await?;

    Ok(ProcessOutput {
        stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
        success: status.success(),
        code: status.code(),
    })
}

/// Run a JVM-hosted compressor JAR with the fixed runtime flags.
pub async fn run_jar(
    jar: &Path,
    jar_args: &[String],
    stdin_data: Option<&str>,
    buffer: usize,
) -> Result<ProcessOutput, MinifyError> {
    let platform = PlatformCommands::instance();
    if !platform.is_command_available("java").await {
        return Err(MinifyError::MissingDependency(
            "java is required to run JAR compressors".to_string(),
        ));
    }

    let mut args = to_string_vec(["-jar", "-Xss2048k", &jar.display().to_string()]);
    args.extend_from_slice(jar_args);

    run_process(platform.get_command("java"), &args, stdin_data, buffer).await
}

/// Apply the stderr/exit-status contract to a captured run.
///
/// Failure plus diagnostics on stderr is an error carrying that text; a
/// clean exit with stderr chatter is a warning only and stdout is still the
/// result. A non-zero exit without diagnostics is still a failure.
pub fn evaluate(outcome: ProcessOutput, tool: &str) -> Result<String, MinifyError> {
    let diagnostics = outcome.stderr.trim();

    if !outcome.success {
        if !diagnostics.is_empty() {
            return Err(MinifyError::Execution(diagnostics.to_string()));
        }
        return Err(MinifyError::Execution(format!(
            "{} exited with status {}",
            tool,
            outcome
                .code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        )));
    }

    if !diagnostics.is_empty() {
        warn!("{} reported diagnostics on stderr: {}", tool, diagnostics);
    }

    Ok(outcome.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_captured_on_success() {
        let args = crate::args!["-c", "echo out"];
        let outcome = run_process("sh", &args, None, 1024).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout.trim(), "out");
        assert_eq!(evaluate(outcome, "sh").unwrap().trim(), "out");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_surfaces_stderr_text() {
        let args = crate::args!["-c", "echo bad >&2; echo partial; exit 1"];
        let outcome = run_process("sh", &args, None, 1024).await.unwrap();
        assert!(!outcome.success);
        // Partial stdout must not rescue a failed run
        let err = evaluate(outcome, "sh").unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_on_success_is_warning_only() {
        let args = crate::args!["-c", "echo deprecated >&2; echo out"];
        let outcome = run_process("sh", &args, None, 1024).await.unwrap();
        assert!(outcome.success);
        let result = evaluate(outcome, "sh").unwrap();
        assert_eq!(result.trim(), "out");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_is_streamed_to_child() {
        let args = crate::args!["-c", "cat"];
        let outcome = run_process("sh", &args, Some("var x = 1;"), 1024)
            .await
            .unwrap();
        assert_eq!(outcome.stdout, "var x = 1;");
    }

    #[tokio::test]
    async fn test_missing_program_is_dependency_error() {
        let err = run_process("definitely-not-a-real-minifier", &[], None, 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, MinifyError::MissingDependency(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_is_error() {
        let args = crate::args!["-c", "exit 3"];
        let outcome = run_process("sh", &args, None, 1024).await.unwrap();
        let err = evaluate(outcome, "sh").unwrap_err();
        assert!(err.to_string().contains("status 3"));
    }
}
