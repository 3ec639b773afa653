//! External assistant process adapter.
//!
//! Builds the assistant command line, spawns one process per request, and
//! streams its stdout back as a cumulative text buffer.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;

use tokio::io::AsyncBufReadExt as _;
use tokio::sync::mpsc;

use crate::domain::verification::VerificationRequest;

/// Text placed in the response panel when the assistant cannot be started.
pub const LAUNCH_ERROR_MESSAGE: &str = "Error: Could not start the assistant process.";

const VERIFICATION_FLAG: &str = "--verification";
const FILE_NAME_FLAG: &str = "--fileName";
const DESCRIPTION_FLAG: &str = "--description";

/// Payload for one assistant invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantRequest {
    /// Files passed as trailing positional arguments.
    pub attached_paths: Vec<PathBuf>,
    pub prompt: String,
    /// Present only for testbench generation requests.
    pub verification: Option<VerificationRequest>,
}

impl AssistantRequest {
    /// Builds a plain prompt request.
    pub fn prompt(prompt: impl Into<String>, attached_paths: Vec<PathBuf>) -> Self {
        Self {
            attached_paths,
            prompt: prompt.into(),
            verification: None,
        }
    }

    /// Builds a testbench generation request that sends the verification's
    /// attached paths.
    pub fn verification(prompt: impl Into<String>, verification: VerificationRequest) -> Self {
        Self {
            attached_paths: verification.attached_paths.clone(),
            prompt: prompt.into(),
            verification: Some(verification),
        }
    }

    /// Returns the script arguments: prompt, verification flags, then paths.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut arguments = vec![OsString::from(&self.prompt)];

        if let Some(verification) = &self.verification {
            arguments.push(VERIFICATION_FLAG.into());
            arguments.push(FILE_NAME_FLAG.into());
            arguments.push(OsString::from(&verification.target_name));

            if !verification.description.is_empty() {
                arguments.push(DESCRIPTION_FLAG.into());
                arguments.push(OsString::from(&verification.description));
            }
        }

        arguments.extend(
            self.attached_paths
                .iter()
                .map(|path| path.as_os_str().to_os_string()),
        );

        arguments
    }
}

/// Failure to get an assistant process running.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to spawn assistant process: {0}")]
    Spawn(#[source] io::Error),
    #[error("assistant stdout pipe unavailable after spawn")]
    StdoutUnavailable,
}

/// How the assistant process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    /// Exited with a non-zero status code.
    Failed(i32),
    /// Terminated by a signal.
    Signaled(i32),
    /// The exit status could not be collected.
    Unknown,
}

impl ExitOutcome {
    fn from_status(status: Option<ExitStatus>) -> Self {
        let Some(status) = status else {
            return Self::Unknown;
        };

        if status.success() {
            return Self::Success;
        }

        if let Some(code) = status.code() {
            return Self::Failed(code);
        }

        terminating_signal(status).map_or(Self::Unknown, Self::Signaled)
    }

    /// Returns the line appended to the response for unsuccessful exits.
    pub fn error_line(self) -> Option<String> {
        match self {
            Self::Success => None,
            Self::Failed(code) => Some(format!("[assistant exited with status {code}]")),
            Self::Signaled(signal) => Some(format!("[assistant terminated by signal {signal}]")),
            Self::Unknown => Some("[assistant exit status unavailable]".to_string()),
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt as _;

    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Incremental event emitted while one request runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssistantEvent {
    /// The process was spawned.
    Started { pid: Option<u32> },
    /// Full stdout text accumulated so far, one `\n` per line.
    Output(String),
    /// Stdout reached end of file; the process may still be running.
    OutputClosed,
}

/// Builds the command that runs the external assistant.
#[cfg_attr(test, mockall::automock)]
pub trait AssistantBackend: Send + Sync {
    /// Builds one command for `request`.
    fn build_command(&self, request: &AssistantRequest) -> Command;
}

/// Runs the assistant as `<interpreter> <script> <arguments>...`.
#[derive(Clone, Debug)]
pub struct ScriptBackend {
    interpreter: String,
    script_path: PathBuf,
}

impl ScriptBackend {
    pub fn new(interpreter: impl Into<String>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script_path: script_path.into(),
        }
    }
}

impl AssistantBackend for ScriptBackend {
    fn build_command(&self, request: &AssistantRequest) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg(&self.script_path).args(request.arguments());

        command
    }
}

/// Spawns one assistant process per request and streams its stdout.
#[derive(Clone)]
pub struct AssistantRunner {
    backend: Arc<dyn AssistantBackend>,
}

impl AssistantRunner {
    pub fn new(backend: Arc<dyn AssistantBackend>) -> Self {
        Self { backend }
    }

    /// Runs `request` to completion.
    ///
    /// After every stdout line the whole accumulated buffer is sent as
    /// [`AssistantEvent::Output`]. [`AssistantEvent::OutputClosed`] follows
    /// once stdout ends, before the process is awaited. Stderr lines are only
    /// logged.
    ///
    /// # Errors
    /// Returns [`LaunchError`] when the process cannot be spawned or its
    /// stdout cannot be captured; no output events are sent in that case.
    pub async fn run(
        &self,
        request: &AssistantRequest,
        events: &mpsc::UnboundedSender<AssistantEvent>,
    ) -> Result<ExitOutcome, LaunchError> {
        let command = self.backend.build_command(request);
        let mut tokio_cmd = tokio::process::Command::from(command);
        tokio_cmd.stdin(Stdio::null());
        tokio_cmd.stdout(Stdio::piped());
        tokio_cmd.stderr(Stdio::piped());

        let mut child = tokio_cmd.spawn().map_err(LaunchError::Spawn)?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.start_kill();

            return Err(LaunchError::StdoutUnavailable);
        };

        let pid = child.id();
        tracing::info!(?pid, attachments = request.attached_paths.len(), "assistant started");
        let _ = events.send(AssistantEvent::Started { pid });

        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(log_stderr(stderr)));

        stream_stdout(stdout, events).await;
        let _ = events.send(AssistantEvent::OutputClosed);

        if let Some(stderr_task) = stderr_task {
            let _ = stderr_task.await;
        }

        let exit_outcome = ExitOutcome::from_status(child.wait().await.ok());
        tracing::info!(?pid, ?exit_outcome, "assistant finished");

        Ok(exit_outcome)
    }
}

/// Reads stdout line by line, sending the cumulative buffer after each line.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. A read error
/// ends the stream.
async fn stream_stdout(
    stdout: tokio::process::ChildStdout,
    events: &mpsc::UnboundedSender<AssistantEvent>,
) {
    let mut reader = tokio::io::BufReader::new(stdout);
    let mut line = Vec::new();
    let mut buffer = String::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                buffer.push_str(&String::from_utf8_lossy(trim_line_ending(&line)));
                buffer.push('\n');

                let _ = events.send(AssistantEvent::Output(buffer.clone()));
            }
            Err(error) => {
                tracing::warn!(%error, "stopped reading assistant output");

                break;
            }
        }
    }
}

/// Logs stderr lines until the pipe closes.
async fn log_stderr(stderr: tokio::process::ChildStderr) {
    let mut reader = tokio::io::BufReader::new(stderr);
    let mut line = Vec::new();

    while let Ok(read) = reader.read_until(b'\n', &mut line).await {
        if read == 0 {
            break;
        }

        let text = String::from_utf8_lossy(trim_line_ending(&line));
        tracing::debug!(line = %text, "assistant stderr");
        line.clear();
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);

    line.strip_suffix(b"\r").unwrap_or(line)
}
