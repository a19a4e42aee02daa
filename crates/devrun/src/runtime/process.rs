//! Child process spawning and output streaming

use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::palette::{ColorToken, RESET};
use crate::runtime::output::OutputSink;

/// Run a shell command to completion, streaming its output through `sink`.
///
/// The command string is interpreted by `bash -c`, so pipes, redirects and
/// multiple statements all work. Stdout and stderr are read concurrently:
/// order across the two streams is best-effort, order within each stream is
/// preserved. Every line is emitted as `{color}{name} | {reset}{line}`.
///
/// Blocks until the child exits by any means; the exit status itself is not
/// inspected. On exit, a `{color}{name}{reset} stopped running` line is
/// emitted after the last buffered output line. The child inherits the
/// supervisor's working directory and environment.
pub async fn run(
    name: &str,
    command: &str,
    color: ColorToken,
    sink: &OutputSink,
) -> Result<(), ProcessError> {
    let mut child = Command::new("bash")
        .arg("-c")
        .arg(command)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            name: name.to_string(),
            source,
        })?;

    let stdout = child.stdout.take().ok_or_else(|| ProcessError::Stream {
        name: name.to_string(),
        stream: "stdout",
    })?;
    let stderr = child.stderr.take().ok_or_else(|| ProcessError::Stream {
        name: name.to_string(),
        stream: "stderr",
    })?;

    let prefix = format!("{color}{name} | {RESET}");
    let out_reader = spawn_line_reader(stdout, prefix.clone(), sink.clone());
    let err_reader = spawn_line_reader(stderr, prefix, sink.clone());

    child.wait().await.map_err(|source| ProcessError::Wait {
        name: name.to_string(),
        source,
    })?;

    // Flush every buffered line before announcing the stop.
    let _ = out_reader.await;
    let _ = err_reader.await;

    sink.line(format!("{color}{name}{RESET} stopped running"));
    Ok(())
}

/// Forward one stream to the sink, one prefixed line per source line.
fn spawn_line_reader<R>(stream: R, prefix: String, sink: OutputSink) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            sink.line(format!("{prefix}{line}"));
        }
    })
}

/// Non-recoverable process faults; the binary maps these to an abrupt exit.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to spawn subshell for '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not attach to {stream} of '{name}'")]
    Stream { name: String, stream: &'static str },

    #[error("Failed waiting for '{name}' to exit: {source}")]
    Wait {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
