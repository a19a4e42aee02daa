//! Per-service lifecycle: wait for dependencies, run, report

use crate::config::ServiceSpec;
use crate::palette::{ColorToken, RESET};
use crate::readiness::{self, ReadinessError, GROUP_TIMEOUT, PROBE_TIMEOUT};
use crate::runtime::output::OutputSink;
use crate::runtime::process::{self, ProcessError};

/// Lifecycle states of one service task.
///
/// `Failed` is reachable only from `Waiting`; once the command has started,
/// the only terminal transition is `Stopped`. State is owned exclusively by
/// the task driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Dependencies are being probed
    Waiting,
    /// The command is running
    Running,
    /// The command exited
    Stopped,
    /// A dependency never became ready
    Failed,
}

impl ServiceState {
    /// Check if the state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServiceState::Stopped | ServiceState::Failed)
    }
}

/// Drive one service from `Waiting` to a terminal state.
///
/// Strictly sequential: the readiness gate completes before the command is
/// spawned, and at most one gate call and one runner call are ever
/// outstanding. Probes only target external addresses; no other service's
/// state is read or written.
pub async fn run_service(
    name: String,
    spec: ServiceSpec,
    color: ColorToken,
    sink: OutputSink,
) -> Result<(), ServiceError> {
    let mut state = ServiceState::Waiting;
    log::debug!("[{name}] {state:?}");

    if let Err(source) = readiness::await_ready(&spec.wait_for, PROBE_TIMEOUT, GROUP_TIMEOUT).await
    {
        state = ServiceState::Failed;
        log::debug!("[{name}] {state:?}");
        return Err(ServiceError::Readiness {
            service: name,
            source,
        });
    }

    state = ServiceState::Running;
    log::debug!("[{name}] {state:?}");
    sink.line(format!("Starting {color}{name}{RESET}"));

    process::run(&name, &spec.cmd, color, &sink)
        .await
        .map_err(|source| ServiceError::Process {
            service: name.clone(),
            source,
        })?;

    state = ServiceState::Stopped;
    log::debug!("[{name}] {state:?}");
    Ok(())
}

/// A task's fatal outcome; any variant terminates the whole supervisor.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Dependency of {service} didn't start: {source}")]
    Readiness {
        service: String,
        #[source]
        source: ReadinessError,
    },

    #[error("{service} could not run: {source}")]
    Process {
        service: String,
        #[source]
        source: ProcessError,
    },
}
