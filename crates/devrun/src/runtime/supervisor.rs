//! Supervisor fan-out and join barrier

use indexmap::IndexMap;
use tokio::task::JoinSet;

use crate::config::ServiceSpec;
use crate::palette;
use crate::runtime::output;
use crate::runtime::service::{self, ServiceError};

/// Launch every service concurrently and block until all have terminated.
///
/// Colors are assigned from the explicit sorted name list before any task
/// starts, so the same manifest colors the same way on every run. Each task
/// reaches exactly one terminal state and is joined exactly once. The first
/// task to fail aborts the join immediately; running siblings are neither
/// signalled nor reaped (abrupt-termination policy), their fate is left to
/// process teardown.
pub async fn supervise(services: IndexMap<String, ServiceSpec>) -> Result<(), SupervisorError> {
    let names: Vec<&String> = services.keys().collect();
    let colors = palette::assign(&names);

    let (sink, writer) = output::channel();
    let writer = tokio::spawn(writer.run());

    let mut set = JoinSet::new();
    for (name, color) in colors {
        if let Some(spec) = services.get(&name).cloned() {
            log::debug!("Launching task for '{name}'");
            set.spawn(service::run_service(name, spec, color, sink.clone()));
        }
    }

    // The writer must observe end-of-output once the tasks are done, so the
    // supervisor's own handle goes away before the join.
    drop(sink);

    while let Some(joined) = set.join_next().await {
        joined??;
    }

    // All senders are gone once every task has returned; the writer ends
    // after printing the last queued line.
    writer.await.map_err(SupervisorError::Join)?;
    println!("All services finished");
    Ok(())
}

/// Fatal supervisor outcomes; the binary maps these to a non-zero exit
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("service task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::{ProbeError, ReadinessError};

    fn spec(cmd: &str, wait_for: &[&str]) -> ServiceSpec {
        ServiceSpec {
            cmd: cmd.to_string(),
            wait_for: wait_for.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_join_waits_for_every_service() {
        let mut services = IndexMap::new();
        services.insert("a".to_string(), spec("echo hi", &[]));
        services.insert("b".to_string(), spec("echo bye", &[]));
        supervise(services).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_services_completes_immediately() {
        supervise(IndexMap::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_first_failure_aborts_the_join() {
        let mut services = IndexMap::new();
        services.insert("a".to_string(), spec("echo hi", &[]));
        services.insert("b".to_string(), spec("echo bye", &["no-port"]));

        let err = supervise(services).await.unwrap_err();
        match err {
            SupervisorError::Service(ServiceError::Readiness { service, source }) => {
                assert_eq!(service, "b");
                assert!(matches!(
                    source,
                    ReadinessError::Probe {
                        source: ProbeError::InvalidAddress(_),
                        ..
                    }
                ));
            }
            other => panic!("expected readiness failure, got {other:?}"),
        }
    }
}
