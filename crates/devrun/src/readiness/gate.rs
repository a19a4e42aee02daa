//! All-of-group readiness gate

use futures::future::try_join_all;
use std::time::Duration;

use crate::readiness::probe::{Probe, ProbeError};

/// Deadline for one dependency probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(120);
/// Overall deadline for one service's dependency group
pub const GROUP_TIMEOUT: Duration = Duration::from_secs(180);

/// Wait until every address in the group is ready.
///
/// All probes run concurrently; the group succeeds only if every probe
/// succeeds, each within `per_probe` and all within `group`. An empty group
/// succeeds immediately without building a probe or starting a timer.
pub async fn await_ready(
    addresses: &[String],
    per_probe: Duration,
    group: Duration,
) -> Result<(), ReadinessError> {
    if addresses.is_empty() {
        return Ok(());
    }

    let http = Probe::default_client();
    let checks = addresses.iter().map(|address| {
        let probe = Probe::new(address.clone(), http.clone());
        async move {
            probe
                .wait(per_probe)
                .await
                .map_err(|source| ReadinessError::Probe {
                    address: probe.address().to_string(),
                    source,
                })
        }
    });

    match tokio::time::timeout(group, try_join_all(checks)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(ReadinessError::GroupTimeout { after: group }),
    }
}

/// Why a dependency group did not become ready
#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    #[error("'{address}' is not ready: {source}")]
    Probe {
        address: String,
        #[source]
        source: ProbeError,
    },

    #[error("dependency group deadline of {after:?} exceeded")]
    GroupTimeout { after: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_group_is_vacuously_ready() {
        let start = std::time::Instant::now();
        await_ready(&[], Duration::from_secs(120), Duration::from_secs(180))
            .await
            .unwrap();
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_group_succeeds_when_all_probes_succeed() {
        let a = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let b = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addresses = vec![
            a.local_addr().unwrap().to_string(),
            b.local_addr().unwrap().to_string(),
        ];

        await_ready(&addresses, Duration::from_secs(5), Duration::from_secs(10))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failing_probe_is_attributed() {
        let addresses = vec!["bad-address-without-port".to_string()];
        let err = await_ready(&addresses, Duration::from_secs(5), Duration::from_secs(10))
            .await
            .unwrap_err();
        match err {
            ReadinessError::Probe { address, source } => {
                assert_eq!(address, "bad-address-without-port");
                assert!(matches!(source, ProbeError::InvalidAddress(_)));
            }
            other => panic!("expected probe attribution, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_group_deadline_fires() {
        // A closed port keeps the probe retrying; the group deadline is
        // shorter than the first retry interval.
        let closed = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let addresses = vec![closed];
        let err = await_ready(
            &addresses,
            Duration::from_secs(10),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReadinessError::GroupTimeout { .. }));
    }
}
