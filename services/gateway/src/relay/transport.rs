//! Transport collaborator used to publish relayed payloads.
use async_trait::async_trait;
use bytes::Bytes;

/// Whether the broker publish waits for acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendMode {
    #[default]
    Sync,
    Async,
}

impl SendMode {
    /// Parse the `mode` query value; only `async` selects async sends.
    pub fn from_query(mode: Option<&str>) -> Self {
        match mode {
            Some("async") => SendMode::Async,
            _ => SendMode::Sync,
        }
    }

    pub fn is_async(self) -> bool {
        self == SendMode::Async
    }
}

/// Publishes a payload to a destination on a broker endpoint.
///
/// Retry policy belongs to the implementation; callers treat any error as the
/// broker being unavailable.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        credential: &str,
        destination: &str,
        payload: Bytes,
        mode: SendMode,
    ) -> anyhow::Result<()>;
}

/// Transport that records the publish in the log and reports success.
///
/// Used for local runs where no broker client is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(
        &self,
        endpoint: &str,
        _credential: &str,
        destination: &str,
        payload: Bytes,
        mode: SendMode,
    ) -> anyhow::Result<()> {
        tracing::info!(
            endpoint,
            destination,
            bytes = payload.len(),
            async_send = mode.is_async(),
            "relay payload accepted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_mode_from_query() {
        assert_eq!(SendMode::from_query(Some("async")), SendMode::Async);
        assert_eq!(SendMode::from_query(Some("sync")), SendMode::Sync);
        assert_eq!(SendMode::from_query(Some("ASYNC")), SendMode::Sync);
        assert_eq!(SendMode::from_query(None), SendMode::Sync);
    }

    #[tokio::test]
    async fn log_transport_accepts_payloads() {
        LogTransport
            .send(
                "pulsar://localhost:6650",
                "token",
                "persistent://acme/ns/orders",
                Bytes::from_static(b"{}"),
                SendMode::Async,
            )
            .await
            .expect("send");
    }
}
