#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use gateway::app::{AppState, build_router};
use gateway::relay::{
    AllowList, JwtTokenIssuer, RelayHandler, SendMode, Transport,
};
use gateway::store::memory::InMemoryStore;
use relay_authz::AuthorizationEngine;
use std::sync::{Arc, Mutex};

pub const TOKEN_SECRET: &[u8] = b"integration-secret";
pub const CLUSTER: &str = "pulsar://broker-a:6650";

pub type TestApp = axum::routing::RouterIntoService<axum::body::Body, ()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub endpoint: String,
    pub credential: String,
    pub destination: String,
    pub payload: Bytes,
    pub mode: SendMode,
}

#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<SentMessage>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        endpoint: &str,
        credential: &str,
        destination: &str,
        payload: Bytes,
        mode: SendMode,
    ) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("broker unreachable");
        }
        self.sent.lock().expect("lock").push(SentMessage {
            endpoint: endpoint.to_string(),
            credential: credential.to_string(),
            destination: destination.to_string(),
            payload,
            mode,
        });
        Ok(())
    }
}

pub fn app_with_transport(transport: Arc<RecordingTransport>, with_issuer: bool) -> TestApp {
    let mut handler = RelayHandler::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(AuthorizationEngine::new(["superuser"])),
        transport,
        AllowList::new([CLUSTER]),
    );
    if with_issuer {
        handler = handler.with_token_issuer(Arc::new(
            JwtTokenIssuer::new(TOKEN_SECRET, None).expect("issuer"),
        ));
    }
    let state = AppState {
        handler,
        api_version: "v2".to_string(),
    };
    build_router(state).into_service()
}

pub fn app() -> TestApp {
    app_with_transport(Arc::new(RecordingTransport::default()), true)
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
