//! Shared utilities for the gateway integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};

use melody_gateway::auth::{SessionStore, SessionStoreError};
use melody_gateway::config::{GatewayConfig, ServicesConfig};
use melody_gateway::http::HttpServer;
use melody_gateway::lifecycle::Shutdown;

/// One request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// What a mock backend answers with.
#[derive(Debug, Clone, Copy)]
enum Reply {
    Fixed(u16, &'static str),
    /// Answer 200 with the request body.
    Echo,
}

/// A downstream stub that records every request it receives.
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Call count observed so far; the spy for the never-called assertions.
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn start_backend(reply: Reply) -> MockBackend {
    let hits = Arc::new(AtomicU32::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let hit_counter = hits.clone();
    let request_log = requests.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let hit_counter = hit_counter.clone();
        let request_log = request_log.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, 1024 * 1024).await.unwrap_or_default();

            hit_counter.fetch_add(1, Ordering::SeqCst);
            request_log.lock().unwrap().push(RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                body: bytes.to_vec(),
            });

            match reply {
                Reply::Fixed(status, body) => (
                    StatusCode::from_u16(status).unwrap(),
                    body.to_string(),
                ),
                Reply::Echo => (StatusCode::OK, String::from_utf8_lossy(&bytes).into_owned()),
            }
        }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { addr, hits, requests }
}

/// Start a mock backend returning a fixed status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockBackend {
    start_backend(Reply::Fixed(status, body)).await
}

/// Start a mock backend that echoes the request body back.
pub async fn start_echo_backend() -> MockBackend {
    start_backend(Reply::Echo).await
}

/// In-memory session store standing in for the cache, with a lookup spy.
pub struct MemoryStore {
    sessions: HashMap<String, String>,
    lookups: Arc<AtomicU32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            lookups: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_session(mut self, token: &str, identity: &str) -> Self {
        self.sessions.insert(token.to_string(), identity.to_string());
        self
    }

    /// Handle onto the lookup counter, usable after the store is moved into
    /// the gateway.
    pub fn lookup_counter(&self) -> Arc<AtomicU32> {
        self.lookups.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.sessions.get(key).cloned())
    }
}

/// A session store whose cache is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, SessionStoreError> {
        Err(SessionStoreError::Connection("connection refused".into()))
    }
}

/// A running gateway under test.
pub struct TestGateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway on an ephemeral port with the given service addresses and
/// session store.
pub async fn start_gateway(services: ServicesConfig, store: Arc<dyn SessionStore>) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.services = services;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(config, store);

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    TestGateway { addr, shutdown }
}

/// Point all five service URLs at one mock backend.
pub fn services_pointing_at(backend: &MockBackend) -> ServicesConfig {
    let url = backend.base_url();
    ServicesConfig {
        artist_url: url.clone(),
        song_url: url.clone(),
        playlist_url: url.clone(),
        user_url: url.clone(),
        authentication_url: url,
    }
}
