/*!
Endpoint de métriques simulé pour tests sans serveur réel

Sert une réponse pilotable (corps, statut, latence) sur un port éphémère
et compte les requêtes reçues, y compris les requêtes simultanées.
*/

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Réponse servie à chaque GET
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
struct StubState {
    response: Mutex<MockResponse>,
    hits: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Serveur HTTP local qui imite l'exporteur de métriques
pub struct MockEndpoint {
    addr: SocketAddr,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl MockEndpoint {
    /// Démarre le serveur sur 127.0.0.1 avec un port libre
    pub async fn start() -> Result<Self> {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .fallback(serve_metrics)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind mock endpoint")?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("❌ [MOCK] endpoint stopped: {}", e);
            }
        });

        log::info!("🛰️ [MOCK] metrics endpoint on http://{}", addr);
        Ok(Self { addr, state, server })
    }

    /// URL complète à donner au resolver
    pub fn url(&self) -> String {
        format!("http://{}/api/metrics", self.addr)
    }

    /// Sert un document JSON
    pub fn set_json(&self, document: &Value) {
        self.state.response.lock().body = document.to_string();
    }

    /// Sert un corps brut (JSON invalide, HTML d'erreur...)
    pub fn set_raw(&self, body: impl Into<String>) {
        self.state.response.lock().body = body.into();
    }

    pub fn set_status(&self, status: u16) {
        self.state.response.lock().status = status;
    }

    /// Latence appliquée avant chaque réponse
    pub fn set_delay(&self, delay: Duration) {
        self.state.response.lock().delay = delay;
    }

    /// Nombre de requêtes reçues
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Pic de requêtes traitées en même temps
    pub fn max_concurrent(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn reset_hits(&self) {
        self.state.hits.store(0, Ordering::SeqCst);
        self.state.max_in_flight.store(0, Ordering::SeqCst);
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn serve_metrics(State(state): State<Arc<StubState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(current, Ordering::SeqCst);

    let response = state.response.lock().clone();
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], response.body).into_response()
}
