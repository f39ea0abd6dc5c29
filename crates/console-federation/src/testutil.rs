//! Scripted federation endpoint for tests.
//!
//! Serves `GET /federation` on an ephemeral local port, answers with the
//! scripted responses in order and records every query it receives.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use reqwest::Url;

use crate::config::FederationConfig;

#[derive(Default)]
struct MockState {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<HashMap<String, String>>>,
}

pub(crate) struct MockFederation {
    url: Url,
    state: Arc<MockState>,
}

impl MockFederation {
    /// Start a server that answers successive requests with `responses`.
    ///
    /// Requests beyond the script get a 500.
    pub(crate) async fn start(responses: &[(StatusCode, &str)]) -> Self {
        let state = Arc::new(MockState::default());
        state.responses.lock().unwrap().extend(
            responses
                .iter()
                .map(|(status, body)| (*status, (*body).to_string())),
        );

        let app = Router::new()
            .route("/federation", get(federation))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock federation server");
        });

        let url = Url::parse(&format!("http://{addr}/federation")).expect("mock URL");
        Self { url, state }
    }

    /// Configuration pointing at this server, other fields left at default.
    pub(crate) fn config(&self) -> FederationConfig {
        FederationConfig {
            federation_url: self.url.clone(),
            ..FederationConfig::default()
        }
    }

    pub(crate) fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn federation(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(params);
    state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "unscripted request".into()))
}

/// A local URL nothing is listening on.
pub(crate) async fn closed_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    Url::parse(&format!("http://{addr}/federation")).expect("closed URL")
}
