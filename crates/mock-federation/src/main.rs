//! Local stand-in for the AWS federation endpoint.
//!
//! Point the CLI at it with
//! `CONSOLE_FEDERATION_URL=http://localhost:4100/federation`.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Session durations accepted by `getSigninToken`, in seconds.
const SESSION_DURATION_RANGE: std::ops::RangeInclusive<u32> = 900..=43_200;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_FEDERATION_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4100);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "mock federation endpoint listening");
    axum::serve(listener, app()).await.expect("server error");
}

fn app() -> Router {
    Router::new()
        .route("/federation", get(federation))
        .route("/oauth", get(oauth))
}

// --- Endpoints ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FederationParams {
    action: Option<String>,
    session_duration: Option<String>,
    session: Option<String>,
    destination: Option<String>,
    signin_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SessionPayload {
    session_id: String,
    session_key: String,
    session_token: String,
}

async fn federation(Query(params): Query<FederationParams>) -> Response {
    match params.action.as_deref() {
        Some("getSigninToken") => get_signin_token(&params),
        Some("login") => login(&params),
        other => bad_request(format!("unsupported Action: {other:?}")),
    }
}

fn get_signin_token(params: &FederationParams) -> Response {
    let duration = match params.session_duration.as_deref().map(str::parse::<u32>) {
        Some(Ok(d)) if SESSION_DURATION_RANGE.contains(&d) => d,
        _ => return bad_request("SessionDuration must be between 900 and 43200".into()),
    };

    let Some(raw) = params.session.as_deref() else {
        return bad_request("missing Session".into());
    };
    let session: SessionPayload = match serde_json::from_str(raw) {
        Ok(s) => s,
        Err(e) => return bad_request(format!("invalid Session: {e}")),
    };
    if session.session_id.is_empty()
        || session.session_key.is_empty()
        || session.session_token.is_empty()
    {
        return (StatusCode::FORBIDDEN, "access denied").into_response();
    }

    info!(session_id = %session.session_id, duration, "signin token issued");

    let token = URL_SAFE_NO_PAD.encode(format!("{}:{}", session.session_id, uuid::Uuid::new_v4()));
    Json(json!({ "SigninToken": token })).into_response()
}

fn login(params: &FederationParams) -> Response {
    let token = params.signin_token.as_deref().unwrap_or_default();
    if token.is_empty() {
        return bad_request("missing SigninToken".into());
    }
    let Some(destination) = params.destination.as_deref() else {
        return bad_request("missing Destination".into());
    };

    info!(destination, "login redirect");
    Redirect::to(destination).into_response()
}

#[derive(Deserialize)]
struct OauthParams {
    #[serde(rename = "Action")]
    action: Option<String>,
}

async fn oauth(Query(params): Query<OauthParams>) -> Response {
    match params.action.as_deref() {
        Some("logout") => {
            info!("logout");
            (StatusCode::OK, "signed out").into_response()
        }
        other => bad_request(format!("unsupported Action: {other:?}")),
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}
