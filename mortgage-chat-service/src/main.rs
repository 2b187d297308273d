mod locations;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use mortgage_flow::{
    Emission, Event, FlowError, FlowRunner, FlowStatus, InMemorySessionStorage, LocationCatalog,
    MortgageFlow, Session, SessionStorage, StepOutcome,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    runner: FlowRunner,
    session_storage: Arc<dyn SessionStorage>,
}

#[derive(Debug, Deserialize)]
struct ExecuteRequest {
    /// Omit to start a new conversation.
    session_id: Option<String>,
    /// Omit to (re)fetch the greeting for a session resting at the start.
    event: Option<Event>,
}

#[derive(Debug, Serialize)]
struct ExecuteResponse {
    session_id: String,
    status: FlowStatus,
    emissions: Vec<Emission>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Initialize structured tracing based on environment variables.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mortgage_chat_service=debug,mortgage_flow=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware attaching a correlation id to every request's tracing span.
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let catalog = LocationCatalog::new(locations::LOCATIONS.iter().copied())?;
    info!(locations = catalog.len(), "location catalog loaded");

    let flow = Arc::new(MortgageFlow::new(catalog));
    let session_storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());

    let app_state = AppState {
        runner: FlowRunner::new(flow, session_storage.clone()),
        session_storage,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/execute", post(execute))
        .route("/session/{id}", get(get_session))
        .route("/locations", get(get_locations))
        .layer(from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;

    info!("Server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

/// The location list the presentation layer renders as a dropdown. The flow
/// itself only checks membership; this endpoint exists so clients do not
/// have to ship their own copy.
async fn get_locations() -> Json<Vec<&'static str>> {
    Json(locations::LOCATIONS.to_vec())
}

async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let session_id_provided = request.session_id.is_some();
    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if session_id_provided && Uuid::parse_str(&session_id).is_err() {
        error!(session_id = %session_id, "invalid session id format");
        return Err(api_error(StatusCode::BAD_REQUEST, "invalid session id"));
    }

    // Create the session on first contact; a provided-but-unknown id is the
    // caller's mistake, not a reason to silently start over.
    match state.session_storage.get(&session_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            if session_id_provided {
                error!(session_id = %session_id, "session not found");
                return Err(api_error(StatusCode::NOT_FOUND, "session not found"));
            }
            info!(session_id = %session_id, "creating new session");
            let session = Session::new(session_id.clone());
            if let Err(e) = state.session_storage.save(session).await {
                error!(session_id = %session_id, error = %e, "failed to create session");
                return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
            }
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "failed to get session");
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let result = match &request.event {
        Some(event) => state.runner.run(&session_id, event).await,
        None => state.runner.open(&session_id).await,
    };

    let outcome: StepOutcome = match result {
        Ok(outcome) => outcome,
        Err(FlowError::SessionNotFound(_)) => {
            return Err(api_error(StatusCode::NOT_FOUND, "session not found"));
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "failed to advance conversation");
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error",
            ));
        }
    };

    info!(
        session_id = %session_id,
        status = ?outcome.status,
        emissions = outcome.emissions.len(),
        "request completed"
    );

    Ok(Json(ExecuteResponse {
        session_id,
        status: outcome.status,
        emissions: outcome.emissions,
    }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    match state.session_storage.get(&session_id).await {
        Ok(Some(session)) => Ok(Json(session)),
        Ok(None) => {
            info!(session_id = %session_id, "session not found");
            Err(api_error(StatusCode::NOT_FOUND, "session not found"))
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "failed to get session");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
