use crate::api::types::{IncidentsResponse, ResolveIncidentResponse};
use crate::config::ApiConfig;
use crate::error::Error;
use crate::services::{IncidentQueryService, IncidentResolveService};
use crate::store::{IncidentFilter, IncidentStore};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub query: Arc<IncidentQueryService>,
    pub resolve: Arc<IncidentResolveService>,
    pub store: Arc<dyn IncidentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self {
            query: Arc::new(IncidentQueryService::new(store.clone())),
            resolve: Arc::new(IncidentResolveService::new(store.clone())),
            store,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error payload sent to the client: `{"error": "..."}` plus the status code
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(_) => ApiError {
                error: err.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            },
            Error::Validation(_) => ApiError {
                error: err.to_string(),
                status: StatusCode::BAD_REQUEST.as_u16(),
            },
            Error::AlreadyExists(_) => ApiError {
                error: err.to_string(),
                status: StatusCode::CONFLICT.as_u16(),
            },
            Error::Config(_) => ApiError {
                error: err.to_string(),
                status: StatusCode::BAD_REQUEST.as_u16(),
            },
            // Store and internal failures never leak their detail to the client
            Error::Database(_) | Error::Internal(_) => {
                error!("Internal error while serving request: {}", err);
                ApiError {
                    error: "Server error".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                }
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<Error>() {
            return err.clone().into();
        }

        error!("Unhandled error while serving request: {:#}", err);
        ApiError {
            error: "Server error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// Implement IntoResponse for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(self);
        (status, body).into_response()
    }
}

pub struct RestApi {
    config: ApiConfig,
    state: AppState,
}

impl RestApi {
    pub fn new(config: &ApiConfig, state: AppState) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            state,
        })
    }

    /// Build the application router. Separate from `run` so tests can drive
    /// the routes without binding a socket.
    pub fn router(state: AppState) -> Router {
        // Permissive CORS so the dashboard can be developed against any origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_credentials(false)
            .max_age(Duration::from_secs(3600));

        Router::new()
            .route("/incidents", get(list_incidents))
            .route("/incidents/:id/resolve", patch(resolve_incident))
            .route("/health", get(health))
            .with_state(state)
            // Serve the dashboard assets from the public directory
            .fallback_service(ServeDir::new("public"))
            .layer(cors)
    }

    pub async fn run(&self) -> Result<()> {
        let app = Self::router(self.state.clone());

        let addr = self.config.address.clone() + ":" + &self.config.port.to_string();
        let addr: SocketAddr = addr.parse()?;

        info!("API server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        axum::Server::from_tcp(listener.into_std()?)?
            .serve(app.into_make_service())
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ListIncidentsQuery {
    resolved: Option<String>,
}

impl ListIncidentsQuery {
    /// The filter, if present, must be a boolean. Anything else is a 400
    /// rather than being coerced to false.
    fn into_filter(self) -> Result<IncidentFilter, Error> {
        match self.resolved.as_deref() {
            None => Ok(IncidentFilter::default()),
            Some("true") => Ok(IncidentFilter::resolved(true)),
            Some("false") => Ok(IncidentFilter::resolved(false)),
            Some(other) => Err(Error::Validation(format!(
                "resolved must be 'true' or 'false', got '{}'",
                other
            ))),
        }
    }
}

async fn list_incidents(
    State(state): State<AppState>,
    Query(query): Query<ListIncidentsQuery>,
) -> ApiResult<Json<IncidentsResponse>> {
    let filter = query.into_filter()?;
    let listing = state.query.list(filter).await?;
    Ok(Json(listing))
}

async fn resolve_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ResolveIncidentResponse>> {
    let response = state.resolve.resolve(&id).await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.store.ping().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}
