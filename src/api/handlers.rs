//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::StoreError;
use crate::notify::Notifier;
use crate::store::{
    ContactForm, ContactMessage, DocumentStore, StatusCheck, StatusCheckCreate, STATUS_LIST_LIMIT,
};

use super::extract::ApiJson;

/// Application state shared with handlers.
///
/// Both handles are constructed once at startup and injected here; requests
/// never reach for process-global state.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle, shared across all in-flight requests.
    pub store: Arc<dyn DocumentStore>,
    /// Contact notification hook.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create app state from its two injected dependencies.
    pub fn new(store: Arc<dyn DocumentStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }
}

/// Error surfaced by fallible handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Request failed schema validation; maps to the rejection's 4xx status.
    Validation {
        /// Client-error status to answer with.
        status: StatusCode,
        /// Field-level detail.
        detail: String,
    },
    /// Store failure with no recovery path; maps to 500.
    Internal(StoreError),
}

impl ApiError {
    /// Validation failure with the default unprocessable-entity status.
    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { status, detail } => (
                status,
                Json(json!({ "error": "validation", "detail": detail })),
            )
                .into_response(),
            ApiError::Internal(err) => {
                error!("request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Greeting payload for the root route.
#[derive(Debug, Serialize)]
pub struct Greeting {
    /// Static greeting text.
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the store answered a ping.
    pub ready: bool,
}

/// Outcome of a contact submission.
///
/// Both variants serialize to the `{success, message, id?}` wire shape and
/// are always answered with HTTP 200; callers read the `success` flag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContactOutcome {
    /// The message was persisted (notification outcome notwithstanding).
    Accepted {
        /// Always `true`.
        success: bool,
        /// Confirmation text.
        message: &'static str,
        /// Identifier of the stored message.
        id: String,
    },
    /// Persistence failed; nothing was stored.
    Failed {
        /// Always `false`.
        success: bool,
        /// Generic failure text.
        message: &'static str,
    },
}

impl ContactOutcome {
    /// Successful submission.
    pub fn accepted(id: String) -> Self {
        Self::Accepted {
            success: true,
            message: "Thank you for your message! I will get back to you soon.",
            id,
        }
    }

    /// Failed submission.
    pub fn failed() -> Self {
        Self::Failed {
            success: false,
            message: "Failed to send message. Please try again or email directly.",
        }
    }
}

/// Root handler - static greeting, used as a liveness probe.
pub async fn root() -> impl IntoResponse {
    Json(Greeting {
        message: "Hello World",
    })
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the store answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadyResponse { ready: true })),
        Err(err) => {
            warn!("store ping failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse { ready: false }),
            )
        }
    }
}

/// Create a status check and return the stored record.
pub async fn create_status_check(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    if input.client_name.trim().is_empty() {
        return Err(ApiError::unprocessable("client_name must not be empty"));
    }

    let check = StatusCheck::new(input.client_name);
    state.store.insert_status_check(&check).await?;

    Ok(Json(check))
}

/// List stored status checks, capped at 1000.
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.store.list_status_checks(STATUS_LIST_LIMIT).await?;
    Ok(Json(checks))
}

/// Accept a contact-form submission.
///
/// Persistence decides the outcome; the notification send is best-effort and
/// only observed for logging. Always answers HTTP 200.
pub async fn submit_contact(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Json<ContactOutcome> {
    let message = ContactMessage::from_form(form);

    if let Err(err) = state.store.insert_contact_message(&message).await {
        error!("failed to store contact message: {err}");
        return Json(ContactOutcome::failed());
    }

    info!("New contact message from {} ({})", message.name, message.email);

    if let Err(err) = state.notifier.contact_submitted(&message).await {
        warn!("contact notification failed: {err}");
    }

    Json(ContactOutcome::accepted(message.id))
}
