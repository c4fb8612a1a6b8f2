use apilab_schema::Violation;
use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LabError {
    /// Addressed record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request was well-formed but failed extraction or validation.
    #[error("Request rejected: {status}")]
    Rejected {
        status: StatusCode,
        detail: Vec<Violation>,
        debug_message: Option<String>,
    },

    /// A multipart part grew past the configured cap.
    #[error("Part `{field}` exceeds {limit} bytes")]
    PartTooLarge { field: String, limit: usize },

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    Ractor(String),
}

impl LabError {
    pub fn not_found(what: impl Into<String>) -> Self {
        LabError::NotFound(what.into())
    }

    /// 422 carrying the given violations.
    pub fn invalid(detail: Vec<Violation>) -> Self {
        LabError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail,
            debug_message: None,
        }
    }

    /// 422 for a required form field that was never sent.
    pub fn missing_field(field: &str) -> Self {
        Self::invalid(vec![Violation::new(
            &["body", field],
            "Field required",
            "missing",
        )])
    }

    fn rejected(status: StatusCode, violation: Violation, debug_message: String) -> Self {
        LabError::Rejected {
            status,
            detail: vec![violation],
            debug_message: Some(debug_message),
        }
    }
}

/// Error payload: `{"detail": ...}`.
#[derive(Serialize)]
pub struct DetailBody<T: Serialize> {
    pub detail: T,
}

impl IntoResponse for LabError {
    fn into_response(self) -> Response {
        match self {
            LabError::NotFound(what) => {
                (StatusCode::NOT_FOUND, Json(DetailBody { detail: what })).into_response()
            }

            LabError::Rejected {
                status,
                detail,
                debug_message,
            } => {
                if let Some(debug_message) = debug_message {
                    tracing::warn!(
                        status = %status,
                        violations = detail.len(),
                        debug_message = %debug_message,
                        "Request rejected"
                    );
                } else {
                    tracing::warn!(status = %status, violations = detail.len(), "Request rejected");
                }
                (status, Json(DetailBody { detail })).into_response()
            }

            LabError::PartTooLarge { field, limit } => {
                tracing::warn!(field = %field, limit, "Upload part too large");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(DetailBody {
                        detail: format!("Part `{field}` exceeds the {limit} byte limit"),
                    }),
                )
                    .into_response()
            }

            LabError::Multipart(e) => {
                let status = e.status();
                tracing::warn!(status = %status, error = %e, "Multipart rejected");
                (status, Json(DetailBody { detail: e.body_text() })).into_response()
            }

            LabError::Io(_) | LabError::Database(_) | LabError::Ractor(_) => {
                tracing::error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(DetailBody {
                        detail: "Internal Server Error",
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<JsonRejection> for LabError {
    fn from(rejection: JsonRejection) -> Self {
        let debug_message = rejection.body_text();
        match rejection {
            JsonRejection::JsonSyntaxError(_) => LabError::rejected(
                StatusCode::UNPROCESSABLE_ENTITY,
                Violation::new(&["body"], "JSON decode error", "json_invalid"),
                debug_message,
            ),
            JsonRejection::JsonDataError(_) => LabError::rejected(
                StatusCode::UNPROCESSABLE_ENTITY,
                Violation::new(&["body"], debug_message.clone(), "value_error"),
                debug_message,
            ),
            JsonRejection::MissingJsonContentType(_) => LabError::rejected(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Violation::new(
                    &["header", "content-type"],
                    "Expected `application/json`",
                    "content_type",
                ),
                debug_message,
            ),
            _ => LabError::rejected(
                StatusCode::BAD_REQUEST,
                Violation::new(&["body"], "Failed to read request body", "body_read"),
                debug_message,
            ),
        }
    }
}

impl From<PathRejection> for LabError {
    fn from(rejection: PathRejection) -> Self {
        let debug_message = rejection.body_text();
        LabError::rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            Violation::new(&["path"], debug_message.clone(), "path_parsing"),
            debug_message,
        )
    }
}

impl From<QueryRejection> for LabError {
    fn from(rejection: QueryRejection) -> Self {
        let debug_message = rejection.body_text();
        LabError::rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            Violation::new(&["query"], debug_message.clone(), "query_parsing"),
            debug_message,
        )
    }
}
