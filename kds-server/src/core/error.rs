use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ServerError::Upstream(err) => {
                // The caller needs to know the transition did not happen,
                // so upstream write failures surface here verbatim.
                let (status, error_type) = match err {
                    UpstreamError::Rejected { status: 404, .. } => {
                        (StatusCode::NOT_FOUND, "order_not_found")
                    }
                    UpstreamError::Rejected { status: 409, .. } => {
                        (StatusCode::CONFLICT, "status_conflict")
                    }
                    UpstreamError::Rejected { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "upstream_rejected")
                    }
                    UpstreamError::Unavailable(_) => {
                        (StatusCode::BAD_GATEWAY, "upstream_unavailable")
                    }
                    UpstreamError::Protocol(_) => (StatusCode::BAD_GATEWAY, "upstream_protocol"),
                };
                (status, error_type, err.to_string())
            }
            ServerError::Internal(err) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

/// 处理器的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_rejection_maps_to_client_errors() {
        let not_found = ServerError::Upstream(UpstreamError::Rejected {
            status: 404,
            body: "order 42 not found".into(),
        });
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict = ServerError::Upstream(UpstreamError::Rejected {
            status: 409,
            body: "already completed".into(),
        });
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_upstream_protocol_maps_to_bad_gateway() {
        let err = ServerError::Upstream(UpstreamError::Protocol("empty body".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_maps_to_server_error() {
        let err = ServerError::Internal(anyhow::anyhow!("state wiring failed"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
