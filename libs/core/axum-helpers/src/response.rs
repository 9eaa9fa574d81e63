//! Success envelope shared by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{limit, offset, total}` block returned with list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
}

/// Response envelope.
///
/// `data`, `meta` and `error` are omitted when empty. Errors are written by
/// [`crate::AppError`] with the same field names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: None,
            error: None,
        }
    }

    pub fn with_meta(mut self, meta: Pagination) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Respond with 201 Created instead of 200.
    pub fn created(self) -> (StatusCode, Self) {
        (StatusCode::CREATED, self)
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: None,
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Documentation schema for message-only responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = serde_json::to_value(ApiResponse::message("deleted")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "deleted" }));
    }

    #[test]
    fn test_meta_serialization() {
        let response = ApiResponse::ok("ok", vec![1, 2]).with_meta(Pagination {
            limit: 2,
            offset: 4,
            total: 9,
        });
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["meta"]["total"], 9);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_created_status() {
        let (status, _) = ApiResponse::ok("created", 1).created();
        assert_eq!(status, StatusCode::CREATED);
    }
}
