//! Success envelope shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{"message": ..., "data": ...}` with `data` omitted when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_only_omits_data() {
        let value = serde_json::to_value(ApiResponse::message("book added")).unwrap();
        assert_eq!(value, json!({ "message": "book added" }));
    }

    #[test]
    fn empty_collection_is_still_present() {
        let value =
            serde_json::to_value(ApiResponse::with_data("fetched", Vec::<u32>::new())).unwrap();
        assert_eq!(value, json!({ "message": "fetched", "data": [] }));
    }

    #[test]
    fn renders_with_200() {
        let response = ApiResponse::message("delete successful").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
