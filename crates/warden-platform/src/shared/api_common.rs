//! Common API types and utilities

use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope wrapping every endpoint's payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Success response with optional message
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }
}

/// Created response with ID
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

impl CreatedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_under_data() {
        let json = serde_json::to_value(Envelope::new(SuccessResponse::ok())).unwrap();
        assert_eq!(json["data"]["success"], true);
        assert!(json["data"].get("message").is_none());
    }

    #[test]
    fn created_response_carries_id() {
        let json = serde_json::to_value(Envelope::new(CreatedResponse::new("abc"))).unwrap();
        assert_eq!(json["data"]["id"], "abc");
    }
}
