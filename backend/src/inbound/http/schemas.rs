//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors describe them for
//! the generated document and live in the adapter layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed request, failed validation or a rejected ledger rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing, invalid or expired bearer token, or wrong password.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Unknown user or merch item.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[schema(rename = "conflict")]
    Conflict,
    /// The ledger stayed busy after retries; try again.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "insufficient coins")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "6f1c0d7e-5a3b-4d0e-9a4f-2b7c8e9d1f00")]
    trace_id: Option<String>,
    /// Machine-readable context such as `{"code": "insufficient_coins"}`.
    details: Option<serde_json::Value>,
}
