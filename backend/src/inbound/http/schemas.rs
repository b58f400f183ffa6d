//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors live at the HTTP
//! edge and are registered under the domain names.

use utoipa::ToSchema;

/// Stable machine-readable error code.
#[derive(ToSchema)]
#[schema(as = ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No admin session.
    Unauthorized,
    /// Signed in without admin privileges.
    Forbidden,
    /// Unknown tracking token or repair request id.
    NotFound,
    /// The requested status change is not allowed.
    Conflict,
    /// The repair request store cannot be reached.
    ServiceUnavailable,
    /// Unexpected failure; details are withheld.
    InternalError,
}

/// Error payload returned by every endpoint.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "Repair request not found")]
    message: String,
    /// Correlation id, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context such as `{ "field": "name", "code": "empty_name" }`.
    details: Option<serde_json::Value>,
}

/// Repair lifecycle stage.
#[derive(ToSchema)]
#[schema(as = RepairStatus, rename_all = "kebab-case")]
pub enum RepairStatusSchema {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// How the customer wants to be contacted.
#[derive(ToSchema)]
#[schema(as = ContactMethod, rename_all = "lowercase")]
pub enum ContactMethodSchema {
    Whatsapp,
    Email,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::PartialSchema;

    use super::*;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises")
    }

    #[rstest]
    fn error_codes_use_wire_names() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
        assert_eq!(ErrorCodeSchema::name(), "ErrorCode");
    }

    #[rstest]
    fn error_schema_is_camel_case() {
        let json = schema_json::<ErrorSchema>();
        assert!(json.contains("traceId"));
        assert_eq!(ErrorSchema::name(), "Error");
    }

    #[rstest]
    fn statuses_are_kebab_case() {
        let json = schema_json::<RepairStatusSchema>();
        assert!(json.contains("in-progress"));
        assert!(json.contains("cancelled"));
    }
}
