//! Request validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors with `details { field, code }`
//! and, where useful, the rejected `value`.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{CategoryFilter, Error, LoginValidationError, RepairStatus};

/// Machine-readable validation codes produced at the HTTP edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidUuid,
    InvalidStatus,
    UnknownCategory,
    EmptyEmail,
    EmptyPassword,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidStatus => "invalid_status",
            Self::UnknownCategory => "unknown_category",
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Newtype for field names so call sites cannot swap field and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "code": code.as_str(),
    }))
}

fn value_error(
    field: FieldName,
    code: ValidationCode,
    value: &str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "code": code.as_str(),
        "value": value,
    }))
}

/// Parse a UUID path segment.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        value_error(
            field,
            ValidationCode::InvalidUuid,
            value,
            format!("{} must be a valid UUID", field.0),
        )
    })
}

/// Parse a status name such as `in-progress`.
pub(crate) fn parse_status(value: &str) -> Result<RepairStatus, Error> {
    RepairStatus::from_str(value.trim()).map_err(|err| {
        value_error(
            FieldName::new("status"),
            ValidationCode::InvalidStatus,
            value,
            err.to_string(),
        )
    })
}

/// Parse the optional `category` query parameter; absent means all.
pub(crate) fn parse_category(value: Option<&str>) -> Result<CategoryFilter, Error> {
    value.map_or(Ok(CategoryFilter::All), |raw| {
        CategoryFilter::from_str(raw).map_err(|err| {
            value_error(
                FieldName::new("category"),
                ValidationCode::UnknownCategory,
                raw,
                err.to_string(),
            )
        })
    })
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => field_error(
            FieldName::new("email"),
            ValidationCode::EmptyEmail,
            err.to_string(),
        ),
        LoginValidationError::EmptyPassword => field_error(
            FieldName::new("password"),
            ValidationCode::EmptyPassword,
            err.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{ErrorCode, ServiceCategory};

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    fn uuids_are_trimmed_before_parsing() {
        let id = parse_uuid(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", FieldName::new("id"))
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn bad_uuid_reports_field_and_value() {
        let err = parse_uuid("42", FieldName::new("id")).expect_err("not a uuid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("id"));
        assert_eq!(detail(&err, "code"), Some("invalid_uuid"));
        assert_eq!(detail(&err, "value"), Some("42"));
    }

    #[rstest]
    #[case("in-progress", RepairStatus::InProgress)]
    #[case(" completed ", RepairStatus::Completed)]
    fn statuses_parse(#[case] raw: &str, #[case] expected: RepairStatus) {
        assert_eq!(parse_status(raw).expect("known status"), expected);
    }

    #[rstest]
    #[case("done")]
    #[case("InProgress")]
    fn unknown_statuses_are_rejected(#[case] raw: &str) {
        let err = parse_status(raw).expect_err("unknown status");
        assert_eq!(detail(&err, "code"), Some("invalid_status"));
    }

    #[rstest]
    #[case(None, CategoryFilter::All)]
    #[case(Some("all"), CategoryFilter::All)]
    #[case(Some("network-gear"), CategoryFilter::Only(ServiceCategory::NetworkGear))]
    fn categories_parse(#[case] raw: Option<&str>, #[case] expected: CategoryFilter) {
        assert_eq!(parse_category(raw).expect("known category"), expected);
    }

    #[rstest]
    fn unknown_category_is_rejected() {
        let err = parse_category(Some("drones")).expect_err("unknown slug");
        assert_eq!(detail(&err, "code"), Some("unknown_category"));
        assert_eq!(detail(&err, "value"), Some("drones"));
    }

    #[rstest]
    #[case(LoginValidationError::EmptyEmail, "email", "empty_email")]
    #[case(LoginValidationError::EmptyPassword, "password", "empty_password")]
    fn login_errors_name_the_field(
        #[case] input: LoginValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = map_login_validation_error(input);
        assert_eq!(detail(&err, "field"), Some(field));
        assert_eq!(detail(&err, "code"), Some(code));
    }
}
