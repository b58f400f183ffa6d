//! HTTP error mapping.

use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let payload = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, payload)
}

#[rstest]
#[case(Error::invalid_request("Invalid tracking link"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("not an admin"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Repair request not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("illegal transition"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("duplicate key value violates unique constraint")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"constraint": "repair_requests_tracking_token_key"}));

    let (status, header, payload) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), REDACTED_MESSAGE);
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("cannot move a repair request from cancelled to pending")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"from": "cancelled", "to": "pending"}));

    let (status, header, payload) = render(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload, error);
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let error = Error::not_found("Repair request not found").with_details(json!({"homeUrl": "/"}));

    let (status, header, payload) = render(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert_eq!(payload.details(), Some(&json!({"homeUrl": "/"})));
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("payload parse detail").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
