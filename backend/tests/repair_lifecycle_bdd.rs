//! Behaviour tests for the repair request lifecycle.
//!
//! Customers go through the public HTTP endpoints; the admin steps call the
//! command port directly so the scenarios stay focused on what the tracking
//! page shows.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use techfix::domain::ports::{RepairRequestCommand, UpdateRepairStatusRequest};
use techfix::domain::{ErrorCode, RepairStatus};
use techfix::inbound::http::configure_api;
use techfix::test_support::TestBackend;
use uuid::Uuid;

struct LastResponse {
    status: StatusCode,
    body: Value,
}

struct RepairWorld {
    backend: TestBackend,
    last: RefCell<Option<LastResponse>>,
    submitted: RefCell<Option<(Uuid, String)>>,
    rejected: RefCell<Option<ErrorCode>>,
    lookups_before: RefCell<usize>,
}

impl RepairWorld {
    fn new() -> Self {
        Self {
            backend: TestBackend::default(),
            last: RefCell::new(None),
            submitted: RefCell::new(None),
            rejected: RefCell::new(None),
            lookups_before: RefCell::new(0),
        }
    }

    fn call(&self, req: actix_test::TestRequest) -> LastResponse {
        let state = self.backend.http_state();
        actix_web::rt::System::new().block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .service(web::scope("/api/v1").configure(configure_api)),
            )
            .await;
            let res = actix_test::call_service(&app, req.to_request()).await;
            let status = res.status();
            let body: Value = actix_test::read_body_json(res).await;
            LastResponse { status, body }
        })
    }

    fn record(&self, response: LastResponse) {
        *self.last.borrow_mut() = Some(response);
    }

    fn submit_john_doe(&self) {
        let response = self.call(
            actix_test::TestRequest::post()
                .uri("/api/v1/repair-requests")
                .set_json(json!({
                    "name": "John Doe",
                    "deviceType": "laptop",
                    "problem": "won't boot",
                    "contactMethod": "whatsapp",
                    "contact": "+31611111111"
                })),
        );
        assert_eq!(response.status, StatusCode::CREATED);
        let id = response.body["id"]
            .as_str()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .expect("submission id");
        let token = response.body["trackingToken"]
            .as_str()
            .expect("tracking token")
            .to_owned();
        *self.submitted.borrow_mut() = Some((id, token));
        self.record(response);
    }

    fn submitted(&self) -> (Uuid, String) {
        self.submitted.borrow().clone().expect("a request was submitted")
    }

    fn track(&self, token: &str) {
        let response = self.call(actix_test::TestRequest::get().uri(&format!("/api/v1/track/{token}")));
        self.record(response);
    }

    fn set_status(&self, status: RepairStatus) -> Result<(), ErrorCode> {
        let (id, _) = self.submitted();
        let commands = self.backend.http_state().repair_requests;
        actix_web::rt::System::new()
            .block_on(commands.update_status(UpdateRepairStatusRequest { id, status }))
            .map(|_| ())
            .map_err(|err| err.code())
    }

    fn with_last<T>(&self, f: impl FnOnce(&LastResponse) -> T) -> T {
        let last = self.last.borrow();
        f(last.as_ref().expect("a response was recorded"))
    }
}

#[fixture]
fn world() -> RepairWorld {
    RepairWorld::new()
}

#[given("an empty repair desk")]
fn an_empty_repair_desk(world: &RepairWorld) {
    *world.lookups_before.borrow_mut() = world.backend.repairs.token_lookup_count();
}

#[given("John Doe has submitted a laptop repair request")]
fn john_doe_has_submitted(world: &RepairWorld) {
    world.submit_john_doe();
}

#[when("John Doe submits a laptop repair request")]
fn john_doe_submits(world: &RepairWorld) {
    world.submit_john_doe();
}

#[when("the admin sets the status to {status}")]
fn the_admin_sets_the_status(world: &RepairWorld, status: String) {
    let status: RepairStatus = status.parse().expect("known status");
    world.set_status(status).expect("status change accepted");
}

#[when("the admin tries to set the status to {status}")]
fn the_admin_tries_to_set_the_status(world: &RepairWorld, status: String) {
    let status: RepairStatus = status.parse().expect("known status");
    *world.rejected.borrow_mut() = world.set_status(status).err();
}

#[when("a visitor tracks the token {token}")]
fn a_visitor_tracks_the_token(world: &RepairWorld, token: String) {
    world.track(&token);
}

#[when("a visitor opens a tracking link without a token")]
fn a_visitor_opens_a_tracking_link_without_a_token(world: &RepairWorld) {
    world.track("");
}

#[then("the response contains a tracking token distinct from the id")]
fn the_response_contains_a_tracking_token(world: &RepairWorld) {
    let (id, token) = world.submitted();
    assert!(!token.is_empty());
    assert_ne!(token, id.to_string());
}

#[then("tracking that token shows the status {status}")]
fn tracking_that_token_shows_the_status(world: &RepairWorld, status: String) {
    let (_, token) = world.submitted();
    world.track(&token);
    world.with_last(|last| {
        assert_eq!(last.status, StatusCode::OK);
        assert_eq!(last.body["repair"]["status"], status.as_str());
        assert_eq!(last.body["repair"]["name"], "John Doe");
    });
}

#[then("tracking that token shows the label \"{label}\"")]
fn tracking_that_token_shows_the_label(world: &RepairWorld, label: String) {
    let (_, token) = world.submitted();
    world.track(&token);
    world.with_last(|last| {
        assert_eq!(last.status, StatusCode::OK);
        assert_eq!(last.body["presentation"]["label"], label.as_str());
    });
}

#[then("the tracking page explains \"{sentence}\"")]
fn the_tracking_page_explains(world: &RepairWorld, sentence: String) {
    world.with_last(|last| {
        assert_eq!(last.body["presentation"]["description"], sentence.as_str());
    });
}

#[then("the response status is {code}")]
fn the_response_status_is(world: &RepairWorld, code: u16) {
    world.with_last(|last| assert_eq!(last.status.as_u16(), code));
}

#[then("the error message is \"{message}\"")]
fn the_error_message_is(world: &RepairWorld, message: String) {
    world.with_last(|last| assert_eq!(last.body["message"], message.as_str()));
}

#[then("the error links back to the home page")]
fn the_error_links_back_to_the_home_page(world: &RepairWorld) {
    world.with_last(|last| assert_eq!(last.body["details"]["homeUrl"], "/"));
}

#[then("the repository was not consulted")]
fn the_repository_was_not_consulted(world: &RepairWorld) {
    assert_eq!(
        world.backend.repairs.token_lookup_count(),
        *world.lookups_before.borrow()
    );
}

#[then("the status change is rejected as a conflict")]
fn the_status_change_is_rejected_as_a_conflict(world: &RepairWorld) {
    assert_eq!(*world.rejected.borrow(), Some(ErrorCode::Conflict));
}

#[scenario(
    path = "tests/features/repair_lifecycle.feature",
    name = "A submitted request can be tracked"
)]
fn submitted_request_can_be_tracked(world: RepairWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/repair_lifecycle.feature",
    name = "A completed repair explains pickup"
)]
fn completed_repair_explains_pickup(world: RepairWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/repair_lifecycle.feature",
    name = "An unknown token is not found"
)]
fn unknown_token_is_not_found(world: RepairWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/repair_lifecycle.feature",
    name = "A blank token is an invalid link"
)]
fn blank_token_is_an_invalid_link(world: RepairWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/repair_lifecycle.feature",
    name = "Cancelled requests cannot be reopened"
)]
fn cancelled_requests_cannot_be_reopened(world: RepairWorld) {
    drop(world);
}
