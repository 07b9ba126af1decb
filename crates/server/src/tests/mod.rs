// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use sambhram::{NoticeLevel, SelectionSet};
use sambhram_api::{OrderRequest, OrderResponse};
use sambhram_domain::{LeaderEntry, MemberEntry, PersonalDetails, RegistrationRecord};
use tower::ServiceExt;

const SOLO: &str = "solo-1";
const DUET: &str = "duet-1";
const SPRINT: &str = "sprint-1";
const SID: &str = "tab-7f3a";

const TEST_CATALOG: &str = r#"[
    {"_id": "solo-1", "eventName": "Solo Singing", "eventType": "cultural", "teamSize": "Individual"},
    {"_id": "duet-1", "eventName": "Duet Dance", "eventType": "cultural", "teamSize": "2-3 members"},
    {"_id": "sprint-1", "eventName": "Code Sprint", "eventType": "technical", "teamSize": "Individual"}
]"#;

/// Order backend that answers every request the same way.
struct StubBackend {
    response: Result<OrderResponse, String>,
}

#[async_trait]
impl OrderBackend for StubBackend {
    async fn create_order(&self, _request: &OrderRequest) -> Result<OrderResponse, ApiError> {
        self.response
            .clone()
            .map_err(|message| ApiError::Backend { message })
    }
}

fn create_test_order_response() -> OrderResponse {
    OrderResponse {
        participant_id: Some(String::from("SAM-0001")),
        order_id: Some(String::from("order_123")),
        amount: Some(200),
        currency: None,
    }
}

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state(key: Option<&str>, backend: StubBackend) -> AppState {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    let catalog: Catalog = Catalog::from_json_str(TEST_CATALOG).expect("Invalid test catalog");
    let mut context: SessionContext = SessionContext::new(catalog);
    context.closed_events.insert(EventId::new(SPRINT));

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        context: Arc::new(context),
        backend: Arc::new(backend),
        gateway: Arc::new(GatewayConfig::with_key(key.map(String::from))),
    }
}

fn create_default_app_state() -> AppState {
    create_test_app_state(
        Some("rzp_test_key"),
        StubBackend {
            response: Ok(create_test_order_response()),
        },
    )
}

fn create_test_personal() -> PersonalDetails {
    PersonalDetails {
        name: String::from("Asha Rao"),
        email: String::from("asha@example.com"),
        college: String::from("SDIT"),
        branch: String::from("CSE"),
        mobile: String::from("9876543210"),
        ..PersonalDetails::default()
    }
}

fn create_test_record() -> RegistrationRecord {
    RegistrationRecord {
        team_name: String::from("Twin Steps"),
        leader: LeaderEntry::new("Asha Rao", "asha@example.com", "9876543210"),
        members: vec![MemberEntry::new("Kiran Shetty", "kiran@example.com")],
    }
}

/// A session ready for checkout: both events selected, details filled.
fn create_checkout_session() -> Session {
    let mut session: Session = Session::new();
    session
        .registrations
        .set(EventId::new(DUET), create_test_record());
    session.selection = SelectionSet::from_ids([EventId::new(SOLO), EventId::new(DUET)]);
    session.personal = create_test_personal();
    session
}

async fn seed_session(app_state: &AppState, session: &Session) {
    let mut persistence = app_state.persistence.lock().await;
    persistence.save_session(SID, session).unwrap();
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn send_command(app: &Router, command: &Command) -> Response {
    send(
        app,
        "POST",
        &format!("/sessions/{SID}/commands"),
        Some(serde_json::to_string(command).unwrap()),
    )
    .await
}

#[tokio::test]
async fn test_list_events_returns_whole_catalog() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", "/events", None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let list: EventListResponse = read_json(response).await;
    let ids: Vec<&str> = list.events.iter().map(|e| e.event.id.value()).collect();
    assert_eq!(ids, vec![SOLO, DUET, SPRINT]);
}

#[tokio::test]
async fn test_list_events_filters_by_category() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", "/events?category=technical", None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let list: EventListResponse = read_json(response).await;
    assert_eq!(list.events.len(), 1);
    assert_eq!(list.events[0].event.id.value(), SPRINT);
    assert!(list.events[0].closed);
}

#[tokio::test]
async fn test_list_events_rejects_unknown_category() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", "/events?category=sports", None).await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.error);
}

#[tokio::test]
async fn test_get_event_includes_team_requirement() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", &format!("/events/{DUET}"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let view: EventView = read_json(response).await;
    assert_eq!(view.event.title, "Duet Dance");
    assert!(view.requirement.is_team);
    assert_eq!(view.requirement.min, 2);
    assert_eq!(view.requirement.max, 3);
    assert!(!view.closed);
}

#[tokio::test]
async fn test_get_unknown_event_is_not_found() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", "/events/missing-1", None).await;
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_session_is_empty() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", &format!("/sessions/{SID}"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let view: SessionResponse = read_json(response).await;
    assert!(view.session.selection.is_empty());
    assert_eq!(view.totals.total, 0);
    assert!(view.notices.is_empty());
}

#[tokio::test]
async fn test_invalid_session_id_is_rejected() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(&app, "GET", "/sessions/tab:7f3a", None).await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_individual_event_is_saved() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send_command(
        &app,
        &Command::SelectEvent {
            event_id: EventId::new(SOLO),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let view: SessionResponse = read_json(response).await;
    assert_eq!(view.totals.count, 1);

    let response: Response = send(&app, "GET", &format!("/sessions/{SID}/totals"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let totals: CheckoutTotals = read_json(response).await;
    assert_eq!(totals.count, 1);
    assert_eq!(totals.total, 100);
}

#[tokio::test]
async fn test_select_team_event_without_registration_is_rejected() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());

    let response: Response = send_command(
        &app,
        &Command::SelectEvent {
            event_id: EventId::new(DUET),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let stored: Session = app_state
        .persistence
        .lock()
        .await
        .load_session(SID)
        .unwrap();
    assert!(stored.selection.is_empty());
}

#[tokio::test]
async fn test_select_closed_event_is_rejected() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send_command(
        &app,
        &Command::SelectEvent {
            event_id: EventId::new(SPRINT),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_select_unknown_event_is_not_found() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send_command(
        &app,
        &Command::SelectEvent {
            event_id: EventId::new("missing-1"),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_command_is_rejected() {
    let app: Router = build_router(create_default_app_state());

    let response: Response = send(
        &app,
        "POST",
        &format!("/sessions/{SID}/commands"),
        Some(String::from(r#"{"type": "launch_rocket"}"#)),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_emptied_team_drops_event_with_notice() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send_command(
        &app,
        &Command::RemoveMember {
            event_id: EventId::new(DUET),
            index: 0,
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let view: SessionResponse = read_json(response).await;
    assert!(!view.session.selection.contains(&EventId::new(DUET)));
    assert!(view.session.selection.contains(&EventId::new(SOLO)));
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_restored_session_is_revalidated() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());

    let mut stale: Session = Session::new();
    stale.selection = SelectionSet::from_ids([EventId::new(SOLO), EventId::new(DUET)]);
    seed_session(&app_state, &stale).await;

    let response: Response = send(&app, "GET", &format!("/sessions/{SID}"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let view: SessionResponse = read_json(response).await;
    assert_eq!(view.session.selection.ids(), &[EventId::new(SOLO)]);
    assert_eq!(view.notices.len(), 1);

    let stored: Session = app_state
        .persistence
        .lock()
        .await
        .load_session(SID)
        .unwrap();
    assert_eq!(stored.selection.len(), 1);
}

#[tokio::test]
async fn test_checkout_returns_payment_options() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send(&app, "POST", &format!("/sessions/{SID}/checkout"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let handoff: CheckoutHandoff = read_json(response).await;
    assert_eq!(handoff.order.order_id, "order_123");
    assert_eq!(handoff.options.key, "rzp_test_key");
    assert_eq!(handoff.options.currency, "INR");
    assert_eq!(handoff.options.prefill.contact, "9876543210");
}

#[tokio::test]
async fn test_checkout_without_key_is_unavailable() {
    let app_state: AppState = create_test_app_state(
        None,
        StubBackend {
            response: Ok(create_test_order_response()),
        },
    );
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send(&app, "POST", &format!("/sessions/{SID}/checkout"), None).await;
    assert_eq!(response.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_checkout_with_missing_details_is_rejected() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    let mut session: Session = create_checkout_session();
    session.personal.mobile.clear();
    seed_session(&app_state, &session).await;

    let response: Response = send(&app, "POST", &format!("/sessions/{SID}/checkout"), None).await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("mobile"));
}

#[tokio::test]
async fn test_checkout_backend_failure_is_bad_gateway() {
    let app_state: AppState = create_test_app_state(
        Some("rzp_test_key"),
        StubBackend {
            response: Err(String::from("order service down")),
        },
    );
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send(&app, "POST", &format!("/sessions/{SID}/checkout"), None).await;
    assert_eq!(response.status(), HttpStatusCode::BAD_GATEWAY);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("order service down"));
}

#[tokio::test]
async fn test_successful_payment_records_order() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let outcome: PaymentOutcome = PaymentOutcome::Succeeded {
        participant_id: Some(String::from("SAM-0001")),
        order_id: String::from("order_123"),
    };
    let response: Response = send(
        &app,
        "POST",
        &format!("/sessions/{SID}/payment"),
        Some(serde_json::to_string(&outcome).unwrap()),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let payment: PaymentResponse = read_json(response).await;
    let confirmation: PaymentConfirmation = payment.confirmation.unwrap();
    assert_eq!(confirmation.order_ids, vec![String::from("order_123")]);
    assert!(payment.view.session.selection.is_empty());
    assert_eq!(payment.view.notices[0].level, NoticeLevel::Info);

    let mut persistence = app_state.persistence.lock().await;
    assert_eq!(persistence.order_ids().unwrap(), vec![String::from("order_123")]);
    assert!(persistence.load_session(SID).unwrap().selection.is_empty());
}

#[tokio::test]
async fn test_record_payment_command_keeps_order_id() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send_command(
        &app,
        &Command::RecordPayment {
            order_id: String::from("order_456"),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let view: SessionResponse = read_json(response).await;
    assert!(view.session.selection.is_empty());

    let response: Response = send(&app, "GET", &format!("/sessions/{SID}"), None).await;
    let reloaded: SessionResponse = read_json(response).await;
    assert_eq!(
        reloaded.session.order_history,
        vec![String::from("order_456")]
    );

    let mut persistence = app_state.persistence.lock().await;
    assert_eq!(
        persistence.order_ids().unwrap(),
        vec![String::from("order_456")]
    );
}

#[tokio::test]
async fn test_dismissed_payment_keeps_cart() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;

    let response: Response = send(
        &app,
        "POST",
        &format!("/sessions/{SID}/payment"),
        Some(String::from(r#"{"status": "dismissed"}"#)),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let payment: PaymentResponse = read_json(response).await;
    assert!(payment.confirmation.is_none());
    assert_eq!(payment.view.session.selection.len(), 2);
    assert_eq!(payment.view.notices[0].message, "Payment cancelled");

    let mut persistence = app_state.persistence.lock().await;
    assert!(persistence.order_ids().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_session_keeps_order_history() {
    let app_state: AppState = create_default_app_state();
    let app: Router = build_router(app_state.clone());
    seed_session(&app_state, &create_checkout_session()).await;
    app_state
        .persistence
        .lock()
        .await
        .append_order_id("order_001")
        .unwrap();

    let response: Response = send(&app, "DELETE", &format!("/sessions/{SID}"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let cleared: ClearSessionResponse = read_json(response).await;
    assert_eq!(cleared.removed, 4);

    let response: Response = send(&app, "GET", &format!("/sessions/{SID}"), None).await;
    let view: SessionResponse = read_json(response).await;
    assert!(view.session.selection.is_empty());
    assert_eq!(view.session.order_history, vec![String::from("order_001")]);
}
