// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use sambhram::{
    Command, Notice, Session, SessionContext, TransitionResult, apply, revalidate,
};
use sambhram_api::{
    ApiError, CheckoutHandoff, GatewayConfig, HttpOrderBackend, OrderBackend, PaymentCompletion,
    PaymentConfirmation, PaymentOutcome, begin_checkout, complete_payment,
};
use sambhram_domain::{
    Catalog, Category, CheckoutTotals, DiscountPolicy, EventId, EventRecord, OverflowPolicy,
    TeamRequirement, classify,
};
use sambhram_persistence::{PersistenceError, SqlitePersistence};
use serde::{Deserialize, Serialize};
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use session::SessionId;

/// Sambhram Server - registration and checkout for the Sambhram fest
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SAMBHRAM_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000, env = "SAMBHRAM_PORT")]
    port: u16,

    /// Event catalog JSON file. Defaults to the bundled catalog.
    #[arg(long, env = "SAMBHRAM_CATALOG")]
    catalog: Option<PathBuf>,

    /// Base URL of the order backend
    #[arg(long, env = "SAMBHRAM_BACKEND_URL", default_value = "http://localhost:4000")]
    backend_url: String,

    /// Public payment gateway key. Checkout is refused while unset.
    #[arg(long, env = "SAMBHRAM_PAYMENT_KEY")]
    payment_key: Option<String>,

    /// Event ids closed for registration (repeat or comma-separate)
    #[arg(long = "closed-event", env = "SAMBHRAM_CLOSED_EVENTS", value_delimiter = ',')]
    closed_events: Vec<String>,

    /// Discount applied when more events are selected than the tier table covers
    #[arg(long, value_enum, default_value_t = DiscountOverflow::NoDiscount, env = "SAMBHRAM_DISCOUNT_OVERFLOW")]
    discount_overflow: DiscountOverflow,
}

/// Command-line spelling of the discount overflow policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DiscountOverflow {
    NoDiscount,
    CapAtTopTier,
}

impl From<DiscountOverflow> for OverflowPolicy {
    fn from(value: DiscountOverflow) -> Self {
        match value {
            DiscountOverflow::NoDiscount => Self::NoDiscount,
            DiscountOverflow::CapAtTopTier => Self::CapAtTopTier,
        }
    }
}

/// Application state shared across handlers.
///
/// Persistence sits behind a Mutex; the catalog context, gateway settings
/// and order backend are read-only after startup.
#[derive(Clone)]
struct AppState {
    /// Session and device state.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Catalog, closed events and discount rules.
    context: Arc<SessionContext>,
    /// Creates payment orders.
    backend: Arc<dyn OrderBackend>,
    /// Payment widget settings.
    gateway: Arc<GatewayConfig>,
}

/// Query parameters for the event listing.
#[derive(Debug, Clone, Deserialize)]
struct EventQuery {
    /// Only list events in this category.
    category: Option<String>,
}

/// A catalog event with its derived registration rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventView {
    #[serde(flatten)]
    event: EventRecord,
    requirement: TeamRequirement,
    closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventListResponse {
    events: Vec<EventView>,
}

/// A session as the client sees it, with messages from the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionResponse {
    session: Session,
    totals: CheckoutTotals,
    notices: Vec<Notice>,
}

/// Response for a reported payment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaymentResponse {
    #[serde(flatten)]
    view: SessionResponse,
    /// Present only for a successful payment.
    confirmation: Option<PaymentConfirmation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClearSessionResponse {
    /// Number of stored keys removed.
    removed: usize,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true for error responses.
    error: bool,
    /// The error message.
    message: String,
}

/// Wrapper for API errors that can be converted to HTTP responses.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: true,
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::PaymentNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Backend { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        if let PersistenceError::InvalidSessionId(_) = err {
            return Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            };
        }
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

fn event_view(context: &SessionContext, event: &EventRecord) -> EventView {
    EventView {
        event: event.clone(),
        requirement: classify(event),
        closed: context.is_closed(&event.id),
    }
}

fn session_response(
    context: &SessionContext,
    session: Session,
    notices: Vec<Notice>,
) -> SessionResponse {
    let totals: CheckoutTotals = context.totals(&session);
    SessionResponse {
        session,
        totals,
        notices,
    }
}

/// Loads a session and drops cart entries that no longer validate.
///
/// Writes the session back only when re-validation changed it.
fn load_revalidated(
    persistence: &mut SqlitePersistence,
    context: &SessionContext,
    session_id: &str,
) -> Result<TransitionResult, PersistenceError> {
    let stored: Session = persistence.load_session(session_id)?;
    let result: TransitionResult = revalidate(context, &stored);
    if result.new_state != stored {
        warn!(
            session_id,
            dropped = stored.selection.len() - result.new_state.selection.len(),
            "Dropped invalid cart entries from restored session"
        );
        persistence.save_session(session_id, &result.new_state)?;
    }
    Ok(result)
}

/// Handler for GET /events endpoint.
///
/// Lists catalog events, optionally filtered by category.
#[allow(clippy::unused_async)]
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<EventListResponse>, HttpError> {
    info!(category = ?query.category, "Handling list_events request");

    let context: &SessionContext = &app_state.context;
    let events: Vec<EventView> = match query.category.as_deref() {
        Some(raw) => {
            let category: Category = raw.parse().map_err(ApiError::from)?;
            context
                .catalog
                .by_category(category)
                .map(|event| event_view(context, event))
                .collect()
        }
        None => context
            .catalog
            .events()
            .iter()
            .map(|event| event_view(context, event))
            .collect(),
    };

    Ok(Json(EventListResponse { events }))
}

/// Handler for GET `/events/{id}` endpoint.
#[allow(clippy::unused_async)]
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventView>, HttpError> {
    info!(event_id = %event_id, "Handling get_event request");

    let context: &SessionContext = &app_state.context;
    let event: &EventRecord = context
        .catalog
        .require(&EventId::new(&event_id))
        .map_err(ApiError::from)?;

    Ok(Json(event_view(context, event)))
}

/// Handler for GET `/sessions/{sid}` endpoint.
///
/// Restores the session and re-validates its cart.
async fn handle_get_session(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SessionResponse>, HttpError> {
    info!(session_id = %session_id, "Handling get_session request");

    let mut persistence = app_state.persistence.lock().await;
    let loaded: TransitionResult =
        load_revalidated(&mut persistence, &app_state.context, &session_id)?;
    drop(persistence);

    Ok(Json(session_response(
        &app_state.context,
        loaded.new_state,
        loaded.notices,
    )))
}

/// Handler for POST `/sessions/{sid}/commands` endpoint.
///
/// Applies one command and saves the resulting session. A rejected command
/// leaves the stored session untouched. A recorded payment also goes into
/// the device's order history.
async fn handle_apply_command(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
    Json(command): Json<Command>,
) -> Result<Json<SessionResponse>, HttpError> {
    info!(session_id = %session_id, command = ?command, "Handling command request");

    let mut persistence = app_state.persistence.lock().await;
    let loaded: TransitionResult =
        load_revalidated(&mut persistence, &app_state.context, &session_id)?;

    let recorded_order: Option<String> = match &command {
        Command::RecordPayment { order_id } => Some(order_id.clone()),
        _ => None,
    };

    let mut result: TransitionResult =
        apply(&app_state.context, &loaded.new_state, command).map_err(ApiError::from)?;
    if let Some(order_id) = recorded_order {
        result.new_state.order_history = persistence.append_order_id(&order_id)?;
    }
    persistence.save_session(&session_id, &result.new_state)?;
    drop(persistence);

    let mut notices: Vec<Notice> = loaded.notices;
    notices.extend(result.notices);

    Ok(Json(session_response(
        &app_state.context,
        result.new_state,
        notices,
    )))
}

/// Handler for GET `/sessions/{sid}/totals` endpoint.
async fn handle_get_totals(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<CheckoutTotals>, HttpError> {
    info!(session_id = %session_id, "Handling get_totals request");

    let mut persistence = app_state.persistence.lock().await;
    let loaded: TransitionResult =
        load_revalidated(&mut persistence, &app_state.context, &session_id)?;
    drop(persistence);

    Ok(Json(app_state.context.totals(&loaded.new_state)))
}

/// Handler for POST `/sessions/{sid}/checkout` endpoint.
///
/// Creates a payment order and returns the payment widget options.
async fn handle_checkout(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<CheckoutHandoff>, HttpError> {
    info!(session_id = %session_id, "Handling checkout request");

    let mut persistence = app_state.persistence.lock().await;
    let loaded: TransitionResult =
        load_revalidated(&mut persistence, &app_state.context, &session_id)?;
    drop(persistence);

    let handoff: CheckoutHandoff = begin_checkout(
        app_state.backend.as_ref(),
        &app_state.gateway,
        &app_state.context,
        &loaded.new_state,
    )
    .await?;

    Ok(Json(handoff))
}

/// Handler for POST `/sessions/{sid}/payment` endpoint.
///
/// Applies the payment widget's outcome. A successful payment is added to
/// the device's order history before the session is saved.
async fn handle_payment(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
    Json(outcome): Json<PaymentOutcome>,
) -> Result<Json<PaymentResponse>, HttpError> {
    info!(session_id = %session_id, outcome = ?outcome, "Handling payment request");

    let mut persistence = app_state.persistence.lock().await;
    let loaded: TransitionResult =
        load_revalidated(&mut persistence, &app_state.context, &session_id)?;

    let completion: PaymentCompletion =
        complete_payment(&app_state.context, &loaded.new_state, outcome)?;
    let mut session: Session = completion.session;
    let mut confirmation: Option<PaymentConfirmation> = completion.confirmation;

    if let Some(confirmed) = confirmation.as_mut() {
        let order_ids: Vec<String> = persistence.append_order_id(&confirmed.order_id)?;
        confirmed.order_ids.clone_from(&order_ids);
        session.order_history = order_ids;
    }
    persistence.save_session(&session_id, &session)?;
    drop(persistence);

    let mut notices: Vec<Notice> = loaded.notices;
    notices.extend(completion.notices);

    Ok(Json(PaymentResponse {
        view: session_response(&app_state.context, session, notices),
        confirmation,
    }))
}

/// Handler for DELETE `/sessions/{sid}` endpoint.
///
/// Forgets the session. Device order history is kept.
async fn handle_clear_session(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ClearSessionResponse>, HttpError> {
    info!(session_id = %session_id, "Handling clear_session request");

    let mut persistence = app_state.persistence.lock().await;
    let removed: usize = persistence.clear_session(&session_id)?;
    drop(persistence);

    Ok(Json(ClearSessionResponse { removed }))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(handle_list_events))
        .route("/events/{id}", get(handle_get_event))
        .route(
            "/sessions/{sid}",
            get(handle_get_session).delete(handle_clear_session),
        )
        .route("/sessions/{sid}/commands", post(handle_apply_command))
        .route("/sessions/{sid}/totals", get(handle_get_totals))
        .route("/sessions/{sid}/checkout", post(handle_checkout))
        .route("/sessions/{sid}/payment", post(handle_payment))
        .with_state(app_state)
}

fn load_catalog(path: Option<&FsPath>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog: Catalog = if let Some(path) = path {
        info!("Loading catalog from: {}", path.display());
        let json: String = std::fs::read_to_string(path)?;
        Catalog::from_json_str(&json)?
    } else {
        info!("Using bundled catalog");
        Catalog::bundled()?
    };
    info!(events = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sambhram Server");

    let mut context: SessionContext = SessionContext::new(load_catalog(args.catalog.as_deref())?);
    context.discount_policy = DiscountPolicy::new(args.discount_overflow.into());
    for raw in &args.closed_events {
        let event_id: EventId = EventId::new(raw.trim());
        if context.catalog.get(&event_id).is_none() {
            warn!(event_id = %event_id, "Closed event is not in the catalog");
        }
        context.closed_events.insert(event_id);
    }

    if args.payment_key.is_none() {
        warn!("No payment key configured; checkout is disabled");
    }

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    info!("Order backend at: {}", args.backend_url);
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        context: Arc::new(context),
        backend: Arc::new(HttpOrderBackend::new(&args.backend_url)),
        gateway: Arc::new(GatewayConfig::with_key(args.payment_key)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
