use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::handlers::verify_email::verify_email;
use crate::domain::account::service::AccountService;
use crate::domain::verification::service::VerificationService;
use crate::outbound::repositories::account::PostgresAccountRepository;
use crate::outbound::repositories::verification::PostgresVerificationRepository;

/// Concrete verification service wiring used by the HTTP surface.
pub type Verifier = VerificationService<PostgresVerificationRepository, PostgresAccountRepository>;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresAccountRepository, Verifier>>,
    pub verification_service: Arc<Verifier>,
}

pub fn create_router(
    account_service: Arc<AccountService<PostgresAccountRepository, Verifier>>,
    verification_service: Arc<Verifier>,
) -> Router {
    let state = AppState {
        account_service,
        verification_service,
    };

    let routes = Router::new()
        .route("/user/signup", post(signup))
        .route("/user/verify/:account_id/:token", get(verify_email))
        .route("/user/signin", post(signin));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
