use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/reports/invites", get(handlers::get_invite_report))
        .route("/api/reports/seats", get(handlers::get_seat_report))
        .route("/api/invites", post(handlers::create_invite))
        .route("/api/reservations", post(handlers::create_reservation))
        .with_state(state)
}
