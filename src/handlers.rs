use crate::classify::ReportContext;
use crate::errors::AppError;
use crate::models::{
    Dashboard, Invite, InviteReport, NewInvite, NewReservation, ReportQuery, Reservation,
    SeatReport,
};
use crate::reports::{build_dashboard, build_invite_report, build_seat_report};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use crate::window::{date_key, parse_date, DateWindow};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::info;

const DEFAULT_RANGE_DAYS: i64 = 7;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = dashboard_snapshot(&state).await;
    Html(render_index(&dashboard))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(dashboard_snapshot(&state).await)
}

pub async fn get_invite_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<InviteReport>, AppError> {
    let ctx = ReportContext::now();
    let window = resolve_window(&state, &ctx, &query)?;
    let data = state.data.lock().await.clone();
    Ok(Json(build_invite_report(&ctx, &window, &data)))
}

pub async fn get_seat_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SeatReport>, AppError> {
    let ctx = ReportContext::now();
    let window = resolve_window(&state, &ctx, &query)?;
    let data = state.data.lock().await.clone();
    Ok(Json(build_seat_report(&ctx, &window, &data)))
}

pub async fn create_invite(
    State(state): State<AppState>,
    Json(payload): Json<NewInvite>,
) -> Result<Json<Invite>, AppError> {
    let date = parse_date(&payload.invite_date)
        .ok_or_else(|| AppError::bad_request("invite_date must be yyyy-mm-dd"))?;
    let invite = Invite {
        invite_date: date_key(date),
        invite_state: payload.invite_state.parse()?,
    };

    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    updated.invites.push(invite.clone());
    persist_data(&state.config.data_path, &updated).await?;
    *data = updated;
    info!(date = %invite.invite_date, state = %invite.invite_state, "invite recorded");

    Ok(Json(invite))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<NewReservation>,
) -> Result<Json<Reservation>, AppError> {
    let date = parse_date(&payload.reservation_date)
        .ok_or_else(|| AppError::bad_request("reservation_date must be yyyy-mm-dd"))?;
    let reservation = Reservation {
        reservation_date: date_key(date),
        activated: payload.activated,
    };

    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    updated.reservations.push(reservation.clone());
    persist_data(&state.config.data_path, &updated).await?;
    *data = updated;
    info!(
        date = %reservation.reservation_date,
        activated = reservation.activated,
        "reservation recorded"
    );

    Ok(Json(reservation))
}

async fn dashboard_snapshot(state: &AppState) -> Dashboard {
    let ctx = ReportContext::now();
    let data = state.data.lock().await.clone();
    build_dashboard(&ctx, &data, state.config.total_seats)
}

fn resolve_window(
    state: &AppState,
    ctx: &ReportContext,
    query: &ReportQuery,
) -> Result<DateWindow, AppError> {
    let start = match query.start.as_deref() {
        Some(raw) => {
            parse_date(raw).ok_or_else(|| AppError::bad_request("start must be yyyy-mm-dd"))?
        }
        None => ctx.today,
    };

    let range = query.range.unwrap_or(DEFAULT_RANGE_DAYS);
    let max = state.config.max_range_days;
    if range <= 0 || range > max {
        return Err(AppError::bad_request(format!(
            "range must be between 1 and {max}"
        )));
    }

    Ok(DateWindow::new(start, range))
}
