use crate::classify::{
    classify_invites, classify_reservations, overlay_predictions, ReportContext,
};
use crate::models::{
    Dashboard, InviteReport, InviteState, InviteSummary, SeatReport, SeatSummary, VisitorData,
};
use crate::stats::{average, ratio, sum};
use crate::window::{date_key, parse_date, BucketMap, DateWindow};
use tracing::warn;

const DASHBOARD_DAYS: i64 = 7;

pub fn build_invite_report(
    ctx: &ReportContext,
    window: &DateWindow,
    data: &VisitorData,
) -> InviteReport {
    let buckets = classify_invites(ctx, window, &data.invites);
    let predicted = overlay_predictions(window, &data.predictions);
    let days = window_days(window);

    let summary = InviteSummary {
        invites_sent: sum(&buckets.sent),
        visitors: sum(&buckets.visitors),
        cancellations: sum(&buckets.cancellations),
        avg_invites_per_day: average(&buckets.sent, days).ok(),
        avg_visitors_per_day: average(&buckets.visitors, days).ok(),
        cancellation_rate: ratio(&buckets.cancellations, &buckets.sent).ok(),
        visitor_rate: ratio(&buckets.visitors, &buckets.sent).ok(),
    };

    let (start_date, end_date) = bounds(window);
    InviteReport {
        start_date,
        end_date,
        range: window.range_days,
        invites: buckets.sent.to_series(),
        visitors: buckets.visitors.to_series(),
        cancellations: buckets.cancellations.to_series(),
        predicted_visitors: predicted.visitors.to_series(),
        summary,
        skipped: buckets.skipped,
    }
}

pub fn build_seat_report(
    ctx: &ReportContext,
    window: &DateWindow,
    data: &VisitorData,
) -> SeatReport {
    let buckets = classify_reservations(ctx, window, &data.reservations);
    let predicted = overlay_predictions(window, &data.predictions);
    let days = window_days(window);

    let summary = SeatSummary {
        reserved: sum(&buckets.reservations),
        used: sum(&buckets.used),
        avg_reserved_per_day: average(&buckets.reservations, days).ok(),
        avg_used_per_day: average(&buckets.used, days).ok(),
        usage_rate: ratio(&buckets.used, &buckets.reservations).ok(),
    };

    let (start_date, end_date) = bounds(window);
    SeatReport {
        start_date,
        end_date,
        range: window.range_days,
        reservations: buckets.reservations.to_series(),
        used: buckets.used.to_series(),
        predicted_seats: predicted.seats.to_series(),
        summary,
        skipped: buckets.skipped,
    }
}

/// The admin overview: a week starting today with every live invite and
/// every seat booking counted per day. The invite average covers every
/// invite in the week, cancelled ones included.
pub fn build_dashboard(ctx: &ReportContext, data: &VisitorData, total_seats: u64) -> Dashboard {
    let window = DateWindow::new(ctx.today, DASHBOARD_DAYS);
    let mut invites = BucketMap::for_window(&window);
    let mut cancellations = BucketMap::for_window(&window);
    let mut all_invites = BucketMap::for_window(&window);
    let mut reservations = BucketMap::for_window(&window);

    for invite in &data.invites {
        let Some(date) = parse_date(&invite.invite_date) else {
            warn!(
                date = %invite.invite_date,
                state = %invite.invite_state,
                "skipping invite with malformed date"
            );
            continue;
        };
        all_invites.increment(date);
        if invite.invite_state == InviteState::Cancelled {
            cancellations.increment(date);
        } else {
            invites.increment(date);
        }
    }

    for reservation in &data.reservations {
        let Some(date) = parse_date(&reservation.reservation_date) else {
            warn!(
                date = %reservation.reservation_date,
                "skipping reservation with malformed date"
            );
            continue;
        };
        reservations.increment(date);
    }

    let today = date_key(ctx.today);
    let reserved_today = reservations.get(&today).unwrap_or_default();
    let days = window_days(&window);

    Dashboard {
        invites_today: invites.get(&today).unwrap_or_default(),
        cancellations: sum(&cancellations),
        avg_invites_per_day: average(&all_invites, days).ok(),
        avg_reservations_per_day: average(&reservations, days).ok(),
        total_seats,
        seats_available_today: total_seats.saturating_sub(reserved_today),
        invites: invites.to_series(),
        reservations: reservations.to_series(),
        date: today,
    }
}

fn window_days(window: &DateWindow) -> u64 {
    u64::try_from(window.range_days).unwrap_or(0)
}

fn bounds(window: &DateWindow) -> (String, String) {
    let start = date_key(window.start);
    let end = window.end().map(date_key).unwrap_or_else(|| start.clone());
    (start, end)
}
