use crate::models::{Invite, InviteState, PredictedInviteData, Reservation};
use crate::window::{parse_date, BucketMap, DateWindow};
use chrono::{Local, NaiveDate};
use tracing::warn;

/// Per-request context handed to the aggregators instead of reading the
/// clock from inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContext {
    pub today: NaiveDate,
}

impl ReportContext {
    pub fn now() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteBuckets {
    pub sent: BucketMap,
    pub visitors: BucketMap,
    pub cancellations: BucketMap,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatBuckets {
    pub reservations: BucketMap,
    pub used: BucketMap,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedBuckets {
    pub visitors: BucketMap,
    pub seats: BucketMap,
}

pub fn classify_invites(
    ctx: &ReportContext,
    window: &DateWindow,
    invites: &[Invite],
) -> InviteBuckets {
    let mut buckets = InviteBuckets {
        sent: BucketMap::for_window(window),
        visitors: BucketMap::for_window(window),
        cancellations: BucketMap::for_window(window),
        skipped: 0,
    };

    for invite in invites {
        let Some(date) = parse_date(&invite.invite_date) else {
            warn!(
                date = %invite.invite_date,
                state = %invite.invite_state,
                "skipping invite with malformed date"
            );
            buckets.skipped += 1;
            continue;
        };

        match &invite.invite_state {
            InviteState::Inactive => {
                buckets.sent.increment(date);
            }
            InviteState::SignedIn | InviteState::SignedOut if date <= ctx.today => {
                buckets.sent.increment(date);
                buckets.visitors.increment(date);
            }
            InviteState::Cancelled => {
                buckets.cancellations.increment(date);
            }
            InviteState::Other(raw) => {
                warn!(date = %invite.invite_date, state = %raw, "skipping invite with unknown state");
                buckets.skipped += 1;
            }
            _ => {}
        }
    }

    buckets
}

pub fn classify_reservations(
    ctx: &ReportContext,
    window: &DateWindow,
    reservations: &[Reservation],
) -> SeatBuckets {
    let mut buckets = SeatBuckets {
        reservations: BucketMap::for_window(window),
        used: BucketMap::for_window(window),
        skipped: 0,
    };

    for reservation in reservations {
        let Some(date) = parse_date(&reservation.reservation_date) else {
            warn!(
                date = %reservation.reservation_date,
                "skipping reservation with malformed date"
            );
            buckets.skipped += 1;
            continue;
        };

        if !reservation.activated {
            buckets.reservations.increment(date);
        } else if date <= ctx.today {
            buckets.used.increment(date);
        }
    }

    buckets
}

/// Writes forecast values into zero-seeded maps. Later entries for the same
/// day replace earlier ones.
pub fn overlay_predictions(
    window: &DateWindow,
    predictions: &[PredictedInviteData],
) -> PredictedBuckets {
    let mut buckets = PredictedBuckets {
        visitors: BucketMap::for_window(window),
        seats: BucketMap::for_window(window),
    };

    for prediction in predictions {
        let Some(date) = parse_date(&prediction.date) else {
            warn!(date = %prediction.date, "skipping prediction with malformed date");
            continue;
        };
        buckets.visitors.set(date, prediction.visitors);
        buckets.seats.set(date, prediction.seat);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::sum;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invite(date: &str, state: InviteState) -> Invite {
        Invite {
            invite_date: date.to_string(),
            invite_state: state,
        }
    }

    fn reservation(date: &str, activated: bool) -> Reservation {
        Reservation {
            reservation_date: date.to_string(),
            activated,
        }
    }

    fn january_week() -> DateWindow {
        DateWindow::new(day(2024, 1, 1), 7)
    }

    #[test]
    fn invites_split_into_sent_visitors_and_cancellations() {
        let ctx = ReportContext::at(day(2024, 1, 10));
        let invites = vec![
            invite("2024-01-02", InviteState::Inactive),
            invite("2024-01-02", InviteState::SignedIn),
            invite("2024-01-02", InviteState::Cancelled),
        ];

        let buckets = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(buckets.sent.get("2024-01-02"), Some(2));
        assert_eq!(buckets.visitors.get("2024-01-02"), Some(1));
        assert_eq!(buckets.cancellations.get("2024-01-02"), Some(1));
        assert_eq!(buckets.skipped, 0);
    }

    #[test]
    fn future_sign_ins_and_active_invites_are_not_counted() {
        let ctx = ReportContext::at(day(2024, 1, 3));
        let invites = vec![
            invite("2024-01-03", InviteState::SignedOut),
            invite("2024-01-05", InviteState::SignedIn),
            invite("2024-01-05", InviteState::Active),
        ];

        let buckets = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(sum(&buckets.sent), 1);
        assert_eq!(sum(&buckets.visitors), 1);
        assert_eq!(buckets.visitors.get("2024-01-05"), Some(0));
    }

    #[test]
    fn unactivated_reservation_counts_as_reserved() {
        let ctx = ReportContext::at(day(2024, 1, 10));
        let buckets = classify_reservations(
            &ctx,
            &january_week(),
            &[reservation("2024-01-03", false)],
        );
        assert_eq!(buckets.reservations.get("2024-01-03"), Some(1));
        assert_eq!(buckets.used.get("2024-01-03"), Some(0));
    }

    #[test]
    fn activated_reservation_counts_as_used_only_once_due() {
        let ctx = ReportContext::at(day(2024, 1, 4));
        let reservations = vec![
            reservation("2024-01-04", true),
            reservation("2024-01-06", true),
        ];
        let buckets = classify_reservations(&ctx, &january_week(), &reservations);
        assert_eq!(buckets.used.get("2024-01-04"), Some(1));
        assert_eq!(sum(&buckets.used), 1);
        assert_eq!(sum(&buckets.reservations), 0);
    }

    #[test]
    fn events_outside_window_do_not_change_sums() {
        let ctx = ReportContext::at(day(2024, 3, 1));
        let invites = vec![
            invite("2024-02-01", InviteState::Inactive),
            invite("2024-02-01", InviteState::SignedIn),
            invite("2024-02-01", InviteState::Cancelled),
        ];
        let buckets = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(sum(&buckets.sent), 0);
        assert_eq!(sum(&buckets.visitors), 0);
        assert_eq!(sum(&buckets.cancellations), 0);
        assert_eq!(buckets.sent.len(), 7);
        assert_eq!(buckets.sent.get("2024-02-01"), None);
    }

    #[test]
    fn malformed_dates_are_skipped() {
        let ctx = ReportContext::at(day(2024, 1, 10));
        let invites = vec![
            invite("", InviteState::Inactive),
            invite("01/02/2024", InviteState::Inactive),
            invite("2024-01-02", InviteState::Inactive),
        ];
        let buckets = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(buckets.skipped, 2);
        assert_eq!(sum(&buckets.sent), 1);
    }

    #[test]
    fn unknown_states_are_skipped() {
        let ctx = ReportContext::at(day(2024, 1, 10));
        let invites = vec![
            invite("2024-01-02", InviteState::Other("extended".to_string())),
            invite("2024-01-02", InviteState::Inactive),
        ];
        let buckets = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(buckets.skipped, 1);
        assert_eq!(sum(&buckets.sent), 1);
        assert_eq!(sum(&buckets.cancellations), 0);
    }

    #[test]
    fn classification_is_repeatable_and_order_independent() {
        let ctx = ReportContext::at(day(2024, 1, 10));
        let mut invites = vec![
            invite("2024-01-01", InviteState::Inactive),
            invite("2024-01-04", InviteState::SignedOut),
            invite("2024-01-04", InviteState::Cancelled),
            invite("2024-01-07", InviteState::SignedIn),
        ];

        let first = classify_invites(&ctx, &january_week(), &invites);
        let second = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(first, second);

        invites.reverse();
        let reversed = classify_invites(&ctx, &january_week(), &invites);
        assert_eq!(first, reversed);
    }

    #[test]
    fn predictions_fill_separate_series() {
        let predictions = vec![
            PredictedInviteData {
                date: "2024-01-02".to_string(),
                visitors: 4,
                seat: 2,
            },
            PredictedInviteData {
                date: "2024-03-01".to_string(),
                visitors: 9,
                seat: 9,
            },
        ];
        let buckets = overlay_predictions(&january_week(), &predictions);
        assert_eq!(buckets.visitors.get("2024-01-02"), Some(4));
        assert_eq!(buckets.seats.get("2024-01-02"), Some(2));
        assert_eq!(sum(&buckets.visitors), 4);
        assert_eq!(buckets.seats.len(), 7);
    }
}
