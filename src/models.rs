use crate::window::ChartSeries;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Lifecycle state of an invite as stored by the invite service.
///
/// Stored states this service does not know are kept verbatim in `Other`
/// so they survive a rewrite of the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InviteState {
    Active,
    Inactive,
    SignedIn,
    SignedOut,
    Cancelled,
    Other(String),
}

impl InviteState {
    pub fn as_str(&self) -> &str {
        match self {
            InviteState::Active => "active",
            InviteState::Inactive => "inActive",
            InviteState::SignedIn => "signedIn",
            InviteState::SignedOut => "signedOut",
            InviteState::Cancelled => "cancelled",
            InviteState::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InviteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown invite state '{0}'")]
pub struct UnknownInviteState(pub String);

impl FromStr for InviteState {
    type Err = UnknownInviteState;

    // The invite service and the visitor pages disagree on casing
    // ("inActive", "SIGNED_IN", ...), so compare on letters only.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "active" => Ok(InviteState::Active),
            "inactive" => Ok(InviteState::Inactive),
            "signedin" => Ok(InviteState::SignedIn),
            "signedout" => Ok(InviteState::SignedOut),
            "cancelled" | "canceled" => Ok(InviteState::Cancelled),
            _ => Err(UnknownInviteState(value.to_string())),
        }
    }
}

impl From<String> for InviteState {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(state) => state,
            Err(_) => InviteState::Other(value),
        }
    }
}

impl From<InviteState> for String {
    fn from(state: InviteState) -> Self {
        state.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    #[serde(default, deserialize_with = "lenient_string")]
    pub invite_date: String,
    pub invite_state: InviteState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub reservation_date: String,
    #[serde(default)]
    pub activated: bool,
}

/// Forecast for one day, as produced by the prediction job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedInviteData {
    pub date: String,
    #[serde(default)]
    pub visitors: u64,
    #[serde(default)]
    pub seat: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisitorData {
    #[serde(default, deserialize_with = "lenient_records")]
    pub invites: Vec<Invite>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub reservations: Vec<Reservation>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub predictions: Vec<PredictedInviteData>,
}

// Dates that are null or not strings are kept as text so the classifier
// can skip them per record.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping unreadable record: {err}");
                None
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
pub struct NewInvite {
    pub invite_date: String,
    pub invite_state: String,
}

#[derive(Debug, Deserialize)]
pub struct NewReservation {
    pub reservation_date: String,
    #[serde(default)]
    pub activated: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: Option<String>,
    pub range: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InviteSummary {
    pub invites_sent: u64,
    pub visitors: u64,
    pub cancellations: u64,
    pub avg_invites_per_day: Option<f64>,
    pub avg_visitors_per_day: Option<f64>,
    pub cancellation_rate: Option<f64>,
    pub visitor_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct InviteReport {
    pub start_date: String,
    pub end_date: String,
    pub range: i64,
    pub invites: ChartSeries,
    pub visitors: ChartSeries,
    pub cancellations: ChartSeries,
    pub predicted_visitors: ChartSeries,
    pub summary: InviteSummary,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct SeatSummary {
    pub reserved: u64,
    pub used: u64,
    pub avg_reserved_per_day: Option<f64>,
    pub avg_used_per_day: Option<f64>,
    pub usage_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SeatReport {
    pub start_date: String,
    pub end_date: String,
    pub range: i64,
    pub reservations: ChartSeries,
    pub used: ChartSeries,
    pub predicted_seats: ChartSeries,
    pub summary: SeatSummary,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub date: String,
    pub invites: ChartSeries,
    pub reservations: ChartSeries,
    pub invites_today: u64,
    pub cancellations: u64,
    pub avg_invites_per_day: Option<f64>,
    pub avg_reservations_per_day: Option<f64>,
    pub total_seats: u64,
    pub seats_available_today: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_state_accepts_casing_variants() {
        assert_eq!("inActive".parse::<InviteState>(), Ok(InviteState::Inactive));
        assert_eq!("inactive".parse::<InviteState>(), Ok(InviteState::Inactive));
        assert_eq!("SIGNED_IN".parse::<InviteState>(), Ok(InviteState::SignedIn));
        assert_eq!("signedOut".parse::<InviteState>(), Ok(InviteState::SignedOut));
        assert_eq!("Cancelled".parse::<InviteState>(), Ok(InviteState::Cancelled));
        assert!("pending".parse::<InviteState>().is_err());
    }

    #[test]
    fn visitor_data_reads_partial_file() {
        let data: VisitorData = serde_json::from_str(
            r#"{"invites":[{"invite_date":"2024-01-02","invite_state":"SIGNED_OUT"}]}"#,
        )
        .expect("parse");
        assert_eq!(data.invites.len(), 1);
        assert_eq!(data.invites[0].invite_state, InviteState::SignedOut);
        assert!(data.reservations.is_empty());

        let json = serde_json::to_string(&data.invites[0]).expect("serialize");
        assert!(json.contains("\"signedOut\""));
    }

    #[test]
    fn bad_records_do_not_sink_the_file() {
        let data: VisitorData = serde_json::from_str(
            r#"{
                "invites": [
                    {"invite_date": "2024-01-02", "invite_state": "inActive"},
                    {"invite_date": null, "invite_state": "inActive"},
                    {"invite_date": 20240102, "invite_state": "signedIn"},
                    {"invite_date": "2024-01-03", "invite_state": "extended"},
                    42
                ],
                "reservations": [{"reservation_date": "2024-01-03", "activated": false}],
                "predictions": null
            }"#,
        )
        .expect("parse");

        assert_eq!(data.invites.len(), 4);
        assert_eq!(data.invites[1].invite_date, "");
        assert_eq!(data.invites[2].invite_date, "20240102");
        assert_eq!(
            data.invites[3].invite_state,
            InviteState::Other("extended".to_string())
        );
        assert_eq!(data.reservations.len(), 1);
        assert!(data.predictions.is_empty());

        let json = serde_json::to_string(&data.invites[3]).expect("serialize");
        assert!(json.contains("\"extended\""));
    }
}
