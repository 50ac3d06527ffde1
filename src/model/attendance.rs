use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, AsRefStr, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
    Late,
}

/// One contiguous worked interval. `duration` is in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[schema(example = 3.5)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[schema(example = "09:00")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[schema(example = "12:30")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 12,
        "userId": 7,
        "date": "2026-03-02",
        "status": "present",
        "sessions": [{ "duration": 4.0 }, { "duration": 3.5 }],
        "totalHours": 7.5,
        "remarks": "Client visit in the afternoon"
    })
)]
pub struct AttendanceRecord {
    /// Absent on records that were synthesized rather than read from storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub user_id: u64,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub sessions: Vec<Session>,
    pub total_hours: f64,
    pub remarks: String,
}

impl AttendanceRecord {
    /// Fresh record bound to `(user_id, date)`, not yet stored.
    pub fn new(user_id: u64, date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            date,
            status: AttendanceStatus::Absent,
            sessions: Vec::new(),
            total_hours: 0.0,
            remarks: String::new(),
        }
    }

    /// Placeholder shown for a rostered user without a stored record.
    pub fn absent(user_id: u64, date: NaiveDate) -> Self {
        Self::new(user_id, date)
    }

    /// Replaces the mutable fields wholesale and recomputes the total.
    pub fn apply(&mut self, status: AttendanceStatus, remarks: String, sessions: Vec<Session>) {
        self.status = status;
        self.remarks = remarks;
        self.total_hours = total_hours(&sessions);
        self.sessions = sessions;
    }
}

/// Sum of session durations. Missing durations count as zero.
pub fn total_hours(sessions: &[Session]) -> f64 {
    // fold from +0.0; `Sum for f64` starts at -0.0
    sessions
        .iter()
        .filter_map(|s| s.duration)
        .fold(0.0, |acc, d| acc + d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(duration: Option<f64>) -> Session {
        Session {
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn total_hours_skips_missing_durations() {
        let sessions = vec![session(Some(2.0)), session(Some(3.5)), session(None)];
        assert_eq!(total_hours(&sessions), 5.5);
        assert_eq!(total_hours(&[]), 0.0);
    }

    #[test]
    fn apply_replaces_sessions() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut record = AttendanceRecord::new(1, date);
        record.apply(
            AttendanceStatus::Present,
            "on site".into(),
            vec![session(Some(4.0)), session(Some(4.0))],
        );
        record.apply(AttendanceStatus::Late, "traffic".into(), vec![session(Some(1.0))]);

        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.sessions.len(), 1);
        assert_eq!(record.total_hours, 1.0);
    }

    #[test]
    fn clearing_sessions_serializes_positive_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut record = AttendanceRecord::new(1, date);
        record.apply(AttendanceStatus::Absent, "sick day".into(), vec![]);

        assert!(record.total_hours.is_sign_positive());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""totalHours":0.0"#), "{json}");
    }

    #[test]
    fn synthesized_absent_has_no_id() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let json = serde_json::to_value(AttendanceRecord::absent(9, date)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": 9,
                "date": "2026-03-02",
                "status": "absent",
                "sessions": [],
                "totalHours": 0.0,
                "remarks": ""
            })
        );
    }

    #[test]
    fn status_parses_kebab_case() {
        assert_eq!("half-day".parse::<AttendanceStatus>().ok(), Some(AttendanceStatus::HalfDay));
        assert!("sick".parse::<AttendanceStatus>().is_err());
    }
}
