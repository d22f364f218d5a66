use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Suffix appended to the candidate name of a duplicated interview.
pub const COPY_MARKER: &str = " (Copy)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum InterviewStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Shortlisted,
    #[serde(rename = "Final Round")]
    FinalRound,
    Completed,
    Offered,
    Hired,
    Rejected,
    #[serde(rename = "No Show")]
    NoShow,
    #[serde(rename = "On Hold")]
    OnHold,
    Withdrawn,
}

impl InterviewStatus {
    pub const ALL: [InterviewStatus; 11] = [
        InterviewStatus::Scheduled,
        InterviewStatus::InProgress,
        InterviewStatus::Shortlisted,
        InterviewStatus::FinalRound,
        InterviewStatus::Completed,
        InterviewStatus::Offered,
        InterviewStatus::Hired,
        InterviewStatus::Rejected,
        InterviewStatus::NoShow,
        InterviewStatus::OnHold,
        InterviewStatus::Withdrawn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "Scheduled",
            InterviewStatus::InProgress => "In Progress",
            InterviewStatus::Shortlisted => "Shortlisted",
            InterviewStatus::FinalRound => "Final Round",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Offered => "Offered",
            InterviewStatus::Hired => "Hired",
            InterviewStatus::Rejected => "Rejected",
            InterviewStatus::NoShow => "No Show",
            InterviewStatus::OnHold => "On Hold",
            InterviewStatus::Withdrawn => "Withdrawn",
        }
    }

    /// Statuses that end the interview process and therefore have a closure time.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            InterviewStatus::Completed
                | InterviewStatus::Rejected
                | InterviewStatus::Hired
                | InterviewStatus::NoShow
                | InterviewStatus::Withdrawn
        )
    }

    /// Badge color (0xRRGGBB) shown next to the status.
    pub fn badge_color(self) -> u32 {
        match self {
            InterviewStatus::Scheduled => 0x1E40AF,   // Blue 800
            InterviewStatus::InProgress => 0x854D0E,  // Yellow 800
            InterviewStatus::Shortlisted => 0x6B21A8, // Purple 800
            InterviewStatus::FinalRound => 0x9A3412,  // Orange 800
            InterviewStatus::Completed => 0x166534,   // Green 800
            InterviewStatus::Offered => 0x115E59,     // Teal 800
            InterviewStatus::Hired => 0x065F46,       // Emerald 800
            InterviewStatus::Rejected => 0x991B1B,    // Red 800
            InterviewStatus::NoShow => 0x1F2937,      // Gray 800
            InterviewStatus::OnHold => 0x92400E,      // Amber 800
            InterviewStatus::Withdrawn => 0x1E293B,   // Slate 800
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interview status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for InterviewStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InterviewStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One tracked interview. Every field except `id` and `deleted` may be
/// missing in storage, so text and timestamps stay optional here and the
/// `*_text` accessors give the empty-string view used for search and sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InterviewRecord {
    pub id: Uuid,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub position_applied: Option<String>,
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<InterviewStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub restored_at: Option<DateTime<Utc>>,
}

impl InterviewRecord {
    pub fn name_text(&self) -> &str {
        self.candidate_name.as_deref().unwrap_or_default()
    }

    pub fn position_text(&self) -> &str {
        self.position_applied.as_deref().unwrap_or_default()
    }

    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Builds the record a duplicate is created from: business fields are
    /// copied, lifecycle stamps start fresh.
    pub fn duplicate_at(&self, now: DateTime<Utc>) -> NewInterview {
        NewInterview {
            candidate_name: format!("{}{}", self.name_text(), COPY_MARKER),
            position_applied: self.position_applied.clone(),
            interview_date: self.interview_date,
            status: self.status,
            notes: self.notes.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// A record that has not been stored yet. Storage assigns the id and fills in
/// timestamps the caller left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterview {
    pub candidate_name: String,
    pub position_applied: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewInterview {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> InterviewRecord {
        InterviewRecord {
            id,
            candidate_name: Some(self.candidate_name),
            position_applied: self.position_applied,
            interview_date: self.interview_date,
            status: self.status,
            notes: self.notes,
            created_at: Some(self.created_at.unwrap_or(now)),
            updated_at: Some(self.updated_at.unwrap_or(now)),
            deleted: false,
            deleted_at: None,
            restored_at: None,
        }
    }
}

/// Fields merged into an existing record by `update_by_id`. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewPatch {
    pub candidate_name: Option<String>,
    pub position_applied: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted: Option<bool>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub restored_at: Option<DateTime<Utc>>,
}

impl InterviewPatch {
    pub fn apply_to(&self, record: &mut InterviewRecord) {
        if let Some(name) = &self.candidate_name {
            record.candidate_name = Some(name.clone());
        }
        if let Some(position) = &self.position_applied {
            record.position_applied = Some(position.clone());
        }
        if let Some(date) = self.interview_date {
            record.interview_date = Some(date);
        }
        if let Some(status) = self.status {
            record.status = Some(status);
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
        if let Some(updated_at) = self.updated_at {
            record.updated_at = Some(updated_at);
        }
        if let Some(deleted) = self.deleted {
            record.deleted = deleted;
        }
        if let Some(deleted_at) = self.deleted_at {
            record.deleted_at = Some(deleted_at);
        }
        if let Some(restored_at) = self.restored_at {
            record.restored_at = Some(restored_at);
        }
    }
}

/// Row shape of the `interviews` table.
#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub candidate_name: Option<String>,
    pub position_applied: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub restored_at: Option<DateTime<Utc>>,
}

impl From<InterviewRow> for InterviewRecord {
    fn from(row: InterviewRow) -> Self {
        let status = row.status.as_deref().and_then(|raw| match raw.parse::<InterviewStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!(interview_id = %row.id, error = %err, "Ignoring stored status");
                None
            }
        });

        Self {
            id: row.id,
            candidate_name: row.candidate_name,
            position_applied: row.position_applied,
            interview_date: row.interview_date,
            status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted: row.deleted,
            deleted_at: row.deleted_at,
            restored_at: row.restored_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_parsing_ignores_case_and_whitespace() {
        assert_eq!("no show".parse::<InterviewStatus>(), Ok(InterviewStatus::NoShow));
        assert_eq!(" FINAL ROUND ".parse::<InterviewStatus>(), Ok(InterviewStatus::FinalRound));
        assert!("Ghosted".parse::<InterviewStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let json = serde_json::to_string(&InterviewStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: InterviewStatus = serde_json::from_str("\"On Hold\"").unwrap();
        assert_eq!(back, InterviewStatus::OnHold);
    }

    #[test]
    fn partial_record_loads_with_defaults() {
        let id = Uuid::new_v4();
        let record: InterviewRecord =
            serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        assert_eq!(record.name_text(), "");
        assert_eq!(record.position_text(), "");
        assert_eq!(record.notes_text(), "");
        assert!(!record.deleted);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn unknown_stored_status_becomes_none() {
        let row = InterviewRow {
            id: Uuid::new_v4(),
            candidate_name: Some("Ana".into()),
            position_applied: None,
            interview_date: None,
            status: Some("ghosted".into()),
            notes: None,
            created_at: None,
            updated_at: None,
            deleted: false,
            deleted_at: None,
            restored_at: None,
        };
        let record = InterviewRecord::from(row);
        assert_eq!(record.status, None);
    }

    #[test]
    fn duplicate_copies_business_fields_only() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let original = InterviewRecord {
            id: Uuid::new_v4(),
            candidate_name: Some("Ana Silva".into()),
            position_applied: Some("Sales Manager".into()),
            interview_date: NaiveDate::from_ymd_opt(2026, 1, 10),
            status: Some(InterviewStatus::Offered),
            notes: Some("strong closer".into()),
            created_at: Some(created),
            updated_at: Some(created),
            deleted: true,
            deleted_at: Some(created),
            restored_at: None,
        };

        let copy = original.duplicate_at(now);
        assert_eq!(copy.candidate_name, "Ana Silva (Copy)");
        assert_eq!(copy.position_applied, original.position_applied);
        assert_eq!(copy.interview_date, original.interview_date);
        assert_eq!(copy.status, original.status);
        assert_eq!(copy.notes, original.notes);
        assert_eq!(copy.created_at, Some(now));
        assert_eq!(copy.updated_at, Some(now));

        let stored = copy.into_record(Uuid::new_v4(), now);
        assert!(!stored.deleted);
        assert_ne!(stored.id, original.id);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut record = NewInterview {
            candidate_name: "Bo".into(),
            position_applied: Some("Intern".into()),
            interview_date: None,
            status: Some(InterviewStatus::Scheduled),
            notes: Some("first call".into()),
            created_at: None,
            updated_at: None,
        }
        .into_record(Uuid::new_v4(), Utc::now());

        InterviewPatch {
            status: Some(InterviewStatus::Hired),
            ..Default::default()
        }
        .apply_to(&mut record);

        assert_eq!(record.status, Some(InterviewStatus::Hired));
        assert_eq!(record.notes_text(), "first call");
        assert_eq!(record.position_text(), "Intern");
    }
}
