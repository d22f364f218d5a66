use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::models::interview::InterviewRecord;

/// Time it took to close an interview, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureTime {
    NotApplicable,
    Days(i64),
}

impl fmt::Display for ClosureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosureTime::NotApplicable => f.write_str("N/A"),
            ClosureTime::Days(1) => f.write_str("1 day"),
            ClosureTime::Days(days) => write!(f, "{} days", days),
        }
    }
}

/// Elapsed days from creation to the terminal-status update. Records that are
/// still open, or that never got a creation stamp, have no closure time.
pub fn closure_time(record: &InterviewRecord, now: DateTime<Utc>) -> ClosureTime {
    let terminal = record.status.is_some_and(|status| status.is_terminal());
    let Some(created_at) = record.created_at.filter(|_| terminal) else {
        return ClosureTime::NotApplicable;
    };

    let end = record.updated_at.unwrap_or(now);
    ClosureTime::Days(ceil_days(end - created_at).max(1))
}

fn ceil_days(elapsed: Duration) -> i64 {
    let day_ms = Duration::days(1).num_milliseconds();
    let ms = elapsed.num_milliseconds();
    ms.div_euclid(day_ms) + i64::from(ms.rem_euclid(day_ms) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::InterviewStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record(
        status: Option<InterviewStatus>,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> InterviewRecord {
        InterviewRecord {
            id: Uuid::new_v4(),
            candidate_name: Some("Dana".into()),
            position_applied: None,
            interview_date: None,
            status,
            notes: None,
            created_at,
            updated_at,
            deleted: false,
            deleted_at: None,
            restored_at: None,
        }
    }

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1 + n, 0, 0, 0).unwrap()
    }

    #[test]
    fn open_statuses_have_no_closure_time() {
        for status in [
            InterviewStatus::Scheduled,
            InterviewStatus::InProgress,
            InterviewStatus::Shortlisted,
            InterviewStatus::FinalRound,
            InterviewStatus::Offered,
            InterviewStatus::OnHold,
        ] {
            let r = record(Some(status), Some(day(0)), Some(day(3)));
            assert_eq!(closure_time(&r, day(9)).to_string(), "N/A", "{status}");
        }
        assert_eq!(closure_time(&record(None, Some(day(0)), None), day(9)), ClosureTime::NotApplicable);
    }

    #[test]
    fn same_instant_counts_as_one_day() {
        let r = record(Some(InterviewStatus::Completed), Some(day(0)), Some(day(0)));
        assert_eq!(closure_time(&r, day(5)).to_string(), "1 day");
    }

    #[test]
    fn whole_days_are_pluralized() {
        let r = record(Some(InterviewStatus::Rejected), Some(day(0)), Some(day(2)));
        assert_eq!(closure_time(&r, day(5)).to_string(), "2 days");
    }

    #[test]
    fn partial_days_round_up() {
        let updated = day(1) + Duration::hours(1);
        let r = record(Some(InterviewStatus::Hired), Some(day(0)), Some(updated));
        assert_eq!(closure_time(&r, day(5)), ClosureTime::Days(2));

        let r = record(Some(InterviewStatus::Withdrawn), Some(day(0)), Some(day(0) + Duration::minutes(5)));
        assert_eq!(closure_time(&r, day(5)).to_string(), "1 day");
    }

    #[test]
    fn missing_update_falls_back_to_now() {
        let r = record(Some(InterviewStatus::NoShow), Some(day(0)), None);
        assert_eq!(closure_time(&r, day(4)).to_string(), "4 days");
    }

    #[test]
    fn missing_creation_is_not_applicable() {
        let r = record(Some(InterviewStatus::Completed), None, Some(day(2)));
        assert_eq!(closure_time(&r, day(4)).to_string(), "N/A");
    }
}
