use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

use crate::models::interview::{InterviewRecord, InterviewStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InterviewStatus),
}

impl StatusFilter {
    pub fn matches(self, record: &InterviewRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status == Some(status),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// Parses "All" or any status label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        raw.parse().ok().map(StatusFilter::Only)
    }
}

/// Quick filters shown above the table, in display order.
pub const QUICK_FILTERS: [StatusFilter; 5] = [
    StatusFilter::All,
    StatusFilter::Only(InterviewStatus::Scheduled),
    StatusFilter::Only(InterviewStatus::Completed),
    StatusFilter::Only(InterviewStatus::Rejected),
    StatusFilter::Only(InterviewStatus::Offered),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CandidateName,
    #[default]
    Date,
}

impl SortKey {
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::CandidateName => SortOrder::Asc,
            SortKey::Date => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Active,
    Deleted,
}

impl ViewMode {
    pub fn contains(self, record: &InterviewRecord) -> bool {
        match self {
            ViewMode::Active => !record.deleted,
            ViewMode::Deleted => record.deleted,
        }
    }
}

/// Everything the table view depends on besides the records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParams {
    pub status_filter: StatusFilter,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub view_mode: ViewMode,
}

impl ViewParams {
    /// Column-header click: the active column flips direction, another column
    /// becomes active with its own default direction.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key;
            self.sort_order = key.default_order();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuickFilterCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Analytics {
    pub total: usize,
    pub completed: usize,
    pub recent: usize,
    pub status_counts: Vec<QuickFilterCount>,
}

/// Partition, sort, then filter. Sorting is stable so equal keys keep the
/// order the records were loaded in.
pub fn derive_view<'a>(records: &'a [InterviewRecord], params: &ViewParams) -> Vec<&'a InterviewRecord> {
    let mut view: Vec<&InterviewRecord> = records
        .iter()
        .filter(|record| params.view_mode.contains(record))
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare_by(params.sort_key, a, b);
        match params.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let needle = params.search_term.to_lowercase();
    view.retain(|record| params.status_filter.matches(record) && matches_search(record, &needle));
    view
}

/// Counts over the partition selected by `view_mode`, independent of the
/// status filter and search box.
pub fn analytics(records: &[InterviewRecord], view_mode: ViewMode, today: NaiveDate) -> Analytics {
    let partition: Vec<&InterviewRecord> = records
        .iter()
        .filter(|record| view_mode.contains(record))
        .collect();

    let week_ago = today - Duration::days(7);
    let count_where = |filter: StatusFilter| partition.iter().filter(|r| filter.matches(r)).count();

    Analytics {
        total: partition.len(),
        completed: count_where(StatusFilter::Only(InterviewStatus::Completed)),
        recent: partition
            .iter()
            .filter(|r| r.interview_date.is_some_and(|date| date >= week_ago))
            .count(),
        status_counts: QUICK_FILTERS
            .iter()
            .map(|filter| QuickFilterCount {
                status: filter.label().to_string(),
                count: count_where(*filter),
            })
            .collect(),
    }
}

fn compare_by(key: SortKey, a: &InterviewRecord, b: &InterviewRecord) -> Ordering {
    match key {
        SortKey::Date => a.interview_date.cmp(&b.interview_date),
        SortKey::CandidateName => a
            .name_text()
            .to_lowercase()
            .cmp(&b.name_text().to_lowercase()),
    }
}

fn matches_search(record: &InterviewRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.name_text().to_lowercase().contains(needle)
        || record.position_text().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rec(name: &str, position: &str, date: (i32, u32, u32), status: InterviewStatus, deleted: bool) -> InterviewRecord {
        InterviewRecord {
            id: Uuid::new_v4(),
            candidate_name: Some(name.to_string()),
            position_applied: Some(position.to_string()),
            interview_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            status: Some(status),
            notes: None,
            created_at: None,
            updated_at: None,
            deleted,
            deleted_at: None,
            restored_at: None,
        }
    }

    fn fixture() -> Vec<InterviewRecord> {
        vec![
            rec("carol", "Software Engineer", (2026, 10, 15), InterviewStatus::Completed, false),
            rec("Alice", "Sales Manager", (2026, 10, 1), InterviewStatus::Scheduled, false),
            rec("bob", "Intern", (2026, 10, 12), InterviewStatus::Completed, false),
            rec("Dave", "Video Editor", (2026, 9, 20), InterviewStatus::Rejected, true),
            rec("erin", "Software Engineer Intern", (2026, 10, 17), InterviewStatus::Offered, false),
        ]
    }

    fn names(view: &[&InterviewRecord]) -> Vec<String> {
        view.iter().map(|r| r.name_text().to_string()).collect()
    }

    #[test]
    fn every_record_lands_in_exactly_one_partition() {
        let records = fixture();
        let active = derive_view(&records, &ViewParams::default());
        let deleted = derive_view(
            &records,
            &ViewParams { view_mode: ViewMode::Deleted, ..Default::default() },
        );
        assert_eq!(active.len() + deleted.len(), records.len());
        for record in &records {
            let in_active = active.iter().any(|r| r.id == record.id);
            let in_deleted = deleted.iter().any(|r| r.id == record.id);
            assert!(in_active != in_deleted);
            assert_eq!(in_deleted, record.deleted);
        }
    }

    #[test]
    fn default_view_is_newest_interview_first() {
        let records = fixture();
        let view = derive_view(&records, &ViewParams::default());
        assert_eq!(names(&view), ["erin", "carol", "bob", "Alice"]);
    }

    #[test]
    fn name_sort_ignores_case_and_reverses_on_toggle() {
        let records = fixture();
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::CandidateName);
        assert_eq!(params.sort_order, SortOrder::Asc);

        let ascending = names(&derive_view(&records, &params));
        assert_eq!(ascending, ["Alice", "bob", "carol", "erin"]);

        params.toggle_sort(SortKey::CandidateName);
        let mut descending = names(&derive_view(&records, &params));
        descending.reverse();
        assert_eq!(descending, ascending);
    }

    #[test]
    fn switching_back_to_date_uses_descending() {
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::CandidateName);
        params.toggle_sort(SortKey::Date);
        assert_eq!(params.sort_key, SortKey::Date);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn ties_keep_load_order() {
        let records = vec![
            rec("Sam", "Intern", (2026, 10, 1), InterviewStatus::Scheduled, false),
            rec("sam", "Manager", (2026, 10, 1), InterviewStatus::Scheduled, false),
        ];
        let mut params = ViewParams::default();
        params.toggle_sort(SortKey::CandidateName);
        let asc = derive_view(&records, &params);
        assert_eq!(asc[0].position_text(), "Intern");
        params.toggle_sort(SortKey::CandidateName);
        let desc = derive_view(&records, &params);
        assert_eq!(desc[0].position_text(), "Intern");
    }

    #[test]
    fn status_filter_returns_exact_subset() {
        let records = fixture();
        let params = ViewParams {
            status_filter: StatusFilter::Only(InterviewStatus::Completed),
            ..Default::default()
        };
        let view = derive_view(&records, &params);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.status == Some(InterviewStatus::Completed)));
    }

    #[test]
    fn search_matches_name_or_position() {
        let records = fixture();
        let params = ViewParams { search_term: "ENGINEER".into(), ..Default::default() };
        assert_eq!(names(&derive_view(&records, &params)), ["erin", "carol"]);

        let params = ViewParams { search_term: "ali".into(), ..Default::default() };
        assert_eq!(names(&derive_view(&records, &params)), ["Alice"]);
    }

    #[test]
    fn missing_text_never_breaks_search_or_sort() {
        let mut records = fixture();
        records.push(InterviewRecord {
            candidate_name: None,
            position_applied: None,
            interview_date: None,
            ..records[0].clone()
        });
        let mut params = ViewParams { search_term: "o".into(), ..Default::default() };
        params.toggle_sort(SortKey::CandidateName);
        let view = derive_view(&records, &params);
        assert!(view.iter().all(|r| r.candidate_name.is_some()));

        let all = derive_view(&records, &ViewParams::default());
        assert_eq!(all.last().map(|r| r.interview_date), Some(None));
    }

    #[test]
    fn analytics_follow_partition_not_search() {
        let records = fixture();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let stats = analytics(&records, ViewMode::Active, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        // 2026-10-11 onwards: carol, bob, erin
        assert_eq!(stats.recent, 3);

        let counts: Vec<(String, usize)> = stats
            .status_counts
            .iter()
            .map(|c| (c.status.clone(), c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("All".to_string(), 4),
                ("Scheduled".to_string(), 1),
                ("Completed".to_string(), 2),
                ("Rejected".to_string(), 0),
                ("Offered".to_string(), 1),
            ]
        );

        let deleted = analytics(&records, ViewMode::Deleted, today);
        assert_eq!(deleted.total, 1);
        assert_eq!(deleted.status_counts[3].count, 1);
    }

    #[test]
    fn recent_includes_exactly_seven_days_ago() {
        let records = vec![rec("Zoe", "Intern", (2026, 10, 11), InterviewStatus::Scheduled, false)];
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(analytics(&records, ViewMode::Active, today).recent, 1);
        let later = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(analytics(&records, ViewMode::Active, later).recent, 0);
    }

    #[test]
    fn status_filter_parses_all_and_labels() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse("final round"),
            Some(StatusFilter::Only(InterviewStatus::FinalRound))
        );
        assert_eq!(StatusFilter::parse("nope"), None);
    }
}
