//! Spaced review scheduling.
//!
//! Reviews are never stored: whether an entry is due is recomputed from the
//! history and the wall clock on every read.

use crate::cycle::DEFAULT_STUDY_CONTENT;
use crate::types::{HistoryEntry, ReviewInterval};
use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Days overdue at which a review is flagged as urgent.
pub const URGENT_AFTER_DAYS: i64 = 7;

/// A past study entry whose review date has passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReview {
    pub history_id: String,
    pub subject: String,
    pub content: String,
    pub studied_at: DateTime<Utc>,
    pub review_due_at: DateTime<Utc>,
    pub days_overdue: i64,
}

impl PendingReview {
    pub fn is_urgent(&self) -> bool {
        self.days_overdue >= URGENT_AFTER_DAYS
    }
}

/// Whether an entry carries something worth reviewing.
pub fn is_review_eligible(entry: &HistoryEntry) -> bool {
    !entry.skipped && !entry.content.is_empty() && entry.content != DEFAULT_STUDY_CONTENT
}

/// Review date for something studied at `studied_at`.
///
/// Adds calendar days in `tz`, so the wall-clock time is kept across DST
/// changes and month ends.
pub fn calculate_review_date<Tz: TimeZone>(
    studied_at: DateTime<Utc>,
    interval: ReviewInterval,
    tz: &Tz,
) -> DateTime<Utc> {
    let days = interval.days();
    studied_at
        .with_timezone(tz)
        .checked_add_days(Days::new(u64::from(days)))
        .map(|due| due.with_timezone(&Utc))
        .unwrap_or_else(|| studied_at + Duration::days(i64::from(days)))
}

/// Whole days elapsed since `due`, never negative.
pub fn calculate_days_overdue<Tz: TimeZone>(due: DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    (now.with_timezone(&Utc) - due).num_days().max(0)
}

pub fn is_review_due<Tz: TimeZone>(entry: &HistoryEntry, interval: ReviewInterval, now: &DateTime<Tz>) -> bool {
    if entry.skipped {
        return false;
    }
    now.with_timezone(&Utc) >= calculate_review_date(entry.timestamp, interval, &now.timezone())
}

/// All pending reviews, most overdue first.
pub fn get_pending_reviews<Tz: TimeZone>(
    history: &[HistoryEntry],
    interval: ReviewInterval,
    now: &DateTime<Tz>,
) -> Vec<PendingReview> {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);

    let mut reviews: Vec<PendingReview> = history
        .iter()
        .filter(|entry| is_review_eligible(entry))
        .filter_map(|entry| {
            let review_due_at = calculate_review_date(entry.timestamp, interval, &tz);
            if now_utc < review_due_at {
                return None;
            }
            Some(PendingReview {
                history_id: entry.id.clone(),
                subject: entry.subject.clone(),
                content: entry.content.clone(),
                studied_at: entry.timestamp,
                review_due_at,
                days_overdue: calculate_days_overdue(review_due_at, now),
            })
        })
        .collect();

    reviews.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    reviews
}

pub fn count_pending_reviews<Tz: TimeZone>(
    history: &[HistoryEntry],
    interval: ReviewInterval,
    now: &DateTime<Tz>,
) -> usize {
    history
        .iter()
        .filter(|entry| is_review_eligible(entry) && is_review_due(entry, interval, now))
        .count()
}

/// Group reviews by subject name, keeping each group's order.
pub fn group_reviews_by_subject(reviews: &[PendingReview]) -> BTreeMap<String, Vec<PendingReview>> {
    let mut groups: BTreeMap<String, Vec<PendingReview>> = BTreeMap::new();
    for review in reviews {
        groups
            .entry(review.subject.clone())
            .or_default()
            .push(review.clone());
    }
    groups
}

pub fn format_days_overdue(days_overdue: i64) -> String {
    match days_overdue {
        0 => "hoje".to_string(),
        1 => "há 1 dia".to_string(),
        n => format!("há {} dias", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectType;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, subject: &str, content: &str, timestamp: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            timestamp,
            subject: subject.to_string(),
            subject_type: SubjectType::Math,
            content: content.to_string(),
            block_id: 1,
            skipped: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 30, 15).unwrap()
    }

    #[test]
    fn due_exactly_at_interval_is_pending_today() {
        let studied = now() - Duration::days(7);
        let history = vec![entry("a", "Matemática", "Logaritmos", studied)];

        let reviews = get_pending_reviews(&history, ReviewInterval::OneWeek, &now());
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].days_overdue, 0);
        assert_eq!(reviews[0].review_due_at, now());
    }

    #[test]
    fn one_day_past_interval_is_one_day_overdue() {
        let history = vec![entry("a", "Matemática", "Logaritmos", now() - Duration::days(8))];
        let reviews = get_pending_reviews(&history, ReviewInterval::OneWeek, &now());
        assert_eq!(reviews[0].days_overdue, 1);
    }

    #[test]
    fn not_yet_due_is_excluded() {
        let studied = now() - Duration::days(7) + Duration::seconds(1);
        let history = vec![entry("a", "Matemática", "Logaritmos", studied)];
        assert!(get_pending_reviews(&history, ReviewInterval::OneWeek, &now()).is_empty());
        assert!(!is_review_due(&history[0], ReviewInterval::OneWeek, &now()));
    }

    #[test]
    fn ineligible_entries_are_filtered() {
        let old = now() - Duration::days(40);
        let mut skipped = entry("s", "Português", "Crase", old);
        skipped.skipped = true;
        let history = vec![
            skipped,
            entry("e", "Português", "", old),
            entry("d", "Português", DEFAULT_STUDY_CONTENT, old),
            entry("k", "Português", "Concordância", old),
        ];

        let reviews = get_pending_reviews(&history, ReviewInterval::OneMonth, &now());
        let ids: Vec<&str> = reviews.iter().map(|r| r.history_id.as_str()).collect();
        assert_eq!(ids, vec!["k"]);
        assert!(!is_review_due(&history[0], ReviewInterval::OneWeek, &now()));
    }

    #[test]
    fn sorted_most_overdue_first() {
        let history = vec![
            entry("recent", "Física", "Cinemática", now() - Duration::days(9)),
            entry("oldest", "Química", "Estequiometria", now() - Duration::days(30)),
            entry("middle", "Física", "Dinâmica", now() - Duration::days(15)),
        ];
        let reviews = get_pending_reviews(&history, ReviewInterval::OneWeek, &now());
        let overdue: Vec<i64> = reviews.iter().map(|r| r.days_overdue).collect();
        assert_eq!(overdue, vec![23, 8, 2]);
        assert!(reviews[0].is_urgent());
        assert!(reviews[1].is_urgent());
        assert!(!reviews[2].is_urgent());
        assert_eq!(count_pending_reviews(&history, ReviewInterval::OneWeek, &now()), 3);
    }

    #[test]
    fn grouping_preserves_order_within_subject() {
        let history = vec![
            entry("f1", "Física", "Cinemática", now() - Duration::days(9)),
            entry("q1", "Química", "Estequiometria", now() - Duration::days(30)),
            entry("f2", "Física", "Dinâmica", now() - Duration::days(15)),
        ];
        let reviews = get_pending_reviews(&history, ReviewInterval::OneWeek, &now());
        let groups = group_reviews_by_subject(&reviews);

        assert_eq!(groups.len(), 2);
        let fisica: Vec<&str> = groups["Física"].iter().map(|r| r.history_id.as_str()).collect();
        assert_eq!(fisica, vec!["f2", "f1"]);
        assert_eq!(groups["Química"].len(), 1);
    }

    #[test]
    fn review_date_rolls_over_month_end() {
        let studied = Utc.with_ymd_and_hms(2024, 1, 25, 18, 0, 0).unwrap();
        let due = calculate_review_date(studied, ReviewInterval::ThreeWeeks, &Utc);
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 2, 15, 18, 0, 0).unwrap());

        let leap = Utc.with_ymd_and_hms(2024, 2, 20, 8, 0, 0).unwrap();
        let due = calculate_review_date(leap, ReviewInterval::OneMonth, &Utc);
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 3, 21, 8, 0, 0).unwrap());
    }

    #[test]
    fn review_date_in_fixed_offset_matches_elapsed_days() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let studied = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let due = calculate_review_date(studied, ReviewInterval::TwoWeeks, &brt);
        assert_eq!(due, studied + Duration::days(14));
    }

    #[test]
    fn overdue_labels() {
        assert_eq!(format_days_overdue(0), "hoje");
        assert_eq!(format_days_overdue(1), "há 1 dia");
        assert_eq!(format_days_overdue(12), "há 12 dias");
    }
}
