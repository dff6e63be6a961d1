//! Subject priority scoring.
//!
//! priority = weight × difficulty × content amount, each input clamped to
//! [`MIN_FACTOR`, `MAX_FACTOR`]. Out-of-range input is clamped, never rejected.
//! Collections returned from this module are sorted by descending priority.

use crate::round2;
use crate::types::{Subject, SubjectInput, SubjectUpdate};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const MIN_FACTOR: f64 = 0.5;
pub const MAX_FACTOR: f64 = 3.0;

/// Name given to subjects created with a blank name.
pub const DEFAULT_SUBJECT_NAME: &str = "Nova Matéria";

/// Display band for a priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl PriorityBand {
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

/// Aggregate figures over a subject list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStats {
    pub total_subjects: usize,
    pub average_priority: f64,
    pub highest_priority: Option<Subject>,
    pub lowest_priority: Option<Subject>,
}

pub fn calculate_priority(weight: f64, difficulty: f64, content_amount: f64) -> f64 {
    round2(weight * difficulty * content_amount)
}

pub fn is_valid_factor(value: f64) -> bool {
    (MIN_FACTOR..=MAX_FACTOR).contains(&value)
}

/// Clamp a factor into range. Non-finite input maps to the lower bound.
pub fn clamp_factor(value: f64) -> f64 {
    if is_valid_factor(value) {
        value
    } else if value.is_finite() && value > MAX_FACTOR {
        MAX_FACTOR
    } else {
        MIN_FACTOR
    }
}

pub fn classify_priority(priority: f64) -> PriorityBand {
    if priority >= 13.5 {
        PriorityBand::VeryHigh
    } else if priority >= 8.0 {
        PriorityBand::High
    } else if priority >= 4.0 {
        PriorityBand::Medium
    } else if priority >= 1.0 {
        PriorityBand::Low
    } else {
        PriorityBand::VeryLow
    }
}

pub fn create_subject(input: &SubjectInput, now: DateTime<Utc>) -> Subject {
    let weight = clamp_factor(input.weight);
    let difficulty = clamp_factor(input.difficulty);
    let content_amount = clamp_factor(input.content_amount);
    let name = input.name.trim();

    Subject {
        id: format!("subject-{}", Uuid::new_v4()),
        name: if name.is_empty() { DEFAULT_SUBJECT_NAME.to_string() } else { name.to_string() },
        weight,
        difficulty,
        content_amount,
        priority: calculate_priority(weight, difficulty, content_amount),
        created_at: now,
    }
}

/// Apply a partial update and recompute the priority. A blank name keeps the old one.
pub fn update_subject(subject: &Subject, updates: &SubjectUpdate) -> Subject {
    let weight = updates.weight.map(clamp_factor).unwrap_or(subject.weight);
    let difficulty = updates.difficulty.map(clamp_factor).unwrap_or(subject.difficulty);
    let content_amount = updates.content_amount.map(clamp_factor).unwrap_or(subject.content_amount);
    let name = match updates.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => subject.name.clone(),
    };

    Subject {
        name,
        weight,
        difficulty,
        content_amount,
        priority: calculate_priority(weight, difficulty, content_amount),
        ..subject.clone()
    }
}

/// Stable sort, highest priority first.
pub fn sort_by_priority(subjects: &mut [Subject]) {
    subjects.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}

pub fn add_subject(subjects: &[Subject], input: &SubjectInput, now: DateTime<Utc>) -> Vec<Subject> {
    let mut next = subjects.to_vec();
    next.push(create_subject(input, now));
    sort_by_priority(&mut next);
    next
}

/// Update the subject with `id`. Unknown ids leave the list unchanged.
pub fn edit_subject(subjects: &[Subject], id: &str, updates: &SubjectUpdate) -> Vec<Subject> {
    let mut next: Vec<Subject> = subjects
        .iter()
        .map(|s| if s.id == id { update_subject(s, updates) } else { s.clone() })
        .collect();
    sort_by_priority(&mut next);
    next
}

pub fn remove_subject(subjects: &[Subject], id: &str) -> Vec<Subject> {
    subjects.iter().filter(|s| s.id != id).cloned().collect()
}

pub fn priority_stats(subjects: &[Subject]) -> PriorityStats {
    if subjects.is_empty() {
        return PriorityStats {
            total_subjects: 0,
            average_priority: 0.0,
            highest_priority: None,
            lowest_priority: None,
        };
    }

    let mut sorted = subjects.to_vec();
    sort_by_priority(&mut sorted);
    let total: f64 = subjects.iter().map(|s| s.priority).sum();

    PriorityStats {
        total_subjects: subjects.len(),
        average_priority: round2(total / subjects.len() as f64),
        highest_priority: sorted.first().cloned(),
        lowest_priority: sorted.last().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn input(name: &str, weight: f64, difficulty: f64, content_amount: f64) -> SubjectInput {
        SubjectInput {
            name: name.to_string(),
            weight,
            difficulty,
            content_amount,
        }
    }

    fn is_sorted(subjects: &[Subject]) -> bool {
        subjects.windows(2).all(|w| w[0].priority >= w[1].priority)
    }

    #[test]
    fn priority_rounds_to_two_decimals() {
        assert_eq!(calculate_priority(1.5, 1.5, 1.5), 3.38);
        assert_eq!(calculate_priority(3.0, 3.0, 3.0), 27.0);
        assert_eq!(calculate_priority(0.5, 0.5, 0.5), 0.13);
    }

    #[test]
    fn factors_are_clamped() {
        assert_eq!(clamp_factor(0.1), MIN_FACTOR);
        assert_eq!(clamp_factor(7.0), MAX_FACTOR);
        assert_eq!(clamp_factor(2.5), 2.5);
        assert_eq!(clamp_factor(f64::NAN), MIN_FACTOR);
        assert_eq!(clamp_factor(f64::INFINITY), MIN_FACTOR);
        assert!(is_valid_factor(3.0));
        assert!(!is_valid_factor(3.5));
    }

    #[test]
    fn create_clamps_and_scores() {
        let subject = create_subject(&input("  Física  ", 10.0, 0.0, 2.0), now());
        assert_eq!(subject.name, "Física");
        assert_eq!(subject.weight, 3.0);
        assert_eq!(subject.difficulty, 0.5);
        assert_eq!(subject.priority, 3.0);
        assert!(subject.id.starts_with("subject-"));
        assert_eq!(subject.created_at, now());
    }

    #[test]
    fn blank_name_gets_default() {
        let subject = create_subject(&input("   ", 1.0, 1.0, 1.0), now());
        assert_eq!(subject.name, DEFAULT_SUBJECT_NAME);
    }

    #[test]
    fn update_recomputes_priority() {
        let subject = create_subject(&input("Química", 1.0, 1.0, 1.0), now());
        let updated = update_subject(
            &subject,
            &SubjectUpdate {
                difficulty: Some(2.0),
                name: Some(" ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(updated.name, "Química");
        assert_eq!(updated.difficulty, 2.0);
        assert_eq!(updated.priority, 2.0);
        assert_eq!(updated.id, subject.id);
        assert_eq!(updated.created_at, subject.created_at);
    }

    #[test]
    fn bands() {
        assert_eq!(classify_priority(27.0), PriorityBand::VeryHigh);
        assert_eq!(classify_priority(13.5), PriorityBand::VeryHigh);
        assert_eq!(classify_priority(8.0), PriorityBand::High);
        assert_eq!(classify_priority(4.0), PriorityBand::Medium);
        assert_eq!(classify_priority(3.38), PriorityBand::Low);
        assert_eq!(classify_priority(0.13), PriorityBand::VeryLow);
        assert_eq!(PriorityBand::VeryHigh.label(), "Very High");
    }

    #[test]
    fn list_stays_sorted_through_mutations() {
        let mut subjects = Vec::new();
        subjects = add_subject(&subjects, &input("A", 1.0, 1.0, 1.0), now());
        subjects = add_subject(&subjects, &input("B", 3.0, 3.0, 3.0), now());
        subjects = add_subject(&subjects, &input("C", 2.0, 1.5, 1.0), now());
        assert!(is_sorted(&subjects));
        assert_eq!(subjects[0].name, "B");

        let a_id = subjects.iter().find(|s| s.name == "A").map(|s| s.id.clone()).unwrap();
        subjects = edit_subject(
            &subjects,
            &a_id,
            &SubjectUpdate {
                weight: Some(3.0),
                difficulty: Some(3.0),
                content_amount: Some(3.0),
                ..Default::default()
            },
        );
        assert!(is_sorted(&subjects));

        let b_id = subjects.iter().find(|s| s.name == "B").map(|s| s.id.clone()).unwrap();
        subjects = remove_subject(&subjects, &b_id);
        assert!(is_sorted(&subjects));
        let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn edit_unknown_id_changes_nothing() {
        let subjects = add_subject(&[], &input("A", 1.0, 1.0, 1.0), now());
        assert_eq!(edit_subject(&subjects, "missing", &SubjectUpdate::default()), subjects);
        assert_eq!(remove_subject(&subjects, "missing"), subjects);
    }

    #[test]
    fn stats_over_subjects() {
        let empty = priority_stats(&[]);
        assert_eq!(empty.total_subjects, 0);
        assert!(empty.highest_priority.is_none());

        let mut subjects = add_subject(&[], &input("A", 1.0, 1.0, 1.0), now());
        subjects = add_subject(&subjects, &input("B", 2.0, 1.0, 1.0), now());
        subjects = add_subject(&subjects, &input("C", 2.0, 2.0, 1.0), now());
        let stats = priority_stats(&subjects);
        assert_eq!(stats.total_subjects, 3);
        assert_eq!(stats.average_priority, 2.33);
        assert_eq!(stats.highest_priority.map(|s| s.name), Some("C".to_string()));
        assert_eq!(stats.lowest_priority.map(|s| s.name), Some("A".to_string()));
    }
}
