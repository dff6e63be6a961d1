//! Weekly goal distribution.
//!
//! Goals and accumulations map subject name to hours. Every figure is
//! rounded to two decimals, so rounded shares may not add up exactly to the
//! distributed total.

use crate::round2;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weekly goal hours per subject.
pub type WeeklyGoals = BTreeMap<String, f64>;

/// Hours accumulated per subject during the week.
pub type WeeklyAccumulated = BTreeMap<String, f64>;

/// One day's hours split across subjects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDistribution {
    pub distribution: BTreeMap<String, f64>,
    pub total_distributed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub hours_per_subject: BTreeMap<String, f64>,
    pub total_hours: f64,
    pub completion_percentage: BTreeMap<String, i64>,
    pub overall_completion: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraHours {
    /// Only subjects past their goal appear here.
    pub extra_per_subject: BTreeMap<String, f64>,
    pub total_extra: f64,
}

/// Result of processing a whole study day in one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDayOutcome {
    pub daily_distribution: DailyDistribution,
    pub new_accumulated: WeeklyAccumulated,
    pub summary: WeeklySummary,
}

/// Split `daily_hours` across subjects in proportion to their weekly goals.
pub fn distribute_daily(goals: &WeeklyGoals, daily_hours: f64) -> DailyDistribution {
    if goals.is_empty() || !(daily_hours > 0.0) {
        return DailyDistribution::default();
    }

    let total_goal: f64 = goals.values().sum();
    if !(total_goal > 0.0) {
        return DailyDistribution::default();
    }

    let distribution: BTreeMap<String, f64> = goals
        .iter()
        .map(|(subject, goal)| (subject.clone(), round2(daily_hours * goal / total_goal)))
        .collect();
    let total_distributed = round2(distribution.values().sum());

    DailyDistribution {
        distribution,
        total_distributed,
    }
}

/// Add a day's distribution into the running totals.
pub fn accumulate_hours(accumulated: &WeeklyAccumulated, daily: &BTreeMap<String, f64>) -> WeeklyAccumulated {
    let mut next = accumulated.clone();
    for (subject, hours) in daily {
        let total = next.entry(subject.clone()).or_insert(0.0);
        *total = round2(*total + hours);
    }
    next
}

/// Progress of the week against the goals.
///
/// Subjects studied without a goal count as 100% complete and are left out
/// of the overall figure.
pub fn weekly_summary(goals: &WeeklyGoals, accumulated: &WeeklyAccumulated) -> WeeklySummary {
    let mut summary = WeeklySummary::default();
    let mut total_hours = 0.0;
    let mut total_goal = 0.0;

    for (subject, &goal) in goals {
        let studied = accumulated.get(subject).copied().unwrap_or(0.0);
        summary.hours_per_subject.insert(subject.clone(), round2(studied));
        total_hours += studied;
        total_goal += goal;

        let percentage = if goal > 0.0 {
            (studied / goal * 100.0).round() as i64
        } else {
            0
        };
        summary.completion_percentage.insert(subject.clone(), percentage);
    }

    for (subject, &studied) in accumulated {
        if !goals.contains_key(subject) {
            summary.hours_per_subject.insert(subject.clone(), studied);
            summary.completion_percentage.insert(subject.clone(), 100);
        }
    }

    summary.total_hours = round2(total_hours);
    summary.overall_completion = if total_goal > 0.0 {
        (total_hours / total_goal * 100.0).round() as i64
    } else {
        0
    };
    summary
}

/// Distribute, accumulate and summarize a study day as one step.
pub fn process_study_day(goals: &WeeklyGoals, accumulated: &WeeklyAccumulated, daily_hours: f64) -> StudyDayOutcome {
    let daily_distribution = distribute_daily(goals, daily_hours);
    let new_accumulated = accumulate_hours(accumulated, &daily_distribution.distribution);
    let summary = weekly_summary(goals, &new_accumulated);

    StudyDayOutcome {
        daily_distribution,
        new_accumulated,
        summary,
    }
}

/// Hours still missing per subject.
pub fn remaining_hours(goals: &WeeklyGoals, accumulated: &WeeklyAccumulated) -> BTreeMap<String, f64> {
    goals
        .iter()
        .map(|(subject, goal)| {
            let studied = accumulated.get(subject).copied().unwrap_or(0.0);
            (subject.clone(), round2((goal - studied).max(0.0)))
        })
        .collect()
}

/// Hours studied beyond each goal.
pub fn extra_hours(goals: &WeeklyGoals, accumulated: &WeeklyAccumulated) -> ExtraHours {
    let mut extra = ExtraHours::default();
    let mut total = 0.0;

    for (subject, goal) in goals {
        let studied = accumulated.get(subject).copied().unwrap_or(0.0);
        let over = (studied - goal).max(0.0);
        if over > 0.0 {
            extra.extra_per_subject.insert(subject.clone(), round2(over));
            total += over;
        }
    }

    extra.total_extra = round2(total);
    extra
}
