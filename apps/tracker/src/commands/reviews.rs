//! Review reminder commands.

use crate::state::AppState;
use std::collections::BTreeMap;
use study_core::review::{format_days_overdue, group_reviews_by_subject, PendingReview};
use study_core::ReviewSettings;

use super::CommandError;

#[derive(Debug, serde::Serialize)]
pub struct ReviewItem {
    #[serde(flatten)]
    pub review: PendingReview,
    pub overdue_label: String,
    pub urgent: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct PendingReviewsResponse {
    pub total: usize,
    pub urgent: usize,
    pub reviews: Vec<ReviewItem>,
    pub by_subject: BTreeMap<String, Vec<PendingReview>>,
}

pub fn get_review_settings(state: &AppState) -> Result<ReviewSettings, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.review_settings())
}

/// Change the review interval (7, 14, 21 or 30 days).
pub fn update_review_interval(days: u32, state: &AppState) -> Result<ReviewSettings, CommandError> {
    let mut tracker = state.lock()?;
    tracker.update_review_interval(days).map_err(Into::into)
}

/// Get reviews due now, most overdue first.
pub fn get_pending_reviews(state: &AppState) -> Result<PendingReviewsResponse, CommandError> {
    let tracker = state.lock()?;
    let reviews = tracker.pending_reviews();
    let by_subject = group_reviews_by_subject(&reviews);
    let items: Vec<ReviewItem> = reviews
        .into_iter()
        .map(|review| ReviewItem {
            overdue_label: format_days_overdue(review.days_overdue),
            urgent: review.is_urgent(),
            review,
        })
        .collect();

    Ok(PendingReviewsResponse {
        total: items.len(),
        urgent: items.iter().filter(|item| item.urgent).count(),
        reviews: items,
        by_subject,
    })
}

/// Number of reviews due now, for the badge in the header.
pub fn get_pending_review_count(state: &AppState) -> Result<usize, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.pending_review_count())
}
