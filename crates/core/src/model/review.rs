use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ModuleId, ReviewId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors that can occur when building review values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("invalid review rating value: {0}")]
    InvalidRating(u8),
}

//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// Star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Converts a numeric value (1-5) to a `Rating`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidRating` if the value is not in 1-5.
    pub fn new(value: u8) -> Result<Self, ReviewError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::InvalidRating(value))
        }
    }

    /// Returns the underlying 1-5 value
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// A learner's module review, optionally answered once by a mentor.
///
/// Invariants: `created_at` never changes after authoring; at most one
/// mentor reply is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: ReviewId,
    module_id: ModuleId,
    user_id: UserId,
    user_name: String,
    rating: Rating,
    text: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edited_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mentor_reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mentor_reply_at: Option<DateTime<Utc>>,
}

impl Review {
    #[must_use]
    pub fn new(
        id: ReviewId,
        module_id: ModuleId,
        user_id: UserId,
        user_name: impl Into<String>,
        rating: Rating,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            module_id,
            user_id,
            user_name: user_name.into(),
            rating,
            text: text.into(),
            created_at,
            edited_at: None,
            mentor_reply: None,
            mentor_reply_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited_at
    }

    #[must_use]
    pub fn mentor_reply(&self) -> Option<&str> {
        self.mentor_reply.as_deref()
    }

    #[must_use]
    pub fn mentor_reply_at(&self) -> Option<DateTime<Utc>> {
        self.mentor_reply_at
    }

    /// Takes the learner-editable fields from `incoming`, stamping the edit
    /// time. `created_at` and any mentor reply are untouched.
    fn merge_edit(&mut self, incoming: Review, now: DateTime<Utc>) {
        self.user_name = incoming.user_name;
        self.rating = incoming.rating;
        self.text = incoming.text;
        self.edited_at = Some(now);
    }

    fn set_mentor_reply(&mut self, text: String, now: DateTime<Utc>) {
        self.mentor_reply = Some(text);
        self.mentor_reply_at = Some(now);
    }
}

//
// ─── REVIEW FEED ───────────────────────────────────────────────────────────────
//

/// The persisted review collection, ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewFeed(Vec<Review>);

impl ReviewFeed {
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        Self(reviews)
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.0
    }

    #[must_use]
    pub fn find(&self, id: &ReviewId) -> Option<&Review> {
        self.0.iter().find(|review| review.id() == id)
    }

    /// Merges a review into the feed.
    ///
    /// A review with a known id is edited in place (`edited_at = now`,
    /// `created_at` preserved); a fresh id is prepended so the feed stays
    /// newest-first. Returns true when an existing review was edited.
    pub fn save(&mut self, review: Review, now: DateTime<Utc>) -> bool {
        match self.0.iter_mut().find(|existing| existing.id() == review.id()) {
            Some(existing) => {
                existing.merge_edit(review, now);
                true
            }
            None => {
                self.0.insert(0, review);
                false
            }
        }
    }

    /// Records the mentor's reply on the named review, overwriting any
    /// previous reply. Unknown ids leave the feed unchanged.
    pub fn reply(&mut self, id: &ReviewId, text: impl Into<String>, now: DateTime<Utc>) -> bool {
        match self.0.iter_mut().find(|review| review.id() == id) {
            Some(review) => {
                review.set_mentor_reply(text.into(), now);
                true
            }
            None => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
