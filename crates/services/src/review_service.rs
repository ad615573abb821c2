use std::sync::Arc;

use lms_core::Clock;
use lms_core::model::{ModuleId, Rating, Review, ReviewFeed, ReviewId, User};
use storage::{KeyValueGateway, keys, load_or, save};

use crate::catalog;
use crate::error::ReviewServiceError;

/// Review authoring, editing, and the mentor's single reply slot.
///
/// Merge semantics live in the core `ReviewFeed`; this service loads the
/// feed, stamps time through its clock, and persists the result.
pub struct ReviewService {
    clock: Clock,
    kv: Arc<dyn KeyValueGateway>,
}

impl ReviewService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueGateway>) -> Self {
        Self {
            clock: Clock::default(),
            kv,
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds a fresh review for a learner, minting its identity and
    /// stamping creation time from the service clock.
    #[must_use]
    pub fn new_review(
        &self,
        module_id: ModuleId,
        author: &User,
        rating: Rating,
        text: impl Into<String>,
    ) -> Review {
        Review::new(
            ReviewId::random(),
            module_id,
            author.id().clone(),
            author.name(),
            rating,
            text,
            self.clock.now(),
        )
    }

    /// The stored feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Storage` on backend failure.
    pub async fn list(&self) -> Result<ReviewFeed, ReviewServiceError> {
        Ok(load_or(
            self.kv.as_ref(),
            keys::REVIEWS,
            catalog::default_reviews(self.clock.now()),
        )
        .await?)
    }

    /// Merges a review into the feed (edit or prepend) and persists it.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Storage` on backend failure.
    pub async fn save_review(&self, review: Review) -> Result<ReviewFeed, ReviewServiceError> {
        let mut feed = self.list().await?;
        feed.save(review, self.clock.now());
        save(self.kv.as_ref(), keys::REVIEWS, &feed).await?;
        Ok(feed)
    }

    /// Records the mentor's reply on the named review, overwriting any
    /// previous reply; unknown ids persist the feed unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Storage` on backend failure.
    pub async fn add_mentor_reply(
        &self,
        review_id: &ReviewId,
        text: impl Into<String> + Send,
    ) -> Result<ReviewFeed, ReviewServiceError> {
        let mut feed = self.list().await?;
        feed.reply(review_id, text, self.clock.now());
        save(self.kv.as_ref(), keys::REVIEWS, &feed).await?;
        Ok(feed)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lms_core::model::{Role, UserId};
    use lms_core::time::{fixed_clock, fixed_now};
    use storage::InMemoryGateway;

    fn build_service() -> ReviewService {
        ReviewService::new(Arc::new(InMemoryGateway::new())).with_clock(fixed_clock())
    }

    fn demo_student() -> User {
        User::new(
            UserId::new("u1"),
            "Alex Student",
            "alex@lms.com",
            Role::Student,
            "https://picsum.photos/200/200?random=1",
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fresh_store_serves_the_seeded_review() {
        let service = build_service();
        let feed = service.list().await.unwrap();
        assert_eq!(feed.reviews().len(), 1);
        assert_eq!(feed.reviews()[0].id().as_str(), "r1");
    }

    #[tokio::test]
    async fn new_reviews_are_prepended() {
        let service = build_service();
        let review = service.new_review(
            ModuleId::new("m2"),
            &demo_student(),
            Rating::new(4).unwrap(),
            "Solid project brief.",
        );
        let id = review.id().clone();

        let feed = service.save_review(review).await.unwrap();
        assert_eq!(feed.reviews().len(), 2);
        assert_eq!(feed.reviews()[0].id(), &id);
        assert_eq!(feed.reviews()[1].id().as_str(), "r1");
    }

    #[tokio::test]
    async fn editing_updates_edited_at_only() {
        let gateway = Arc::new(InMemoryGateway::new());
        let created_clock = fixed_clock();
        let service = ReviewService::new(gateway.clone()).with_clock(created_clock);

        let review = service.new_review(
            ModuleId::new("m2"),
            &demo_student(),
            Rating::new(4).unwrap(),
            "first impression",
        );
        let id = review.id().clone();
        service.save_review(review.clone()).await.unwrap();

        let later = Clock::fixed(fixed_now() + Duration::hours(3));
        let editor = ReviewService::new(gateway).with_clock(later);
        let edited = editor.new_review(
            ModuleId::new("m2"),
            &demo_student(),
            Rating::new(5).unwrap(),
            "even better on a second pass",
        );
        // keep the same identity so the save is an edit
        let edited = Review::new(
            id.clone(),
            ModuleId::new("m2"),
            UserId::new("u1"),
            edited.user_name(),
            edited.rating(),
            edited.text(),
            edited.created_at(),
        );

        let feed = editor.save_review(edited).await.unwrap();
        let stored = feed.find(&id).unwrap();
        assert_eq!(stored.created_at(), fixed_now());
        assert_eq!(stored.edited_at(), Some(fixed_now() + Duration::hours(3)));
        assert_eq!(stored.rating().value(), 5);
    }

    #[tokio::test]
    async fn reply_overwrites_previous_reply() {
        let service = build_service();
        let id = ReviewId::new("r1");

        service.add_mentor_reply(&id, "Thanks!").await.unwrap();
        let feed = service.add_mentor_reply(&id, "Updated answer").await.unwrap();

        assert_eq!(feed.find(&id).unwrap().mentor_reply(), Some("Updated answer"));
    }

    #[tokio::test]
    async fn reply_to_unknown_review_leaves_feed_unchanged() {
        let service = build_service();
        let before = service.list().await.unwrap();
        let after = service
            .add_mentor_reply(&ReviewId::new("missing"), "hello?")
            .await
            .unwrap();
        assert_eq!(before, after);
    }
}
