use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use lms_core::model::{ContentId, ModuleId, ProgressStatus, QuestionId, Rating, ReviewId, UserId};
use lms_core::processor::ProgressEvent;
use lms_core::time::fixed_clock;
use services::{AppServices, ModuleOverview, ProgressService, ProgressServiceError, StatusBadge};
use storage::{KeyValueGateway, StorageError};

fn mark(id: &str) -> ProgressEvent {
    ProgressEvent::MarkContentComplete {
        content_id: ContentId::new(id),
    }
}

fn quiz_answers(pairs: &[(&str, usize)]) -> BTreeMap<QuestionId, usize> {
    pairs
        .iter()
        .map(|(q, opt)| (QuestionId::new(*q), *opt))
        .collect()
}

#[tokio::test]
async fn learner_completes_module_one_end_to_end() {
    let services = AppServices::in_memory(fixed_clock());
    services.ensure_seeded().await.unwrap();

    let learner = services
        .users()
        .authenticate("alex@lms.com", services::DEFAULT_PASSWORD)
        .await
        .unwrap()
        .expect("demo student should authenticate");

    let course = services.course().course().await.unwrap();
    let module = course.find_module(&ModuleId::new("m1")).unwrap();
    let progress = services.progress();

    // the seeded ledger already has the first theory item done
    let entry = progress.entry(learner.id(), module.id()).await.unwrap();
    assert_eq!(entry.status(), ProgressStatus::InProgress);

    progress
        .record(module, learner.id(), &mark("m1_c2"))
        .await
        .unwrap();

    // a failing quiz attempt records its score but keeps the gate shut
    let failed = progress
        .record(
            module,
            learner.id(),
            &ProgressEvent::SubmitQuiz {
                content_id: ContentId::new("m1_c3"),
                answers: quiz_answers(&[("q1", 1), ("q2", 1)]),
            },
        )
        .await
        .unwrap();
    assert_eq!(failed.status(), ProgressStatus::InProgress);
    assert_eq!(failed.last_quiz_score(), Some(50.0));

    let passed = progress
        .record(
            module,
            learner.id(),
            &ProgressEvent::SubmitQuiz {
                content_id: ContentId::new("m1_c3"),
                answers: quiz_answers(&[("q1", 0), ("q2", 1)]),
            },
        )
        .await
        .unwrap();
    assert_eq!(passed.status(), ProgressStatus::Completed);
    assert_eq!(passed.last_quiz_score(), Some(100.0));

    let overview = ModuleOverview::derive(&passed, module);
    assert_eq!(overview.badge, StatusBadge::Completed);
    assert_eq!(overview.percentage, 100);
}

#[tokio::test]
async fn review_round_trip_through_the_feed() {
    let services = AppServices::in_memory(fixed_clock());
    services.ensure_seeded().await.unwrap();

    let learner = services
        .users()
        .authenticate("alex@lms.com", services::DEFAULT_PASSWORD)
        .await
        .unwrap()
        .unwrap();

    let reviews = services.reviews();
    let review = reviews.new_review(
        ModuleId::new("m2"),
        &learner,
        Rating::new(4).unwrap(),
        "The predictor project is a great warm-up.",
    );
    let id = review.id().clone();
    reviews.save_review(review).await.unwrap();

    let feed = reviews.add_mentor_reply(&id, "Glad it clicked!").await.unwrap();
    let stored = feed.find(&id).unwrap();
    assert_eq!(stored.mentor_reply(), Some("Glad it clicked!"));
    assert_eq!(feed.reviews()[0].id(), &id);
    assert_eq!(feed.find(&ReviewId::new("r1")).unwrap().mentor_reply(), None);
}

/// Gateway that accepts reads but refuses writes, for error-path testing.
#[derive(Default)]
struct ReadOnlyGateway;

#[async_trait]
impl KeyValueGateway for ReadOnlyGateway {
    async fn fetch(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only backend".into()))
    }
}

#[tokio::test]
async fn backend_write_failure_surfaces_as_storage_error() {
    let progress = ProgressService::new(Arc::new(ReadOnlyGateway));
    let course = services::catalog::default_course();
    let module = course.find_module(&ModuleId::new("m1")).unwrap();

    let err = progress
        .record(module, &UserId::new("u1"), &mark("m1_c1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressServiceError::Storage(_)));
}
