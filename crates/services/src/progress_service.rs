use std::sync::Arc;

use lms_core::model::{Module, ModuleId, ProgressEntry, ProgressLedger, UserId};
use lms_core::processor::{self, ProgressEvent};
use storage::{KeyValueGateway, keys, load_or, save};

use crate::catalog;
use crate::error::ProgressServiceError;

/// The read-modify-write flow around the progress ledger.
///
/// Every recorded event runs get -> apply -> upsert -> save, so no event's
/// contribution is lost in the single-actor case. Concurrent writers racing
/// on the ledger key resolve last-writer-wins at entry granularity.
pub struct ProgressService {
    kv: Arc<dyn KeyValueGateway>,
}

impl ProgressService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueGateway>) -> Self {
        Self { kv }
    }

    /// The full ledger across all learners and modules.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failure.
    pub async fn ledger(&self) -> Result<ProgressLedger, ProgressServiceError> {
        Ok(load_or(self.kv.as_ref(), keys::PROGRESS, catalog::default_progress()).await?)
    }

    /// The entry for one (learner, module) pair; a pair with no stored
    /// record yields the `NOT_STARTED` default.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failure.
    pub async fn entry(
        &self,
        user_id: &UserId,
        module_id: &ModuleId,
    ) -> Result<ProgressEntry, ProgressServiceError> {
        Ok(self.ledger().await?.get(user_id, module_id))
    }

    /// Applies one event to the learner's entry for `module` and persists
    /// the updated ledger, returning the new entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failure; event
    /// application itself is total and cannot fail.
    pub async fn record(
        &self,
        module: &Module,
        user_id: &UserId,
        event: &ProgressEvent,
    ) -> Result<ProgressEntry, ProgressServiceError> {
        let mut ledger = self.ledger().await?;
        let current = ledger.get(user_id, module.id());
        let next = processor::apply(module, &current, event);
        ledger.upsert(next.clone());
        save(self.kv.as_ref(), keys::PROGRESS, &ledger).await?;
        Ok(next)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{ContentId, ProgressStatus, QuestionId};
    use storage::InMemoryGateway;

    fn build_service() -> (Arc<InMemoryGateway>, ProgressService) {
        let gateway = Arc::new(InMemoryGateway::new());
        (gateway.clone(), ProgressService::new(gateway))
    }

    fn mark(id: &str) -> ProgressEvent {
        ProgressEvent::MarkContentComplete {
            content_id: ContentId::new(id),
        }
    }

    #[tokio::test]
    async fn unknown_pair_yields_default_entry() {
        let (_, service) = build_service();
        let entry = service
            .entry(&UserId::new("u7"), &ModuleId::new("m3"))
            .await
            .unwrap();
        assert_eq!(entry.status(), ProgressStatus::NotStarted);
        assert!(entry.completed_contents().is_empty());
    }

    #[tokio::test]
    async fn recorded_events_survive_reload() {
        let (gateway, service) = build_service();
        let course = crate::catalog::default_course();
        let module = course.find_module(&ModuleId::new("m2")).unwrap();
        let learner = UserId::new("u1");

        service.record(module, &learner, &mark("m2_c1")).await.unwrap();

        let reloaded = ProgressService::new(gateway);
        let entry = reloaded.entry(&learner, module.id()).await.unwrap();
        assert_eq!(entry.status(), ProgressStatus::InProgress);
        assert!(entry.is_content_completed(&ContentId::new("m2_c1")));
    }

    #[tokio::test]
    async fn completing_every_item_certifies_the_module() {
        let (_, service) = build_service();
        let course = crate::catalog::default_course();
        let module = course.find_module(&ModuleId::new("m1")).unwrap();
        let learner = UserId::new("u1");

        service.record(module, &learner, &mark("m1_c1")).await.unwrap();
        let mid = service.record(module, &learner, &mark("m1_c2")).await.unwrap();
        assert_eq!(mid.status(), ProgressStatus::InProgress);

        let answers: std::collections::BTreeMap<QuestionId, usize> =
            [(QuestionId::new("q1"), 0), (QuestionId::new("q2"), 1)]
                .into_iter()
                .collect();
        let done = service
            .record(
                module,
                &learner,
                &ProgressEvent::SubmitQuiz {
                    content_id: ContentId::new("m1_c3"),
                    answers,
                },
            )
            .await
            .unwrap();

        assert_eq!(done.status(), ProgressStatus::Completed);
        assert_eq!(done.last_quiz_score(), Some(100.0));
    }

    #[tokio::test]
    async fn events_for_different_learners_stay_separate() {
        let (_, service) = build_service();
        let course = crate::catalog::default_course();
        let module = course.find_module(&ModuleId::new("m2")).unwrap();

        service
            .record(module, &UserId::new("u1"), &mark("m2_c1"))
            .await
            .unwrap();
        let other = service
            .entry(&UserId::new("u2"), module.id())
            .await
            .unwrap();
        assert_eq!(other.status(), ProgressStatus::NotStarted);
    }
}
