use std::collections::BTreeMap;

use crate::model::{
    ContentId, ContentItem, Module, ProgressEntry, ProgressStatus, QuestionId,
};

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// A learner action against one module, expressed as a value.
///
/// Events are applied by [`apply`], which is pure and total: malformed
/// input is clamped, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The learner finished a theory or code item.
    MarkContentComplete { content_id: ContentId },
    /// The learner submitted quiz answers: question id to chosen option
    /// index.
    SubmitQuiz {
        content_id: ContentId,
        answers: BTreeMap<QuestionId, usize>,
    },
}

//
// ─── EVENT PROCESSOR ───────────────────────────────────────────────────────────
//

/// Computes the next progress entry from the current entry plus one event.
///
/// Rules, in the order they run:
/// - `MarkContentComplete` unions the content id into the completed set
///   and promotes `NOT_STARTED -> IN_PROGRESS`. A content id that names a
///   quiz of this module is ignored; the score gate cannot be bypassed.
///   Ids the module does not know are unioned as-is (content removed after
///   completion stays counted). Idempotent.
/// - `SubmitQuiz` always records the attempt's score as the latest score;
///   only a passing attempt (`score >= passing_score`) unions the quiz id.
///   Submitting against an id that is not one of this module's quizzes
///   leaves the entry unchanged.
/// - Afterwards module completion is re-evaluated, so `COMPLETED` is
///   detected the instant the last gating item clears.
#[must_use]
pub fn apply(module: &Module, entry: &ProgressEntry, event: &ProgressEvent) -> ProgressEntry {
    let mut next = entry.clone();

    match event {
        ProgressEvent::MarkContentComplete { content_id } => {
            let is_quiz = module
                .find_content(content_id)
                .is_some_and(ContentItem::is_quiz);
            if !is_quiz {
                next.complete_content(content_id.clone());
                next.promote(ProgressStatus::InProgress);
            }
        }
        ProgressEvent::SubmitQuiz {
            content_id,
            answers,
        } => {
            if let Some(quiz) = module.find_content(content_id).filter(|item| item.is_quiz()) {
                let score = score_quiz(quiz, answers);
                next.record_quiz_score(score);
                if score >= quiz.passing_score() {
                    next.complete_content(content_id.clone());
                    next.promote(ProgressStatus::InProgress);
                }
            }
        }
    }

    evaluate_completion(module, &mut next);
    next
}

/// Scores a quiz attempt: one point per exactly matching option index.
///
/// Unanswered questions and answers naming unknown question ids score
/// zero. A quiz with no questions scores 100, trivially passing.
#[must_use]
pub fn score_quiz(quiz: &ContentItem, answers: &BTreeMap<QuestionId, usize>) -> f64 {
    let questions = quiz.questions();
    if questions.is_empty() {
        return 100.0;
    }

    let correct = questions
        .iter()
        .filter(|q| answers.get(q.id()).copied() == Some(q.correct_option_index()))
        .count();

    // Question counts are tiny; the cast cannot lose precision in practice.
    #[allow(clippy::cast_precision_loss)]
    let ratio = correct as f64 / questions.len() as f64;
    100.0 * ratio
}

/// Promotes the entry to `COMPLETED` once its completed set covers every
/// content id in the module.
fn evaluate_completion(module: &Module, entry: &mut ProgressEntry) {
    if module.content_ids().all(|id| entry.is_content_completed(id)) {
        entry.promote(ProgressStatus::Completed);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
