use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::model::ids::{ContentId, ModuleId, UserId};

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a learner's work on one module.
///
/// Ordered so that promotion is monotonic: `NOT_STARTED < IN_PROGRESS <
/// COMPLETED`. No event moves a status backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStatus::NotStarted => write!(f, "NOT_STARTED"),
            ProgressStatus::InProgress => write!(f, "IN_PROGRESS"),
            ProgressStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

//
// ─── PROGRESS ENTRY ────────────────────────────────────────────────────────────
//

/// The durable progress record for one (learner, module) pair.
///
/// Owned by the ledger and mutated only through the event processor, which
/// maintains the invariants: the completed set only grows, status only
/// advances, and a quiz id enters the set only on a passing attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    user_id: UserId,
    module_id: ModuleId,
    status: ProgressStatus,
    completed_contents: BTreeSet<ContentId>,
    #[serde(
        rename = "quizScore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    last_quiz_score: Option<f64>,
}

impl ProgressEntry {
    /// Creates the default entry for a pair that has no stored record yet.
    #[must_use]
    pub fn new(user_id: UserId, module_id: ModuleId) -> Self {
        Self {
            user_id,
            module_id,
            status: ProgressStatus::NotStarted,
            completed_contents: BTreeSet::new(),
            last_quiz_score: None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn completed_contents(&self) -> &BTreeSet<ContentId> {
        &self.completed_contents
    }

    #[must_use]
    pub fn is_content_completed(&self, id: &ContentId) -> bool {
        self.completed_contents.contains(id)
    }

    /// The most recent scored quiz attempt for this module, passing or not.
    #[must_use]
    pub fn last_quiz_score(&self) -> Option<f64> {
        self.last_quiz_score
    }

    /// Advances the status, never regresses it.
    pub(crate) fn promote(&mut self, status: ProgressStatus) {
        self.status = self.status.max(status);
    }

    /// Unions a content id into the completed set.
    pub(crate) fn complete_content(&mut self, id: ContentId) {
        self.completed_contents.insert(id);
    }

    pub(crate) fn record_quiz_score(&mut self, score: f64) {
        self.last_quiz_score = Some(score);
    }
}

//
// ─── PROGRESS LEDGER ───────────────────────────────────────────────────────────
//

/// Every progress entry across all learners and modules.
///
/// Exactly one entry per (learner, module) pair; `upsert` replaces whole
/// entries, so the last writer wins at entry granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLedger(Vec<ProgressEntry>);

impl ProgressLedger {
    #[must_use]
    pub fn new(entries: Vec<ProgressEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.0
    }

    #[must_use]
    pub fn find(&self, user_id: &UserId, module_id: &ModuleId) -> Option<&ProgressEntry> {
        self.0
            .iter()
            .find(|entry| entry.user_id() == user_id && entry.module_id() == module_id)
    }

    /// Returns the stored entry for the pair, or a fresh `NOT_STARTED`
    /// default when none exists. Never fails; absence is a steady state.
    #[must_use]
    pub fn get(&self, user_id: &UserId, module_id: &ModuleId) -> ProgressEntry {
        self.find(user_id, module_id)
            .cloned()
            .unwrap_or_else(|| ProgressEntry::new(user_id.clone(), module_id.clone()))
    }

    /// Replaces the entry matching the pair, or appends it.
    pub fn upsert(&mut self, entry: ProgressEntry) {
        match self
            .0
            .iter_mut()
            .find(|e| e.user_id() == entry.user_id() && e.module_id() == entry.module_id())
        {
            Some(existing) => *existing = entry,
            None => self.0.push(entry),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_entry(user: &str, module: &str) -> ProgressEntry {
        ProgressEntry::new(UserId::new(user), ModuleId::new(module))
    }

    #[test]
    fn fresh_entry_starts_empty() {
        let entry = build_entry("u1", "m1");
        assert_eq!(entry.status(), ProgressStatus::NotStarted);
        assert!(entry.completed_contents().is_empty());
        assert_eq!(entry.last_quiz_score(), None);
    }

    #[test]
    fn promote_never_regresses() {
        let mut entry = build_entry("u1", "m1");
        entry.promote(ProgressStatus::Completed);
        entry.promote(ProgressStatus::InProgress);
        assert_eq!(entry.status(), ProgressStatus::Completed);

        entry.promote(ProgressStatus::NotStarted);
        assert_eq!(entry.status(), ProgressStatus::Completed);
    }

    #[test]
    fn get_synthesizes_default_for_unknown_pair() {
        let ledger = ProgressLedger::default();
        let entry = ledger.get(&UserId::new("u1"), &ModuleId::new("m1"));
        assert_eq!(entry.status(), ProgressStatus::NotStarted);
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn upsert_replaces_matching_pair() {
        let mut ledger = ProgressLedger::default();
        ledger.upsert(build_entry("u1", "m1"));
        ledger.upsert(build_entry("u1", "m2"));

        let mut updated = build_entry("u1", "m1");
        updated.complete_content(ContentId::new("m1_c1"));
        updated.promote(ProgressStatus::InProgress);
        ledger.upsert(updated);

        assert_eq!(ledger.entries().len(), 2);
        let entry = ledger.find(&UserId::new("u1"), &ModuleId::new("m1")).unwrap();
        assert_eq!(entry.status(), ProgressStatus::InProgress);
        assert!(entry.is_content_completed(&ContentId::new("m1_c1")));
    }

    #[test]
    fn upsert_keeps_one_entry_per_pair() {
        let mut ledger = ProgressLedger::default();
        ledger.upsert(build_entry("u1", "m1"));
        ledger.upsert(build_entry("u2", "m1"));
        ledger.upsert(build_entry("u1", "m1"));
        assert_eq!(ledger.entries().len(), 2);
    }

    #[test]
    fn entry_serializes_wire_shape() {
        let mut entry = build_entry("u1", "m1");
        entry.complete_content(ContentId::new("m1_c1"));
        entry.promote(ProgressStatus::InProgress);
        entry.record_quiz_score(50.0);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["moduleId"], "m1");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["completedContents"][0], "m1_c1");
        assert_eq!(json["quizScore"], 50.0);
    }

    #[test]
    fn entry_without_score_omits_the_field() {
        let json = serde_json::to_value(build_entry("u1", "m1")).unwrap();
        assert!(json.get("quizScore").is_none());
        assert_eq!(json["status"], "NOT_STARTED");
    }
}
