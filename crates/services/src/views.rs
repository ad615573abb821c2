//! Read-only projections over the ledger, derived on demand and never
//! persisted.

use lms_core::model::{Module, ProgressEntry, ProgressStatus};

//
// ─── STATUS BADGE ──────────────────────────────────────────────────────────────
//

/// Presentation badge mapped directly off the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    NotStarted,
    InProgress,
    Completed,
}

impl StatusBadge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::NotStarted => "Not Started",
            StatusBadge::InProgress => "In Progress",
            StatusBadge::Completed => "Completed",
        }
    }
}

impl From<ProgressStatus> for StatusBadge {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::NotStarted => StatusBadge::NotStarted,
            ProgressStatus::InProgress => StatusBadge::InProgress,
            ProgressStatus::Completed => StatusBadge::Completed,
        }
    }
}

//
// ─── COMPLETION PERCENTAGE ─────────────────────────────────────────────────────
//

/// How much of `module` the entry covers, rounded to whole percent.
///
/// A `COMPLETED` entry always reads 100, even when the module has since
/// grown content the learner never saw; completion is never retroactively
/// withdrawn. Only ids the module currently contains count toward the
/// ratio.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn completion_percentage(entry: &ProgressEntry, module: &Module) -> u8 {
    if entry.status() == ProgressStatus::Completed {
        return 100;
    }
    let total = module.contents().len();
    if total == 0 {
        return 0;
    }

    let done = module
        .content_ids()
        .filter(|id| entry.is_content_completed(id))
        .count();

    // done <= total, both a handful of items; the arithmetic stays exact.
    (100.0 * done as f64 / total as f64).round() as u8
}

//
// ─── MODULE OVERVIEW ───────────────────────────────────────────────────────────
//

/// Aggregated per-module progress line, useful for dashboards.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOverview {
    pub module_title: String,
    pub badge: StatusBadge,
    pub items_completed: usize,
    pub items_total: usize,
    pub percentage: u8,
    pub last_quiz_score: Option<f64>,
}

impl ModuleOverview {
    #[must_use]
    pub fn derive(entry: &ProgressEntry, module: &Module) -> Self {
        let items_completed = module
            .content_ids()
            .filter(|id| entry.is_content_completed(id))
            .count();

        Self {
            module_title: module.title().to_owned(),
            badge: StatusBadge::from(entry.status()),
            items_completed,
            items_total: module.contents().len(),
            percentage: completion_percentage(entry, module),
            last_quiz_score: entry.last_quiz_score(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{ContentId, ModuleId, UserId};
    use lms_core::processor::{self, ProgressEvent};

    fn build_module(ids: &[&str]) -> Module {
        let contents = ids
            .iter()
            .map(|id| lms_core::model::ContentItem::theory(ContentId::new(*id), "T", "Body"))
            .collect();
        Module::new(ModuleId::new("m1"), "Module", "desc", "1 Week", Vec::new(), contents).unwrap()
    }

    fn entry_with(module: &Module, completed: &[&str]) -> ProgressEntry {
        let mut entry = ProgressEntry::new(UserId::new("u1"), ModuleId::new("m1"));
        for id in completed {
            entry = processor::apply(
                module,
                &entry,
                &ProgressEvent::MarkContentComplete {
                    content_id: ContentId::new(*id),
                },
            );
        }
        entry
    }

    #[test]
    fn fresh_entry_reads_zero_percent() {
        let module = build_module(&["a", "b", "c"]);
        let entry = ProgressEntry::new(UserId::new("u1"), ModuleId::new("m1"));
        assert_eq!(completion_percentage(&entry, &module), 0);
        assert_eq!(StatusBadge::from(entry.status()), StatusBadge::NotStarted);
    }

    #[test]
    fn partial_progress_rounds_to_whole_percent() {
        let module = build_module(&["a", "b", "c"]);
        let entry = entry_with(&module, &["a"]);
        assert_eq!(completion_percentage(&entry, &module), 33);
    }

    #[test]
    fn completed_entry_reads_hundred_regardless_of_set() {
        let module = build_module(&["a", "b"]);
        let entry = entry_with(&module, &["a", "b"]);
        assert_eq!(entry.status(), ProgressStatus::Completed);

        // content added after certification does not uncomplete the learner
        let grown = build_module(&["a", "b", "late_addition"]);
        assert_eq!(completion_percentage(&entry, &grown), 100);
    }

    #[test]
    fn ids_outside_the_module_do_not_count() {
        let module = build_module(&["a", "b", "c"]);
        let mut entry = entry_with(&module, &["a"]);
        entry = processor::apply(
            &module,
            &entry,
            &ProgressEvent::MarkContentComplete {
                content_id: ContentId::new("removed_item"),
            },
        );
        assert_eq!(completion_percentage(&entry, &module), 33);
    }

    #[test]
    fn overview_aggregates_entry_and_module() {
        let module = build_module(&["a", "b", "c", "d"]);
        let entry = entry_with(&module, &["a", "b"]);

        let overview = ModuleOverview::derive(&entry, &module);
        assert_eq!(overview.items_completed, 2);
        assert_eq!(overview.items_total, 4);
        assert_eq!(overview.percentage, 50);
        assert_eq!(overview.badge, StatusBadge::InProgress);
        assert_eq!(overview.badge.label(), "In Progress");
    }
}
