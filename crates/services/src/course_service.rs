use std::sync::Arc;

use lms_core::model::{ContentItem, Course, ModuleId};
use storage::{KeyValueGateway, keys, load_or, save};

use crate::catalog;
use crate::error::CourseServiceError;

/// Catalog access and the admin's practice-task authoring.
pub struct CourseService {
    kv: Arc<dyn KeyValueGateway>,
}

impl CourseService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueGateway>) -> Self {
        Self { kv }
    }

    /// The stored course, falling back to the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` on backend failure.
    pub async fn course(&self) -> Result<Course, CourseServiceError> {
        Ok(load_or(self.kv.as_ref(), keys::COURSE, catalog::default_course()).await?)
    }

    /// Appends a practice task to the named module and returns the updated
    /// course.
    ///
    /// An unknown module id leaves the course unchanged (and unpersisted).
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Module` when the item's id collides
    /// with existing content, `CourseServiceError::Storage` on backend
    /// failure.
    pub async fn add_practice_task(
        &self,
        module_id: &ModuleId,
        item: ContentItem,
    ) -> Result<Course, CourseServiceError> {
        let mut course = self.course().await?;
        if course.append_content(module_id, item)? {
            save(self.kv.as_ref(), keys::COURSE, &course).await?;
        }
        Ok(course)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{ContentId, ModuleError};
    use storage::InMemoryGateway;

    fn build_service() -> CourseService {
        CourseService::new(Arc::new(InMemoryGateway::new()))
    }

    #[tokio::test]
    async fn fresh_store_serves_the_catalog_course() {
        let service = build_service();
        let course = service.course().await.unwrap();
        assert_eq!(course.title(), "AI Engineer Career Path");
    }

    #[tokio::test]
    async fn practice_task_lands_at_the_end_of_the_module() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = CourseService::new(gateway.clone());

        let task = ContentItem::code(ContentId::new("m2_c3"), "Extra Drill", "# practice\n");
        let course = service
            .add_practice_task(&ModuleId::new("m2"), task)
            .await
            .unwrap();

        let module = course.find_module(&ModuleId::new("m2")).unwrap();
        assert_eq!(module.contents().last().unwrap().id(), &ContentId::new("m2_c3"));

        // persisted, not just returned
        let reloaded = CourseService::new(gateway).course().await.unwrap();
        assert!(
            reloaded
                .find_module(&ModuleId::new("m2"))
                .unwrap()
                .find_content(&ContentId::new("m2_c3"))
                .is_some()
        );
    }

    #[tokio::test]
    async fn unknown_module_is_a_noop() {
        let service = build_service();
        let task = ContentItem::code(ContentId::new("x1"), "Orphan", "# practice\n");
        let course = service
            .add_practice_task(&ModuleId::new("m99"), task)
            .await
            .unwrap();
        assert_eq!(course, catalog::default_course());
    }

    #[tokio::test]
    async fn duplicate_content_id_is_rejected() {
        let service = build_service();
        let task = ContentItem::code(ContentId::new("m2_c2"), "Clash", "# practice\n");
        let err = service
            .add_practice_task(&ModuleId::new("m2"), task)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CourseServiceError::Module(ModuleError::DuplicateContentId(_))
        ));
    }
}
