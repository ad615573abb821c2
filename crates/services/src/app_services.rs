use std::sync::Arc;

use lms_core::Clock;
use storage::{KeyValueGateway, Store, keys, save};

use crate::catalog;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::review_service::ReviewService;
use crate::user_service::UserService;

/// Assembles the app-facing services over one persistence gateway.
#[derive(Clone)]
pub struct AppServices {
    kv: Arc<dyn KeyValueGateway>,
    clock: Clock,
    users: Arc<UserService>,
    course: Arc<CourseService>,
    reviews: Arc<ReviewService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services over an arbitrary gateway.
    #[must_use]
    pub fn new(store: &Store, clock: Clock) -> Self {
        let kv = Arc::clone(&store.kv);
        Self {
            users: Arc::new(UserService::new(Arc::clone(&kv))),
            course: Arc::new(CourseService::new(Arc::clone(&kv))),
            reviews: Arc::new(ReviewService::new(Arc::clone(&kv)).with_clock(clock)),
            progress: Arc::new(ProgressService::new(Arc::clone(&kv))),
            kv,
            clock,
        }
    }

    /// Build services backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let store = Store::sqlite(db_url).await?;
        Ok(Self::new(&store, clock))
    }

    /// Build services over the in-memory gateway (tests, prototyping).
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(&Store::in_memory(), clock)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn course(&self) -> Arc<CourseService> {
        Arc::clone(&self.course)
    }

    #[must_use]
    pub fn reviews(&self) -> Arc<ReviewService> {
        Arc::clone(&self.reviews)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Writes the catalog collections for every key the store is missing,
    /// returning the keys that were seeded. Existing collections are never
    /// clobbered, so seeding is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` on backend failure.
    pub async fn ensure_seeded(&self) -> Result<Vec<&'static str>, AppServicesError> {
        let mut seeded = Vec::new();

        if self.kv.fetch(keys::USERS).await?.is_none() {
            save(self.kv.as_ref(), keys::USERS, &catalog::default_users()).await?;
            seeded.push(keys::USERS);
        }
        if self.kv.fetch(keys::COURSE).await?.is_none() {
            save(self.kv.as_ref(), keys::COURSE, &catalog::default_course()).await?;
            seeded.push(keys::COURSE);
        }
        if self.kv.fetch(keys::REVIEWS).await?.is_none() {
            save(
                self.kv.as_ref(),
                keys::REVIEWS,
                &catalog::default_reviews(self.clock.now()),
            )
            .await?;
            seeded.push(keys::REVIEWS);
        }
        if self.kv.fetch(keys::PROGRESS).await?.is_none() {
            save(self.kv.as_ref(), keys::PROGRESS, &catalog::default_progress()).await?;
            seeded.push(keys::PROGRESS);
        }

        Ok(seeded)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
