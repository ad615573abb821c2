#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod course_service;
pub mod error;
pub mod progress_service;
pub mod review_service;
pub mod user_service;
pub mod views;

pub use lms_core::Clock;

pub use app_services::AppServices;
pub use course_service::CourseService;
pub use error::{
    AppServicesError, CourseServiceError, ProgressServiceError, ReviewServiceError,
    UserServiceError,
};
pub use progress_service::ProgressService;
pub use review_service::ReviewService;
pub use user_service::{UserService, DEFAULT_PASSWORD};
pub use views::{completion_percentage, ModuleOverview, StatusBadge};
