mod content;
mod course;
mod ids;
mod module;
mod progress;
mod review;
mod user;

pub use ids::{ContentId, CourseId, ModuleId, QuestionId, ReviewId, UserId};

pub use content::{ContentError, ContentItem, ContentKind, QuizQuestion, DEFAULT_PASSING_SCORE};
pub use course::Course;
pub use module::{Module, ModuleError};
pub use progress::{ProgressEntry, ProgressLedger, ProgressStatus};
pub use review::{Rating, Review, ReviewError, ReviewFeed};
pub use user::{Role, User, UserError};
