use thiserror::Error;

use crate::model::ContentError;
use crate::model::ModuleError;
use crate::model::ReviewError;
use crate::model::UserError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    User(#[from] UserError),
}
