use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::content::ContentItem;
use crate::model::ids::{ContentId, ModuleId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("duplicate content id within module: {0}")]
    DuplicateContentId(ContentId),
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// An ordered sequence of content items plus catalog metadata.
///
/// Content order is presentation order only; it never gates which item a
/// learner may complete next. Content ids are unique within the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    estimated_time: String,
    tags: Vec<String>,
    contents: Vec<ContentItem>,
}

impl Module {
    /// Creates a module, validating the unique-content-id invariant.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyTitle` for a blank title and
    /// `ModuleError::DuplicateContentId` when two items share an id.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_time: impl Into<String>,
        tags: Vec<String>,
        contents: Vec<ContentItem>,
    ) -> Result<Self, ModuleError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModuleError::EmptyTitle);
        }
        for (i, item) in contents.iter().enumerate() {
            if contents[..i].iter().any(|other| other.id() == item.id()) {
                return Err(ModuleError::DuplicateContentId(item.id().clone()));
            }
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            estimated_time: estimated_time.into(),
            tags,
            contents,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn contents(&self) -> &[ContentItem] {
        &self.contents
    }

    /// Iterates the module's content identities in presentation order.
    pub fn content_ids(&self) -> impl Iterator<Item = &ContentId> {
        self.contents.iter().map(ContentItem::id)
    }

    #[must_use]
    pub fn find_content(&self, id: &ContentId) -> Option<&ContentItem> {
        self.contents.iter().find(|item| item.id() == id)
    }

    /// Appends an item to the content sequence.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::DuplicateContentId` if an item with the same
    /// id already exists; the module is left unchanged.
    pub fn append_content(&mut self, item: ContentItem) -> Result<(), ModuleError> {
        if self.find_content(item.id()).is_some() {
            return Err(ModuleError::DuplicateContentId(item.id().clone()));
        }
        self.contents.push(item);
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
