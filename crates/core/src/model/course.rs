use serde::{Deserialize, Serialize};

use crate::model::content::ContentItem;
use crate::model::ids::{CourseId, ModuleId};
use crate::model::module::{Module, ModuleError};

/// The course catalog: ordered modules under one course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    modules: Vec<Module>,
}

impl Course {
    #[must_use]
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        modules: Vec<Module>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            modules,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
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
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn find_module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    /// Appends a content item to the named module.
    ///
    /// Returns `Ok(false)` when no module matches, leaving the course
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::DuplicateContentId` if the module already has
    /// an item with the same id.
    pub fn append_content(
        &mut self,
        module_id: &ModuleId,
        item: ContentItem,
    ) -> Result<bool, ModuleError> {
        match self.modules.iter_mut().find(|m| m.id() == module_id) {
            Some(module) => {
                module.append_content(item)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
