use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{ContentId, QuestionId};

/// Passing score applied when a quiz does not declare its own.
pub const DEFAULT_PASSING_SCORE: u8 = 60;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("question {question} marks option {index} correct but has {options} options")]
    InvalidCorrectOption {
        question: QuestionId,
        index: usize,
        options: usize,
    },

    #[error("passing score must be 0-100, got {0}")]
    InvalidPassingScore(u8),
}

//
// ─── CONTENT KIND ──────────────────────────────────────────────────────────────
//

/// The three kinds of content a module sequences.
///
/// - `Theory`: reading material, marked complete by the learner
/// - `Code`: an exercise with starter code, marked complete by the learner
/// - `Quiz`: scored questions gated by a passing score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Theory,
    Code,
    Quiz,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Theory => write!(f, "THEORY"),
            ContentKind::Code => write!(f, "CODE"),
            ContentKind::Quiz => write!(f, "QUIZ"),
        }
    }
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

/// One multiple-choice question: option texts plus the index of the
/// correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_option_index: usize,
}

impl QuizQuestion {
    /// Creates a question.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidCorrectOption` if the correct index
    /// does not address one of the options.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, ContentError> {
        if correct_option_index >= options.len() {
            return Err(ContentError::InvalidCorrectOption {
                question: id,
                index: correct_option_index,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            text: text.into(),
            options,
            correct_option_index,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }
}

//
// ─── CONTENT ITEM ──────────────────────────────────────────────────────────────
//

/// One item in a module's ordered content sequence. Immutable once
/// authored.
///
/// `body` holds markdown text for theory items and starter code for code
/// items. Only quizzes carry questions and a passing score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    id: ContentId,
    #[serde(rename = "type")]
    kind: ContentKind,
    title: String,
    #[serde(rename = "content")]
    body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    questions: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    passing_score: Option<u8>,
}

impl ContentItem {
    /// Creates a theory item.
    #[must_use]
    pub fn theory(id: ContentId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            kind: ContentKind::Theory,
            title: title.into(),
            body: body.into(),
            questions: Vec::new(),
            passing_score: None,
        }
    }

    /// Creates a code exercise item.
    #[must_use]
    pub fn code(id: ContentId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            kind: ContentKind::Code,
            title: title.into(),
            body: body.into(),
            questions: Vec::new(),
            passing_score: None,
        }
    }

    /// Creates a quiz item.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidPassingScore` if the declared passing
    /// score exceeds 100.
    pub fn quiz(
        id: ContentId,
        title: impl Into<String>,
        body: impl Into<String>,
        questions: Vec<QuizQuestion>,
        passing_score: Option<u8>,
    ) -> Result<Self, ContentError> {
        if let Some(score) = passing_score {
            if score > 100 {
                return Err(ContentError::InvalidPassingScore(score));
            }
        }

        Ok(Self {
            id,
            kind: ContentKind::Quiz,
            title: title.into(),
            body: body.into(),
            questions,
            passing_score,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ContentId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn is_quiz(&self) -> bool {
        self.kind == ContentKind::Quiz
    }

    /// The score a quiz attempt must reach to pass.
    #[must_use]
    pub fn passing_score(&self) -> f64 {
        f64::from(self.passing_score.unwrap_or(DEFAULT_PASSING_SCORE))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
