use serde_json::Value;

use crate::answers::{AnswerStore, AnswerValue};
use crate::error::Result;
use crate::spec::catalog::QuestionCatalog;
use crate::spec::question::Question;
use crate::visibility::{self, VisibilityMap, resolve_visibility};

/// Answered versus visible question counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// Conditional form state: a catalog plus the answers recorded so far.
///
/// Every query is recomputed from the answer store, so a changed answer is
/// reflected by the very next call.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    catalog: QuestionCatalog,
    answers: AnswerStore,
}

impl Questionnaire {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self {
            catalog,
            answers: AnswerStore::new(),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Records (or overwrites) the answer to `question_id`.
    pub fn record_answer(&mut self, question_id: &str, value: AnswerValue) -> Result<()> {
        let question = self.catalog.require(question_id)?;
        let answer = value.commit(question)?;
        tracing::debug!(question = question_id, ?answer, "recorded answer");
        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Records an answer supplied as JSON, e.g. from an answers file.
    pub fn record_json(&mut self, question_id: &str, value: &Value) -> Result<()> {
        let question = self.catalog.require(question_id)?;
        let value = AnswerValue::from_json(question, value)?;
        self.record_answer(question_id, value)
    }

    pub fn is_visible(&self, question_id: &str) -> Result<bool> {
        let question = self.catalog.require(question_id)?;
        visibility::is_visible(&self.catalog, &self.answers, question)
    }

    pub fn is_answered(&self, question_id: &str) -> Result<bool> {
        visibility::is_answered(&self.catalog, &self.answers, question_id)
    }

    /// True once every question is either answered or hidden.
    pub fn is_complete(&self) -> Result<bool> {
        Ok(self.first_blocking()?.is_none())
    }

    /// Smallest index `>= current_count` holding a visible question, or the
    /// catalog length when the rest of the catalog is hidden.
    pub fn next_renderable_index(&self, current_count: usize) -> Result<usize> {
        for (index, question) in self.catalog.questions.iter().enumerate().skip(current_count) {
            if visibility::is_visible(&self.catalog, &self.answers, question)? {
                return Ok(index);
            }
        }
        Ok(self.catalog.len())
    }

    /// The question to ask next: the first visible, unanswered one.
    pub fn current_question(&self) -> Result<Option<&Question>> {
        self.first_blocking()
    }

    /// Visible questions currently on screen, up to and including the
    /// current one.
    pub fn rendered_questions(&self) -> Result<Vec<&Question>> {
        let mut rendered = Vec::new();
        let mut index = self.next_renderable_index(0)?;
        while let Some(question) = self.catalog.questions.get(index) {
            rendered.push(question);
            if !self.is_answered(&question.id)? {
                break;
            }
            index = self.next_renderable_index(index + 1)?;
        }
        Ok(rendered)
    }

    pub fn visibility(&self) -> Result<VisibilityMap> {
        resolve_visibility(&self.catalog, &self.answers)
    }

    pub fn progress(&self) -> Result<Progress> {
        let mut progress = Progress {
            answered: 0,
            total: 0,
        };
        for question in &self.catalog.questions {
            if !visibility::is_visible(&self.catalog, &self.answers, question)? {
                continue;
            }
            progress.total += 1;
            if self.is_answered(&question.id)? {
                progress.answered += 1;
            }
        }
        Ok(progress)
    }

    fn first_blocking(&self) -> Result<Option<&Question>> {
        for question in &self.catalog.questions {
            if self.is_answered(&question.id)? {
                continue;
            }
            if visibility::is_visible(&self.catalog, &self.answers, question)? {
                return Ok(Some(question));
            }
        }
        Ok(None)
    }
}
