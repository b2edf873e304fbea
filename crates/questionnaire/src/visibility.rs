use std::collections::BTreeMap;

use crate::answers::AnswerStore;
use crate::error::Result;
use crate::spec::catalog::QuestionCatalog;
use crate::spec::question::{Condition, Expectation, Question};

pub type VisibilityMap = BTreeMap<String, bool>;

/// Whether the referenced question has a filled answer.
pub(crate) fn is_answered(
    catalog: &QuestionCatalog,
    answers: &AnswerStore,
    question_id: &str,
) -> Result<bool> {
    catalog.require(question_id)?;
    Ok(answers
        .get(question_id)
        .map(|answer| answer.is_filled())
        .unwrap_or(false))
}

fn condition_holds(
    catalog: &QuestionCatalog,
    answers: &AnswerStore,
    condition: &Condition,
) -> Result<bool> {
    match &condition.expect {
        Expectation::NotEmpty => is_answered(catalog, answers, &condition.question_id),
        Expectation::Equals { value } => {
            catalog.require(&condition.question_id)?;
            Ok(answers
                .get(&condition.question_id)
                .map(|answer| answer.holds(value))
                .unwrap_or(false))
        }
    }
}

/// Evaluates the conjunctive `show_if` of `question` against the current answers.
pub(crate) fn is_visible(
    catalog: &QuestionCatalog,
    answers: &AnswerStore,
    question: &Question,
) -> Result<bool> {
    for condition in &question.show_if {
        if !condition_holds(catalog, answers, condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn resolve_visibility(catalog: &QuestionCatalog, answers: &AnswerStore) -> Result<VisibilityMap> {
    let mut map = VisibilityMap::new();
    for question in &catalog.questions {
        let visible = is_visible(catalog, answers, question)?;
        map.insert(question.id.clone(), visible);
    }
    tracing::trace!(?map, "resolved visibility");
    Ok(map)
}
