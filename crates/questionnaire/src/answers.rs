use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{QuestionnaireError, Result};
use crate::spec::question::{Question, QuestionKind};

/// A committed answer, shaped by the kind of question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Radio and dropdown questions.
    Choice(String),
    /// Checkbox questions, in catalog option order.
    Selections(Vec<String>),
    /// Free text, trimmed and lower-cased.
    Text(String),
}

impl Answer {
    /// Whether the answer counts towards completion.
    pub fn is_filled(&self) -> bool {
        match self {
            Answer::Choice(_) | Answer::Text(_) => true,
            Answer::Selections(values) => !values.is_empty(),
        }
    }

    /// Matches an `equals` condition literal against this answer.
    pub fn holds(&self, expected: &str) -> bool {
        match self {
            Answer::Choice(value) | Answer::Text(value) => value == expected,
            Answer::Selections(values) => values.iter().any(|value| value == expected),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Answer::Choice(value) | Answer::Text(value) => Value::String(value.clone()),
            Answer::Selections(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Raw input for [`crate::Questionnaire::record_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Choice(String),
    Choices(Vec<String>),
    Text(String),
}

impl AnswerValue {
    pub fn choice(value: impl Into<String>) -> Self {
        AnswerValue::Choice(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Choices(values.into_iter().map(Into::into).collect())
    }

    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// Reads a JSON answer in the shape the question expects.
    ///
    /// Booleans are accepted for choice questions whose options are
    /// `"true"`/`"false"`.
    pub fn from_json(question: &Question, value: &Value) -> Result<Self> {
        let shape_error = |expected| QuestionnaireError::AnswerShape {
            question_id: question.id.clone(),
            expected,
        };
        match (&question.kind, value) {
            (QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. }, Value::String(text)) => {
                Ok(AnswerValue::Choice(text.clone()))
            }
            (QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. }, Value::Bool(flag)) => {
                Ok(AnswerValue::Choice(flag.to_string()))
            }
            (QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. }, _) => {
                Err(shape_error("a single option value"))
            }
            (QuestionKind::Checkbox { .. }, Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text.clone()),
                    Value::Bool(flag) => Ok(flag.to_string()),
                    _ => Err(shape_error("an array of option values")),
                })
                .collect::<Result<Vec<_>>>()
                .map(AnswerValue::Choices),
            (QuestionKind::Checkbox { .. }, _) => Err(shape_error("an array of option values")),
            (QuestionKind::Text { .. }, Value::String(text)) => Ok(AnswerValue::Text(text.clone())),
            (QuestionKind::Text { .. }, _) => Err(shape_error("a text value")),
        }
    }

    /// Validates the raw value against `question` and normalises it.
    pub(crate) fn commit(self, question: &Question) -> Result<Answer> {
        let invalid = |value: &str| QuestionnaireError::InvalidOption {
            question_id: question.id.clone(),
            value: value.to_string(),
        };
        match (&question.kind, self) {
            (
                QuestionKind::Radio { options } | QuestionKind::Dropdown { options },
                AnswerValue::Choice(value),
            ) => {
                if options.iter().any(|option| option.value == value) {
                    Ok(Answer::Choice(value))
                } else {
                    Err(invalid(&value))
                }
            }
            (QuestionKind::Checkbox { options }, AnswerValue::Choices(values)) => {
                if let Some(unknown) = values
                    .iter()
                    .find(|value| !options.iter().any(|option| &option.value == *value))
                {
                    return Err(invalid(unknown));
                }
                let selected = options
                    .iter()
                    .filter(|option| values.contains(&option.value))
                    .map(|option| option.value.clone())
                    .collect();
                Ok(Answer::Selections(selected))
            }
            (QuestionKind::Text { .. }, AnswerValue::Text(value)) => {
                Ok(Answer::Text(value.trim().to_lowercase()))
            }
            (QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. }, _) => {
                Err(QuestionnaireError::AnswerShape {
                    question_id: question.id.clone(),
                    expected: "a single option value",
                })
            }
            (QuestionKind::Checkbox { .. }, _) => Err(QuestionnaireError::AnswerShape {
                question_id: question.id.clone(),
                expected: "a set of option values",
            }),
            (QuestionKind::Text { .. }, _) => Err(QuestionnaireError::AnswerShape {
                question_id: question.id.clone(),
                expected: "a text value",
            }),
        }
    }
}

/// Session-scoped answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.answers.iter()
    }

    /// JSON object view, handy for dumps and render payloads.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.answers
                .iter()
                .map(|(id, answer)| (id.clone(), answer.to_json()))
                .collect(),
        )
    }

    pub(crate) fn insert(&mut self, question_id: String, answer: Answer) {
        self.answers.insert(question_id, answer);
    }
}
