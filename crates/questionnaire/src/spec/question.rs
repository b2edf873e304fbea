use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Expected state of the question referenced by a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum Expectation {
    /// The referenced answer holds (or, for checkboxes, contains) `value`.
    Equals { value: String },
    /// The referenced question has any answer at all.
    NotEmpty,
}

/// A single `show_if` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub question_id: String,
    #[serde(flatten)]
    pub expect: Expectation,
}

impl Condition {
    pub fn equals(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            expect: Expectation::Equals {
                value: value.into(),
            },
        }
    }

    pub fn not_empty(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            expect: Expectation::NotEmpty,
        }
    }
}

/// Kind-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Radio {
        options: Vec<ChoiceOption>,
    },
    Checkbox {
        options: Vec<ChoiceOption>,
    },
    Dropdown {
        options: Vec<ChoiceOption>,
    },
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        placeholders: Vec<String>,
    },
}

impl QuestionKind {
    /// Options for choice questions, `None` for free text.
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            QuestionKind::Radio { options }
            | QuestionKind::Checkbox { options }
            | QuestionKind::Dropdown { options } => Some(options),
            QuestionKind::Text { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Radio { .. } => "radio",
            QuestionKind::Checkbox { .. } => "checkbox",
            QuestionKind::Dropdown { .. } => "dropdown",
            QuestionKind::Text { .. } => "text",
        }
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options()
            .map(|options| options.iter().any(|option| option.value == value))
            .unwrap_or(false)
    }
}

/// A question in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Conjunctive visibility predicate; empty means always visible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_if: Vec<Condition>,
}
