use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{QuestionnaireError, Result};
use crate::spec::question::{Expectation, Question};

const BUILTIN_CATALOG: &str = include_str!("../../data/bucket_questions.json");

/// Ordered, immutable list of questions plus catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionCatalog {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

impl QuestionCatalog {
    /// The bucket questionnaire shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: QuestionCatalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        tracing::debug!(
            catalog = %catalog.id,
            questions = catalog.questions.len(),
            "loaded question catalog"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub(crate) fn require(&self, id: &str) -> Result<&Question> {
        self.get(id)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(id.to_string()))
    }

    /// Checks the structural invariants the engine relies on.
    ///
    /// `show_if` clauses may only point backwards, so visibility can be
    /// evaluated in one pass and never cycles.
    pub fn validate(&self) -> Result<()> {
        let mut seen: BTreeMap<&str, &Question> = BTreeMap::new();
        let all_ids: BTreeSet<&str> = self
            .questions
            .iter()
            .map(|question| question.id.as_str())
            .collect();

        for question in &self.questions {
            if seen.contains_key(question.id.as_str()) {
                return Err(QuestionnaireError::InvalidCatalog(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }

            if let Some(options) = question.kind.options() {
                if options.is_empty() {
                    return Err(QuestionnaireError::InvalidCatalog(format!(
                        "question '{}' declares no options",
                        question.id
                    )));
                }
                let values: BTreeSet<&str> =
                    options.iter().map(|option| option.value.as_str()).collect();
                if values.len() != options.len() {
                    return Err(QuestionnaireError::InvalidCatalog(format!(
                        "question '{}' repeats an option value",
                        question.id
                    )));
                }
            }

            for condition in &question.show_if {
                let Some(target) = seen.get(condition.question_id.as_str()) else {
                    if all_ids.contains(condition.question_id.as_str()) {
                        return Err(QuestionnaireError::InvalidCatalog(format!(
                            "question '{}' depends on '{}', which is not asked before it",
                            question.id, condition.question_id
                        )));
                    }
                    return Err(QuestionnaireError::UnknownQuestion(
                        condition.question_id.clone(),
                    ));
                };
                if let Expectation::Equals { value } = &condition.expect
                    && target.kind.options().is_some()
                    && !target.kind.has_option(value)
                {
                    return Err(QuestionnaireError::InvalidOption {
                        question_id: target.id.clone(),
                        value: value.clone(),
                    });
                }
            }

            seen.insert(question.id.as_str(), question);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(questions: serde_json::Value) -> String {
        json!({
            "id": "test",
            "title": "Test",
            "version": "0.0.1",
            "questions": questions,
        })
        .to_string()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = QuestionCatalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.questions[0].id, "storageType");
        assert!(catalog.get("domain-name").is_some());
    }

    #[test]
    fn forward_reference_is_rejected() {
        let raw = catalog(json!([
            {
                "id": "a",
                "type": "text",
                "title": "A",
                "show_if": [{ "question_id": "b", "match": "not_empty" }]
            },
            { "id": "b", "type": "text", "title": "B" }
        ]));
        let err = QuestionCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, QuestionnaireError::InvalidCatalog(_)));
    }

    #[test]
    fn self_reference_is_rejected() {
        let raw = catalog(json!([
            {
                "id": "a",
                "type": "text",
                "title": "A",
                "show_if": [{ "question_id": "a", "match": "not_empty" }]
            }
        ]));
        assert!(matches!(
            QuestionCatalog::from_json(&raw),
            Err(QuestionnaireError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let raw = catalog(json!([
            {
                "id": "a",
                "type": "text",
                "title": "A",
                "show_if": [{ "question_id": "ghost", "match": "not_empty" }]
            }
        ]));
        assert!(matches!(
            QuestionCatalog::from_json(&raw),
            Err(QuestionnaireError::UnknownQuestion(id)) if id == "ghost"
        ));
    }

    #[test]
    fn condition_value_must_be_an_option() {
        let raw = catalog(json!([
            {
                "id": "a",
                "type": "radio",
                "title": "A",
                "options": [{ "value": "yes", "label": "Yes" }]
            },
            {
                "id": "b",
                "type": "text",
                "title": "B",
                "show_if": [{ "question_id": "a", "match": "equals", "value": "maybe" }]
            }
        ]));
        assert!(matches!(
            QuestionCatalog::from_json(&raw),
            Err(QuestionnaireError::InvalidOption { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = catalog(json!([
            { "id": "a", "type": "text", "title": "A" },
            { "id": "a", "type": "text", "title": "Again" }
        ]));
        assert!(matches!(
            QuestionCatalog::from_json(&raw),
            Err(QuestionnaireError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let raw = catalog(json!([{ "id": "a", "type": "slider", "title": "A" }]));
        assert!(matches!(
            QuestionCatalog::from_json(&raw),
            Err(QuestionnaireError::CatalogParse(_))
        ));
    }
}
