use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::answers::Answer;
use crate::engine::Questionnaire;
use crate::error::{QuestionnaireError, Result};
use crate::spec::question::QuestionKind;

/// Question ids the summary projection reads.
pub mod ids {
    pub const STORAGE_TYPE: &str = "storageType";
    pub const WEBAPP_IS_STATIC: &str = "webappIsStatic";
    pub const STAGING_ENV: &str = "stagingEnv";
    pub const ACL_PUBLIC: &str = "aclPublic";
    pub const FILE_FEATURES: &str = "fileFeatures";
    pub const DOMAIN_NAME: &str = "domain-name";
    pub const REGION: &str = "region";
}

pub const STORAGE_WEBAPP: &str = "webapp";
pub const TRUE_VALUE: &str = "true";

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$")
        .expect("hostname pattern is valid")
});

/// Typed view of a completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub web_app: bool,
    pub staging: bool,
    pub shared: bool,
    pub static_page: bool,
    pub bucket_name: String,
    pub region: String,
    #[serde(default)]
    pub file_features: Vec<String>,
}

impl QuestionSummary {
    /// Projects the answers of a complete questionnaire.
    pub fn from_questionnaire(questionnaire: &Questionnaire) -> Result<Self> {
        if let Some(question) = questionnaire.current_question()? {
            return Err(QuestionnaireError::Incomplete(question.id.clone()));
        }
        let projection = Projection { questionnaire };
        Ok(Self {
            web_app: projection.selected(ids::STORAGE_TYPE, STORAGE_WEBAPP)?,
            staging: projection.selected(ids::STAGING_ENV, TRUE_VALUE)?,
            shared: projection.selected(ids::ACL_PUBLIC, TRUE_VALUE)?,
            static_page: projection.selected(ids::WEBAPP_IS_STATIC, TRUE_VALUE)?,
            bucket_name: projection.text(ids::DOMAIN_NAME)?,
            region: projection.choice(ids::REGION)?,
            file_features: projection.selections(ids::FILE_FEATURES)?,
        })
    }

    /// Applies the text normalisation answers go through, for summaries read
    /// from JSON.
    pub fn normalized(mut self) -> Self {
        self.bucket_name = self.bucket_name.trim().to_lowercase();
        self.region = self.region.trim().to_string();
        self
    }

    /// Whether the bucket name is a dotted host name that should be served on
    /// its own domain.
    pub fn has_custom_domain(&self) -> bool {
        HOSTNAME.is_match(&self.bucket_name)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.file_features.iter().any(|value| value == feature)
    }
}

struct Projection<'a> {
    questionnaire: &'a Questionnaire,
}

impl Projection<'_> {
    fn unsupported(
        &self,
        question_id: &str,
        kind: &QuestionKind,
        context: &'static str,
    ) -> QuestionnaireError {
        QuestionnaireError::UnsupportedQuestionType {
            question_id: question_id.to_string(),
            kind: kind.label(),
            context,
        }
    }

    fn kind(&self, question_id: &str) -> Result<&QuestionKind> {
        self.questionnaire
            .catalog()
            .get(question_id)
            .map(|question| &question.kind)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(question_id.to_string()))
    }

    fn selected(&self, question_id: &str, value: &str) -> Result<bool> {
        match self.kind(question_id)? {
            QuestionKind::Radio { .. }
            | QuestionKind::Dropdown { .. }
            | QuestionKind::Checkbox { .. } => {
                if !self.questionnaire.is_visible(question_id)? {
                    return Ok(false);
                }
                Ok(self
                    .questionnaire
                    .answers()
                    .get(question_id)
                    .map(|answer| answer.holds(value))
                    .unwrap_or(false))
            }
            kind @ QuestionKind::Text { .. } => {
                Err(self.unsupported(question_id, kind, "a yes/no selection"))
            }
        }
    }

    /// Required answers must sit on a visible question.
    fn require_visible(&self, question_id: &str) -> Result<()> {
        if self.questionnaire.is_visible(question_id)? {
            Ok(())
        } else {
            Err(QuestionnaireError::HiddenQuestion(question_id.to_string()))
        }
    }

    fn choice(&self, question_id: &str) -> Result<String> {
        match self.kind(question_id)? {
            QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. } => {
                self.require_visible(question_id)?;
                match self.questionnaire.answers().get(question_id) {
                    Some(Answer::Choice(value)) => Ok(value.clone()),
                    _ => Err(QuestionnaireError::Incomplete(question_id.to_string())),
                }
            }
            kind => Err(self.unsupported(question_id, kind, "a single choice")),
        }
    }

    fn text(&self, question_id: &str) -> Result<String> {
        match self.kind(question_id)? {
            QuestionKind::Text { .. } => {
                self.require_visible(question_id)?;
                match self.questionnaire.answers().get(question_id) {
                    Some(Answer::Text(value)) => Ok(value.clone()),
                    _ => Err(QuestionnaireError::Incomplete(question_id.to_string())),
                }
            }
            kind => Err(self.unsupported(question_id, kind, "a text answer")),
        }
    }

    fn selections(&self, question_id: &str) -> Result<Vec<String>> {
        match self.kind(question_id)? {
            QuestionKind::Checkbox { .. } => {
                if !self.questionnaire.is_visible(question_id)? {
                    return Ok(Vec::new());
                }
                match self.questionnaire.answers().get(question_id) {
                    Some(Answer::Selections(values)) => Ok(values.clone()),
                    _ => Ok(Vec::new()),
                }
            }
            kind => Err(self.unsupported(question_id, kind, "a set of selections")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(bucket_name: &str) -> QuestionSummary {
        QuestionSummary {
            web_app: true,
            staging: false,
            shared: true,
            static_page: true,
            bucket_name: bucket_name.into(),
            region: "us-east-1".into(),
            file_features: Vec::new(),
        }
    }

    #[test]
    fn dotted_names_are_custom_domains() {
        assert!(summary("example.com").has_custom_domain());
        assert!(summary("assets.example.org").has_custom_domain());
        assert!(!summary("my-files").has_custom_domain());
        assert!(!summary("bad..name").has_custom_domain());
        assert!(!summary("-dash.com").has_custom_domain());
    }

    #[test]
    fn normalized_summary_matches_answer_text() {
        let summary = summary("  Example.COM ").normalized();
        assert_eq!(summary.bucket_name, "example.com");
        assert!(summary.has_custom_domain());
    }
}
