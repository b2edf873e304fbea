use serde_json::{Map, Value, json};

use crate::{
    engine::{Progress, Questionnaire},
    error::Result,
    spec::question::{ChoiceOption, QuestionKind},
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// More input is required.
    NeedInput,
    /// All visible questions are answered.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Describes a single question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: &'static str,
    pub visible: bool,
    pub options: Vec<ChoiceOption>,
    pub placeholder: Option<String>,
    pub current_value: Option<Value>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub catalog_id: String,
    pub catalog_title: String,
    pub catalog_version: String,
    pub status: RenderStatus,
    pub next_question_id: Option<String>,
    pub progress: Progress,
    pub help: Option<String>,
    pub questions: Vec<RenderQuestion>,
}

impl RenderPayload {
    pub fn question(&self, id: &str) -> Option<&RenderQuestion> {
        self.questions.iter().find(|question| question.id == id)
    }
}

/// Build the renderer payload from the questionnaire state.
pub fn build_render_payload(questionnaire: &Questionnaire) -> Result<RenderPayload> {
    let catalog = questionnaire.catalog();
    let visibility = questionnaire.visibility()?;
    let next_question_id = questionnaire
        .current_question()?
        .map(|question| question.id.clone());
    let progress = questionnaire.progress()?;

    let questions = catalog
        .questions
        .iter()
        .map(|question| RenderQuestion {
            id: question.id.clone(),
            title: question.title.clone(),
            description: question.description.clone(),
            kind: question.kind.label(),
            visible: visibility.get(&question.id).copied().unwrap_or(false),
            options: question.kind.options().map(<[_]>::to_vec).unwrap_or_default(),
            placeholder: match &question.kind {
                QuestionKind::Text {
                    placeholder,
                    placeholders,
                } => placeholder.clone().or_else(|| placeholders.first().cloned()),
                _ => None,
            },
            current_value: questionnaire
                .answers()
                .get(&question.id)
                .map(|answer| answer.to_json()),
        })
        .collect::<Vec<_>>();

    let status = if next_question_id.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    Ok(RenderPayload {
        catalog_id: catalog.id.clone(),
        catalog_title: catalog.title.clone(),
        catalog_version: catalog.version.clone(),
        status,
        next_question_id,
        progress,
        help: catalog.description.clone(),
        questions,
    })
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.id.clone()));
            map.insert("title".into(), Value::String(question.title.clone()));
            map.insert(
                "description".into(),
                question
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(question.kind.to_string()));
            if !question.options.is_empty() {
                map.insert(
                    "options".into(),
                    Value::Array(
                        question
                            .options
                            .iter()
                            .map(|option| json!({ "value": option.value, "label": option.label }))
                            .collect(),
                    ),
                );
            }
            if let Some(placeholder) = &question.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if let Some(current_value) = &question.current_value {
                map.insert("current_value".into(), current_value.clone());
            }
            map.insert("visible".into(), Value::Bool(question.visible));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "catalog_id": payload.catalog_id,
        "catalog_title": payload.catalog_title,
        "catalog_version": payload.catalog_version,
        "status": payload.status.as_str(),
        "next_question_id": payload.next_question_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "help": payload.help,
        "questions": questions,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Questionnaire: {} ({})",
        payload.catalog_title, payload.catalog_id
    ));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));
    if let Some(help) = &payload.help {
        lines.push(format!("Help: {}", help));
    }

    if let Some(next_question) = &payload.next_question_id {
        lines.push(format!("Next question: {}", next_question));
        if let Some(question) = payload.question(next_question) {
            lines.push(format!("  Title: {}", question.title));
            if let Some(description) = &question.description {
                lines.push(format!("  Description: {}", description));
            }
            for option in &question.options {
                lines.push(format!("  - {} ({})", option.label, option.value));
            }
            if let Some(value) = &question.current_value {
                lines.push(format!("  Current value: {}", value_to_display(value)));
            }
        }
    } else {
        lines.push("All visible questions are answered.".to_string());
    }

    lines.push("Visible questions:".to_string());
    for question in payload.questions.iter().filter(|question| question.visible) {
        let mut entry = format!(" - {} ({})", question.id, question.title);
        if let Some(current_value) = &question.current_value {
            entry.push_str(&format!(" = {}", value_to_display(current_value)));
        }
        lines.push(entry);
    }

    lines.join("\n")
}

pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
