use bucket_questionnaire::{
    ChoiceOption, Progress, Question, QuestionKind, Questionnaire, QuestionnaireError,
    RenderPayload, RenderStatus, render_text,
};
use bucket_terraform::TerraformPackage;

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: status, visible questions, error details, help text.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and state once the questionnaire yields a question.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_answers_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self, payload: &RenderPayload) {
        if self.header_printed {
            return;
        }
        println!("{}", payload.catalog_title);
        if let Some(help) = &payload.help {
            println!("{}", help);
        }
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &RenderPayload) {
        if self.verbosity.is_verbose() {
            println!("{}", render_text(payload));
        } else if payload.status == RenderStatus::NeedInput
            && payload.questions.iter().all(|question| !question.visible)
        {
            println!("No visible questions are available; check the catalog conditions.");
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.total > 0 {
            format!("{}/{} {}", prompt.index, prompt.total, prompt.title)
        } else {
            format!("{} {}", prompt.index, prompt.title)
        };
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        for choice in &prompt.choices {
            println!("  {}", choice);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_rejected(&self, error: &QuestionnaireError) {
        eprintln!("Answer rejected: {}", error);
    }

    pub fn show_completion(&self, questionnaire: &Questionnaire, package: &TerraformPackage) {
        println!("Done ✅");
        println!("{}", package.description);
        if self.show_answers_json {
            match serde_json::to_string_pretty(&questionnaire.answers().to_json()) {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => eprintln!("Failed to serialize answers to JSON: {}", err),
            }
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub description: Option<String>,
    pub hint: Option<String>,
    pub choices: Vec<String>,
}

impl PromptContext {
    pub fn new(question: &Question, progress: &Progress) -> Self {
        let choices = question
            .kind
            .options()
            .map(|options| {
                options
                    .iter()
                    .enumerate()
                    .map(|(position, option)| {
                        format!("{}) {} [{}]", position + 1, option.label, option.value)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            index: (progress.answered + 1).max(1),
            total: progress.total,
            title: question.title.clone(),
            description: question.description.clone(),
            hint: hint(&question.kind),
            choices,
        }
    }
}

fn hint(kind: &QuestionKind) -> Option<String> {
    match kind {
        QuestionKind::Radio { .. } | QuestionKind::Dropdown { .. } => {
            Some("(pick one by number, value or label)".to_string())
        }
        QuestionKind::Checkbox { .. } => Some("(comma separated, at least one)".to_string()),
        QuestionKind::Text { placeholder, .. } => {
            placeholder.as_ref().map(|example| format!("(e.g. {})", example))
        }
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

/// Resolves one typed token against the options of a choice question.
///
/// Accepts the 1-based position, the option value or its label, and the
/// usual yes/no spellings for `true`/`false` options.
pub fn resolve_option<'a>(
    options: &'a [ChoiceOption],
    raw: &str,
) -> Result<&'a ChoiceOption, AnswerParseError> {
    let raw = raw.trim();
    if let Ok(position) = raw.parse::<usize>()
        && let Some(option) = position.checked_sub(1).and_then(|index| options.get(index))
    {
        return Ok(option);
    }
    let boolean = match raw.to_lowercase().as_str() {
        "yes" | "y" => Some("true"),
        "no" | "n" => Some("false"),
        _ => None,
    };
    options
        .iter()
        .find(|option| {
            option.value.eq_ignore_ascii_case(raw)
                || option.label.eq_ignore_ascii_case(raw)
                || boolean == Some(option.value.as_str())
        })
        .ok_or_else(|| {
            let allowed = options
                .iter()
                .map(|option| option.value.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            AnswerParseError::new(
                format!("Choose one of: {}.", allowed),
                Some(format!("allowed values: {}, or 1-{}", allowed, options.len())),
            )
        })
}
