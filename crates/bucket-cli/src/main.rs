mod wizard;

use bucket_questionnaire::{
    AnswerValue, Question, QuestionCatalog, QuestionKind, QuestionSummary, Questionnaire,
    build_render_payload, render_json_ui,
};
use bucket_terraform::config::{MODULE_REF_ENV, MODULE_SOURCE_ENV};
use bucket_terraform::{TerraformConfig, TerraformPackage, build_package};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wizard::{AnswerParseError, PromptContext, Verbosity, WizardPresenter, resolve_option};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Questionnaire-driven Terraform for S3 bucket deployments",
    long_about = "Asks how a bucket will be used and prints the Terraform main.tf, a description and a run script"
)]
struct Cli {
    /// Question catalog JSON used instead of the built-in one.
    #[arg(long, global = true, value_name = "CATALOG")]
    catalog: Option<PathBuf>,
    /// JSON file with the Terraform module source settings.
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the questionnaire interactively in a text shell.
    Wizard {
        /// Show verbose output (statuses, visible questions, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit answer JSON once the questionnaire is complete.
        #[arg(long)]
        answers_json: bool,
        /// Render output mode for the wizard display.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Non-interactive generation from an answers or summary JSON file.
    Generate {
        /// JSON object mapping question ids to answers.
        #[arg(
            long,
            value_name = "ANSWERS",
            required_unless_present = "summary",
            conflicts_with = "summary"
        )]
        answers: Option<PathBuf>,
        /// JSON question summary, skipping the questionnaire entirely.
        #[arg(long, value_name = "SUMMARY")]
        summary: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the question catalog as JSON.
    Catalog,
    /// Print the JSON schema of question catalogs.
    Schema,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write main.tf to this file instead of printing it.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Overwrite the output file if present.
    #[arg(long)]
    force: bool,
    /// Print the shell script that writes main.tf and runs terraform.
    #[arg(long)]
    script: bool,
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            verbose,
            answers_json,
            format,
            output,
        } => run_wizard(
            cli.catalog.as_deref(),
            cli.config.as_deref(),
            Verbosity::from_verbose(verbose),
            answers_json,
            format,
            &output,
        ),
        Command::Generate {
            answers,
            summary,
            output,
        } => run_generate(
            cli.catalog.as_deref(),
            cli.config.as_deref(),
            answers.as_deref(),
            summary.as_deref(),
            &output,
        ),
        Command::Catalog => run_catalog(cli.catalog.as_deref()),
        Command::Schema => run_schema(),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "bucket_served=info,bucket_terraform=info,bucket_questionnaire=info".into()
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(path: Option<&Path>) -> CliResult<QuestionCatalog> {
    let catalog = match path {
        Some(path) => QuestionCatalog::from_json(&fs::read_to_string(path)?)?,
        None => QuestionCatalog::builtin()?,
    };
    tracing::debug!(catalog = %catalog.id, questions = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// File settings first, then the environment on top.
fn resolve_config(path: Option<&Path>) -> CliResult<TerraformConfig> {
    let config = match path {
        Some(path) => TerraformConfig::from_file(path)?,
        None => TerraformConfig::default(),
    };
    Ok(config.with_overrides(env::var(MODULE_SOURCE_ENV).ok(), env::var(MODULE_REF_ENV).ok()))
}

fn run_catalog(catalog_path: Option<&Path>) -> CliResult<()> {
    let catalog = load_catalog(catalog_path)?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(QuestionCatalog);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_generate(
    catalog_path: Option<&Path>,
    config_path: Option<&Path>,
    answers_path: Option<&Path>,
    summary_path: Option<&Path>,
    output: &OutputArgs,
) -> CliResult<()> {
    let config = resolve_config(config_path)?;
    let summary = match (summary_path, answers_path) {
        (Some(path), _) => {
            serde_json::from_str::<QuestionSummary>(&fs::read_to_string(path)?)?.normalized()
        }
        (None, Some(path)) => {
            let mut questionnaire = Questionnaire::new(load_catalog(catalog_path)?);
            record_answers_file(&mut questionnaire, path)?;
            QuestionSummary::from_questionnaire(&questionnaire)?
        }
        (None, None) => return Err("either --answers or --summary is required".into()),
    };
    let package = build_package(&summary, &config)?;
    emit_package(&package, output)
}

fn record_answers_file(questionnaire: &mut Questionnaire, path: &Path) -> CliResult<()> {
    let answers: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let answers = answers
        .as_object()
        .ok_or_else(|| format!("{} must hold a JSON object of answers", path.display()))?;
    for (question_id, value) in answers {
        questionnaire.record_json(question_id, value)?;
    }
    Ok(())
}

fn emit_package(package: &TerraformPackage, output: &OutputArgs) -> CliResult<()> {
    if let Some(out) = &output.out {
        write_document(out, &package.main_tf.to_text(), output.force)?;
        println!("Wrote {}", out.display());
        println!("# {}", package.description);
    } else if !output.script {
        println!("# {}", package.description);
        print!("{}", package.main_tf);
    }
    if output.script {
        if output.out.is_none() {
            println!("# {}", package.description);
        }
        for line in package.run_script() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn write_document(path: &Path, contents: &str, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists; rerun with --force to overwrite",
            path.display()
        )
        .into());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "wrote configuration document");
    Ok(())
}

fn run_wizard(
    catalog_path: Option<&Path>,
    config_path: Option<&Path>,
    verbosity: Verbosity,
    answers_json: bool,
    format: RenderMode,
    output: &OutputArgs,
) -> CliResult<()> {
    let config = resolve_config(config_path)?;
    let mut questionnaire = Questionnaire::new(load_catalog(catalog_path)?);
    let mut presenter = WizardPresenter::new(verbosity, answers_json);

    loop {
        let payload = build_render_payload(&questionnaire)?;
        if let RenderMode::Json = format {
            println!(
                "JSON UI:\n{}",
                serde_json::to_string_pretty(&render_json_ui(&payload))?
            );
        }
        presenter.show_header(&payload);
        presenter.show_status(&payload);

        let Some(question_id) = payload.next_question_id.as_deref() else {
            break;
        };
        let question = questionnaire
            .catalog()
            .get(question_id)
            .ok_or_else(|| format!("question '{}' not found", question_id))?
            .clone();
        let prompt = PromptContext::new(&question, &payload.progress);
        let answer = prompt_question(&prompt, &question, &presenter)?;
        if let Err(err) = questionnaire.record_answer(&question.id, answer) {
            presenter.show_rejected(&err);
        }
    }

    let summary = QuestionSummary::from_questionnaire(&questionnaire)?;
    let package = build_package(&summary, &config)?;
    presenter.show_completion(&questionnaire, &package);
    emit_package(&package, output)
}

fn prompt_question(
    prompt: &PromptContext,
    question: &Question,
    presenter: &WizardPresenter,
) -> CliResult<AnswerValue> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err("input ended before the questionnaire was complete".into());
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("wizard aborted by user".into());
        }

        match parse_answer(question, trimmed) {
            Ok(value) => return Ok(value),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn parse_answer(question: &Question, raw: &str) -> Result<AnswerValue, AnswerParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AnswerParseError::new(
            "This question requires an answer.",
            None,
        ));
    }

    match &question.kind {
        QuestionKind::Radio { options } | QuestionKind::Dropdown { options } => {
            resolve_option(options, raw).map(|option| AnswerValue::choice(&option.value))
        }
        QuestionKind::Checkbox { options } => raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| resolve_option(options, token).map(|option| option.value.clone()))
            .collect::<Result<Vec<_>, _>>()
            .and_then(|values| {
                if values.is_empty() {
                    Err(AnswerParseError::new(
                        "Select at least one option.",
                        Some("comma separated option values".to_string()),
                    ))
                } else {
                    Ok(AnswerValue::choices(values))
                }
            }),
        QuestionKind::Text { .. } => Ok(AnswerValue::text(raw)),
    }
}
