use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::Value;
use std::fs;

const WEBAPP_ANSWERS: &str = include_str!("fixtures/webapp_answers.json");
const FILES_SUMMARY: &str = include_str!("fixtures/files_summary.json");
const INCOMPLETE_ANSWERS: &str = include_str!("fixtures/incomplete_answers.json");
const GIT_MODULES: &str = include_str!("fixtures/git_modules.json");
const MIXED_CASE_SUMMARY: &str = include_str!("fixtures/mixed_case_summary.json");

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn bucket_served() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bucket-served")?;
    cmd.env_remove("BUCKET_SERVED_MODULE_SOURCE")
        .env_remove("BUCKET_SERVED_MODULE_REF")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn generate_writes_main_tf_from_answers() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(WEBAPP_ANSWERS)?;
    let out = workspace.child("deploy").child("main.tf");

    let stdout = stdout_of(
        bucket_served()?
            .arg("generate")
            .arg("--answers")
            .arg(answers.path())
            .arg("--out")
            .arg(out.path()),
    );
    assert!(stdout.contains("Wrote"));
    assert!(stdout.contains("# A public webapp bucket"));

    let main_tf = fs::read_to_string(out.path())?;
    assert!(main_tf.starts_with("variable \"bucket_name\" { default = \"example.com\" }\n"));
    assert!(main_tf.contains("module \"webapp_bucket\" {"));
    assert!(main_tf.contains("module \"certificate\" {"));
    assert!(!main_tf.contains("file_storage_bucket"));
    assert!(main_tf.ends_with("}\n"));
    Ok(())
}

#[test]
fn generate_refuses_to_overwrite_without_force() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(WEBAPP_ANSWERS)?;
    let out = workspace.child("main.tf");
    out.write_str("# keep me\n")?;

    bucket_served()?
        .arg("generate")
        .arg("--answers")
        .arg(answers.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(out.path())?, "# keep me\n");

    bucket_served()?
        .arg("generate")
        .arg("--answers")
        .arg(answers.path())
        .arg("--out")
        .arg(out.path())
        .arg("--force")
        .assert()
        .success();
    assert!(fs::read_to_string(out.path())?.contains("module \"webapp_bucket\" {"));
    Ok(())
}

#[test]
fn generate_from_summary_prints_document() -> TestResult {
    let workspace = TempDir::new()?;
    let summary = workspace.child("summary.json");
    summary.write_str(FILES_SUMMARY)?;

    let stdout = stdout_of(
        bucket_served()?
            .arg("generate")
            .arg("--summary")
            .arg(summary.path()),
    );
    assert!(stdout.starts_with("# A private file storage bucket"));
    assert!(stdout.contains("module \"file_storage_bucket_staging\" {"));
    assert!(stdout.contains("variable \"expire_noncurrent_versions\" { default = true }"));
    assert!(stdout.contains("output \"staging_bucket_domain_name\" {"));
    Ok(())
}

#[test]
fn generate_normalizes_summary_bucket_name() -> TestResult {
    let workspace = TempDir::new()?;
    let summary = workspace.child("summary.json");
    summary.write_str(MIXED_CASE_SUMMARY)?;

    let stdout = stdout_of(
        bucket_served()?
            .arg("generate")
            .arg("--summary")
            .arg(summary.path()),
    );
    assert!(stdout.contains("variable \"bucket_name\" { default = \"example.com\" }"));
    assert!(stdout.contains("module \"certificate\" {"));
    assert!(stdout.contains("module \"redirect_bucket\" {"));
    Ok(())
}

#[test]
fn library_logs_are_shown_by_default() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(WEBAPP_ANSWERS)?;

    let output = bucket_served()?
        .arg("generate")
        .arg("--answers")
        .arg(answers.path())
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("built terraform package"));
    Ok(())
}

#[test]
fn generate_rejects_incomplete_answers() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(INCOMPLETE_ANSWERS)?;

    bucket_served()?
        .arg("generate")
        .arg("--answers")
        .arg(answers.path())
        .assert()
        .failure();
    Ok(())
}

#[test]
fn generate_requires_an_input() -> TestResult {
    bucket_served()?.arg("generate").assert().failure();
    Ok(())
}

#[test]
fn environment_overrides_config_file() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(WEBAPP_ANSWERS)?;
    let config = workspace.child("modules.json");
    config.write_str(GIT_MODULES)?;

    let stdout = stdout_of(
        bucket_served()?
            .env("BUCKET_SERVED_MODULE_REF", "v3.0.0")
            .arg("--config")
            .arg(config.path())
            .arg("generate")
            .arg("--answers")
            .arg(answers.path()),
    );
    assert!(stdout.contains(
        "\"git::https://git.example.com/terraform-modules.git//webapp-bucket?ref=v3.0.0\""
    ));
    assert!(!stdout.contains("v2.0.0"));
    Ok(())
}

#[test]
fn script_wraps_document_in_heredoc() -> TestResult {
    let workspace = TempDir::new()?;
    let answers = workspace.child("answers.json");
    answers.write_str(WEBAPP_ANSWERS)?;

    let stdout = stdout_of(
        bucket_served()?
            .arg("generate")
            .arg("--answers")
            .arg(answers.path())
            .arg("--script"),
    );
    let lines = stdout.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("# A public webapp bucket"));
    assert_eq!(lines[1], "mkdir -p 'example.com' && cd 'example.com'");
    assert_eq!(lines[2], "cat > main.tf << 'EOF'");
    assert_eq!(&lines[lines.len() - 2..], &["terraform init", "terraform apply"]);
    Ok(())
}

#[test]
fn catalog_prints_valid_json() -> TestResult {
    let stdout = stdout_of(bucket_served()?.arg("catalog"));
    let catalog: Value = serde_json::from_str(&stdout)?;
    assert_eq!(catalog["id"], "bucket-served");
    assert_eq!(catalog["questions"].as_array().map(Vec::len), Some(7));
    assert_eq!(catalog["questions"][0]["type"], "radio");
    Ok(())
}

#[test]
fn schema_describes_catalogs() -> TestResult {
    let stdout = stdout_of(bucket_served()?.arg("schema"));
    let schema: Value = serde_json::from_str(&stdout)?;
    assert!(schema["properties"]["questions"].is_object());
    Ok(())
}

#[test]
fn wizard_completes_from_piped_stdin() -> TestResult {
    let workspace = TempDir::new()?;
    let out = workspace.child("main.tf");
    let answers = ["1", "y", "n", "yes", "example.com", "us-east-1"];

    let stdout = stdout_of(
        bucket_served()?
            .arg("wizard")
            .arg("--out")
            .arg(out.path())
            .write_stdin(format!("{}\n", answers.join("\n"))),
    );
    assert!(stdout.contains("Done"));
    assert!(stdout.contains("A public webapp bucket serving a static page"));
    let main_tf = fs::read_to_string(out.path())?;
    assert!(main_tf.contains("module \"redirect_bucket\" {"));
    Ok(())
}

#[test]
fn wizard_retries_invalid_answers() -> TestResult {
    let answers = ["tape", "files", "n", "n", "", "2,cors", "my-files", "1"];
    let output = bucket_served()?
        .arg("wizard")
        .arg("--answers-json")
        .write_stdin(format!("{}\n", answers.join("\n")))
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Invalid answer"));
    assert!(stdout.contains("module \"file_storage_bucket\" {"));
    assert!(stdout.contains("\"fileFeatures\": ["));
    Ok(())
}

#[test]
fn wizard_fails_when_input_ends_early() -> TestResult {
    bucket_served()?
        .arg("wizard")
        .write_stdin("1\ny\n")
        .assert()
        .failure();
    Ok(())
}
