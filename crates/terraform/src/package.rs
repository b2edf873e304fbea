use bucket_questionnaire::QuestionSummary;

use crate::assembler::assemble;
use crate::config::TerraformConfig;
use crate::contributors::collect_modules;
use crate::description::describe;
use crate::document::ConfigurationDocument;
use crate::error::Result;
use crate::outputs::outputs_for;

const HEREDOC_MARKER: &str = "EOF";

/// Everything shown to the user once the questionnaire is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformPackage {
    pub bucket_name: String,
    pub main_tf: ConfigurationDocument,
    pub description: String,
}

impl TerraformPackage {
    /// Shell script that writes `main.tf` into a fresh directory and applies it.
    pub fn run_script(&self) -> Vec<String> {
        let mut lines = vec![
            format!("mkdir -p {dir} && cd {dir}", dir = shell_quote(&self.bucket_name)),
            format!("cat > main.tf << '{HEREDOC_MARKER}'"),
        ];
        lines.extend(self.main_tf.lines().iter().cloned());
        lines.push(HEREDOC_MARKER.to_string());
        lines.push("terraform init".to_string());
        lines.push("terraform apply".to_string());
        lines
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Builds the document and its description for a finished questionnaire.
pub fn build_package(
    summary: &QuestionSummary,
    config: &TerraformConfig,
) -> Result<TerraformPackage> {
    let modules = collect_modules(summary, config);
    let outputs = outputs_for(summary);
    let main_tf = assemble(&modules, &outputs)?;
    let description = describe(summary)?;
    tracing::info!(
        bucket = %summary.bucket_name,
        modules = modules.len(),
        "built terraform package"
    );
    Ok(TerraformPackage {
        bucket_name: summary.bucket_name.clone(),
        main_tf,
        description,
    })
}
