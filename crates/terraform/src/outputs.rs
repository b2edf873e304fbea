use bucket_questionnaire::QuestionSummary;

use crate::contributors::{
    FILE_STORAGE_BUCKET, FILE_STORAGE_BUCKET_STAGING, WEBAPP_BUCKET, WEBAPP_BUCKET_STAGING,
};
use crate::module::SymbolicExpr;

/// One `output` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: String,
    pub description: String,
    pub value: SymbolicExpr,
}

impl OutputSpec {
    fn new(name: &str, description: &str, value: SymbolicExpr) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            value,
        }
    }
}

/// Outputs telling the user where the provisioned bucket can be reached.
pub fn outputs_for(summary: &QuestionSummary) -> Vec<OutputSpec> {
    let mut outputs = Vec::new();
    if summary.web_app {
        if summary.has_custom_domain() {
            outputs.push(OutputSpec::new(
                "website_url",
                "URL the webapp is served on",
                SymbolicExpr::interpolated("https://${var.bucket_name}"),
            ));
        } else {
            outputs.push(OutputSpec::new(
                "website_endpoint",
                "S3 website endpoint of the webapp bucket",
                SymbolicExpr::module_output(WEBAPP_BUCKET, "website_endpoint"),
            ));
        }
        if summary.staging {
            outputs.push(OutputSpec::new(
                "staging_website_endpoint",
                "S3 website endpoint of the staging bucket",
                SymbolicExpr::module_output(WEBAPP_BUCKET_STAGING, "website_endpoint"),
            ));
        }
    } else {
        outputs.push(OutputSpec::new(
            "bucket_domain_name",
            "Regional domain name of the storage bucket",
            SymbolicExpr::module_output(FILE_STORAGE_BUCKET, "bucket_regional_domain_name"),
        ));
        if summary.staging {
            outputs.push(OutputSpec::new(
                "staging_bucket_domain_name",
                "Regional domain name of the staging bucket",
                SymbolicExpr::module_output(
                    FILE_STORAGE_BUCKET_STAGING,
                    "bucket_regional_domain_name",
                ),
            ));
        }
    }
    outputs
}
