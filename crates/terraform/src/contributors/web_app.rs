use bucket_questionnaire::QuestionSummary;

use super::{ModuleContributor, STAGING_BUCKET_NAME, WEBAPP_BUCKET, WEBAPP_BUCKET_STAGING};
use crate::config::TerraformConfig;
use crate::module::{ModuleSpec, SymbolicExpr};

/// S3 bucket configured for static website hosting.
pub struct WebAppBucket;

impl WebAppBucket {
    fn settings(module: ModuleSpec, summary: &QuestionSummary) -> ModuleSpec {
        // Single page apps route client side, so every miss serves the app.
        let error_document = if summary.static_page {
            "error.html"
        } else {
            "index.html"
        };
        module
            .string("region", &summary.region)
            .flag("public_read", summary.shared)
            .string("index_document", "index.html")
            .string("error_document", error_document)
    }
}

impl ModuleContributor for WebAppBucket {
    fn name(&self) -> &'static str {
        "web-app bucket"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if !summary.web_app {
            return Vec::new();
        }
        let source = config.module_source("webapp-bucket");
        let mut modules = vec![Self::settings(
            ModuleSpec::new(WEBAPP_BUCKET, &source).string("bucket_name", &summary.bucket_name),
            summary,
        )];
        if summary.staging {
            modules.push(Self::settings(
                ModuleSpec::new(WEBAPP_BUCKET_STAGING, &source)
                    .expr("bucket_name", SymbolicExpr::interpolated(STAGING_BUCKET_NAME)),
                summary,
            ));
        }
        modules
    }
}
