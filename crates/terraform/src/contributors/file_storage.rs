use bucket_questionnaire::QuestionSummary;

use super::{
    FILE_STORAGE_BUCKET, FILE_STORAGE_BUCKET_STAGING, ModuleContributor, STAGING_BUCKET_NAME,
};
use crate::config::TerraformConfig;
use crate::module::{ModuleSpec, SymbolicExpr};

/// Plain S3 bucket for objects accessed through the API.
pub struct FileStorageBucket;

impl FileStorageBucket {
    fn settings(module: ModuleSpec, summary: &QuestionSummary) -> ModuleSpec {
        module
            .string("region", &summary.region)
            .flag("public_read", summary.shared)
            .flag("versioning", summary.has_feature("versioning"))
            .flag("encryption", summary.has_feature("encryption"))
            .flag("expire_noncurrent_versions", summary.has_feature("lifecycle"))
            .flag("cors_uploads", summary.has_feature("cors"))
    }
}

impl ModuleContributor for FileStorageBucket {
    fn name(&self) -> &'static str {
        "file-storage bucket"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if summary.web_app {
            return Vec::new();
        }
        let source = config.module_source("file-storage-bucket");
        let mut modules = vec![Self::settings(
            ModuleSpec::new(FILE_STORAGE_BUCKET, &source)
                .string("bucket_name", &summary.bucket_name),
            summary,
        )];
        if summary.staging {
            modules.push(Self::settings(
                ModuleSpec::new(FILE_STORAGE_BUCKET_STAGING, &source)
                    .expr("bucket_name", SymbolicExpr::interpolated(STAGING_BUCKET_NAME)),
                summary,
            ));
        }
        modules
    }
}
