use bucket_questionnaire::QuestionSummary;

use super::{DOMAIN, ModuleContributor, REDIRECT_BUCKET, WEBAPP_BUCKET, serves_custom_domain};
use crate::config::TerraformConfig;
use crate::module::{ModuleSpec, SymbolicExpr};

/// `www.` bucket redirecting every request to the apex domain.
pub struct RedirectBucket;

impl ModuleContributor for RedirectBucket {
    fn name(&self) -> &'static str {
        "redirect bucket"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if !(serves_custom_domain(summary) && summary.static_page) {
            return Vec::new();
        }
        vec![
            ModuleSpec::new(REDIRECT_BUCKET, config.module_source("redirect-bucket"))
                .expr(
                    "bucket_name",
                    SymbolicExpr::interpolated("www.${var.bucket_name}"),
                )
                .string("region", &summary.region)
                .expr(
                    "redirect_host",
                    SymbolicExpr::module_output(WEBAPP_BUCKET, "bucket_name"),
                )
                .string("redirect_protocol", "https")
                .expr("zone_id", SymbolicExpr::module_output(DOMAIN, "zone_id")),
        ]
    }
}
