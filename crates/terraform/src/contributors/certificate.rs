use bucket_questionnaire::QuestionSummary;

use super::{CERTIFICATE, DOMAIN, ModuleContributor, serves_custom_domain};
use crate::config::TerraformConfig;
use crate::module::{ModuleSpec, SymbolicExpr};

/// Edge-served certificates must be issued in us-east-1.
const CERTIFICATE_REGION: &str = "us-east-1";

/// DNS-validated TLS certificate for the custom domain.
pub struct Certificate;

impl ModuleContributor for Certificate {
    fn name(&self) -> &'static str {
        "certificate"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if !serves_custom_domain(summary) {
            return Vec::new();
        }
        let mut alternative_names = Vec::new();
        if summary.static_page {
            alternative_names.push(format!("www.{}", summary.bucket_name));
        }
        vec![
            ModuleSpec::new(CERTIFICATE, config.module_source("acm-certificate"))
                .string("domain_name", &summary.bucket_name)
                .list("subject_alternative_names", alternative_names)
                .string("certificate_region", CERTIFICATE_REGION)
                .expr("zone_id", SymbolicExpr::module_output(DOMAIN, "zone_id")),
        ]
    }
}
