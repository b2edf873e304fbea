use bucket_questionnaire::QuestionSummary;

use super::{DOMAIN, DOMAIN_RECORD, ModuleContributor, WEBAPP_BUCKET, serves_custom_domain};
use crate::config::TerraformConfig;
use crate::module::{ModuleSpec, SymbolicExpr};

/// Hosted zone for the custom domain.
pub struct DomainZone;

impl ModuleContributor for DomainZone {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if !serves_custom_domain(summary) {
            return Vec::new();
        }
        vec![
            ModuleSpec::new(DOMAIN, config.module_source("route53-zone"))
                .string("domain_name", &summary.bucket_name),
        ]
    }
}

/// Alias record pointing the domain at the webapp bucket endpoint.
pub struct DomainRecord;

impl ModuleContributor for DomainRecord {
    fn name(&self) -> &'static str {
        "domain record"
    }

    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
        if !serves_custom_domain(summary) {
            return Vec::new();
        }
        vec![
            ModuleSpec::new(DOMAIN_RECORD, config.module_source("route53-alias-record"))
                .expr("zone_id", SymbolicExpr::module_output(DOMAIN, "zone_id"))
                .expr("record_name", SymbolicExpr::var("domain_name"))
                .expr(
                    "alias_target",
                    SymbolicExpr::module_output(WEBAPP_BUCKET, "website_domain"),
                )
                .expr(
                    "alias_zone_id",
                    SymbolicExpr::module_output(WEBAPP_BUCKET, "hosted_zone_id"),
                ),
        ]
    }
}
