//! Independent generators that turn a [`QuestionSummary`] into module blocks.
//!
//! Contributors never look at each other's output. When one module needs a
//! value from another it writes a [`SymbolicExpr`](crate::SymbolicExpr) such as
//! `module.domain.zone_id` and leaves the wiring to Terraform.

mod certificate;
mod dns;
mod file_storage;
mod redirect;
mod web_app;

use bucket_questionnaire::QuestionSummary;

use crate::config::TerraformConfig;
use crate::module::ModuleSpec;

pub use certificate::Certificate;
pub use dns::{DomainRecord, DomainZone};
pub use file_storage::FileStorageBucket;
pub use redirect::RedirectBucket;
pub use web_app::WebAppBucket;

pub const WEBAPP_BUCKET: &str = "webapp_bucket";
pub const WEBAPP_BUCKET_STAGING: &str = "webapp_bucket_staging";
pub const FILE_STORAGE_BUCKET: &str = "file_storage_bucket";
pub const FILE_STORAGE_BUCKET_STAGING: &str = "file_storage_bucket_staging";
pub const DOMAIN: &str = "domain";
pub const DOMAIN_RECORD: &str = "domain_record";
pub const CERTIFICATE: &str = "certificate";
pub const REDIRECT_BUCKET: &str = "redirect_bucket";

/// Name template of staging buckets.
pub(crate) const STAGING_BUCKET_NAME: &str = "staging-${var.bucket_name}";

pub trait ModuleContributor {
    fn name(&self) -> &'static str;

    /// Modules this contributor adds for `summary`; empty when its
    /// precondition does not hold.
    fn contribute(&self, summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec>;
}

/// All contributors in emission order.
pub fn default_contributors() -> Vec<Box<dyn ModuleContributor>> {
    vec![
        Box::new(WebAppBucket),
        Box::new(FileStorageBucket),
        Box::new(DomainZone),
        Box::new(DomainRecord),
        Box::new(Certificate),
        Box::new(RedirectBucket),
    ]
}

/// Runs every contributor in order and concatenates their modules.
pub fn collect_modules(summary: &QuestionSummary, config: &TerraformConfig) -> Vec<ModuleSpec> {
    let mut modules = Vec::new();
    for contributor in default_contributors() {
        let contributed = contributor.contribute(summary, config);
        tracing::debug!(
            contributor = contributor.name(),
            modules = contributed.len(),
            "collected modules"
        );
        modules.extend(contributed);
    }
    modules
}

/// Domain-backed modules only make sense for a webapp served on its own name.
pub(crate) fn serves_custom_domain(summary: &QuestionSummary) -> bool {
    summary.web_app && summary.has_custom_domain()
}
