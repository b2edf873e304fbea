use bucket_questionnaire::QuestionSummary;
use handlebars::Handlebars;
use serde_json::json;

use crate::error::Result;

const DESCRIPTION_TEMPLATE: &str = "\
{{#if web_app}}A {{access}} webapp bucket\
{{#if static_page}} serving a static page{{else}} serving a single page app{{/if}}\
{{else}}A {{access}} file storage bucket{{#if features}} with {{features}}{{/if}}{{/if}} \
named {{bucket_name}} in {{region}}.\
{{#if staging}} A staging bucket with the same settings is created next to it.{{/if}}\
{{#if custom_domain}} It is served on {{bucket_name}} from its own hosted zone with a TLS certificate\
{{#if redirect}}, and www.{{bucket_name}} redirects to it{{/if}}.{{/if}}";

fn feature_label(feature: &str) -> &str {
    match feature {
        "versioning" => "versioning",
        "encryption" => "server side encryption",
        "lifecycle" => "expiring old versions",
        "cors" => "browser uploads",
        other => other,
    }
}

/// Joins labels as `a`, `a and b`, `a, b and c`.
fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

/// Human-readable summary of the architecture the document provisions.
pub fn describe(summary: &QuestionSummary) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars.register_template_string("description", DESCRIPTION_TEMPLATE)?;

    let labels = summary
        .file_features
        .iter()
        .map(|feature| feature_label(feature))
        .collect::<Vec<_>>();
    let custom_domain = summary.web_app && summary.has_custom_domain();
    let data = json!({
        "web_app": summary.web_app,
        "static_page": summary.static_page,
        "access": if summary.shared { "public" } else { "private" },
        "features": join_labels(&labels),
        "bucket_name": summary.bucket_name,
        "region": summary.region,
        "staging": summary.staging,
        "custom_domain": custom_domain,
        "redirect": custom_domain && summary.static_page,
    });
    Ok(handlebars.render("description", &data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> QuestionSummary {
        QuestionSummary {
            web_app: false,
            staging: true,
            shared: false,
            static_page: false,
            bucket_name: "my-files".into(),
            region: "eu-west-1".into(),
            file_features: vec!["versioning".into(), "encryption".into(), "cors".into()],
        }
    }

    #[test]
    fn joins_feature_labels() {
        assert_eq!(join_labels(&[]), "");
        assert_eq!(join_labels(&["a"]), "a");
        assert_eq!(join_labels(&["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn describes_private_file_storage() {
        let text = describe(&files()).unwrap();
        assert_eq!(
            text,
            "A private file storage bucket with versioning, server side encryption and \
             browser uploads named my-files in eu-west-1. A staging bucket with the same \
             settings is created next to it."
        );
    }

    #[test]
    fn describes_webapp_on_custom_domain() {
        let summary = QuestionSummary {
            web_app: true,
            staging: false,
            shared: true,
            static_page: true,
            bucket_name: "example.com".into(),
            region: "us-east-1".into(),
            file_features: Vec::new(),
        };
        let text = describe(&summary).unwrap();
        assert!(text.starts_with("A public webapp bucket serving a static page named example.com"));
        assert!(text.contains("www.example.com redirects to it."));
    }
}
