use std::collections::{BTreeMap, BTreeSet};

use crate::document::ConfigurationDocument;
use crate::error::{AssembleError, Result};
use crate::module::{InputValue, Literal, ModuleSpec, quote};
use crate::outputs::OutputSpec;

/// Renders modules and outputs into a `main.tf` document.
///
/// Literal inputs are hoisted into `variable` blocks, declared once per name
/// in the order they are first met; later modules reusing a name get the
/// first declaration. Expression inputs are written inline. The result only
/// depends on the order of `modules` and `outputs`.
pub fn assemble(modules: &[ModuleSpec], outputs: &[OutputSpec]) -> Result<ConfigurationDocument> {
    check_unique(
        modules.iter().map(|module| module.name.as_str()),
        AssembleError::DuplicateModule,
    )?;
    check_unique(
        outputs.iter().map(|output| output.name.as_str()),
        AssembleError::DuplicateOutput,
    )?;

    let mut lines = variable_lines(modules);
    let blocks = modules
        .iter()
        .map(module_lines)
        .chain(outputs.iter().map(output_lines));
    for block in blocks {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    tracing::debug!(
        modules = modules.len(),
        outputs = outputs.len(),
        lines = lines.len(),
        "assembled configuration document"
    );
    Ok(ConfigurationDocument::from_lines(lines))
}

fn check_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    error: fn(String) -> AssembleError,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(error(name.to_string()));
        }
    }
    Ok(())
}

fn variable_lines(modules: &[ModuleSpec]) -> Vec<String> {
    let mut declared: BTreeMap<&str, &Literal> = BTreeMap::new();
    let mut lines = Vec::new();
    for module in modules {
        for input in &module.inputs {
            let InputValue::Literal(literal) = &input.value else {
                continue;
            };
            match declared.get(input.name.as_str()) {
                Some(first) => {
                    if *first != literal {
                        tracing::warn!(
                            variable = %input.name,
                            module = %module.name,
                            "variable already declared with a different value; keeping the first"
                        );
                    }
                }
                None => {
                    declared.insert(input.name.as_str(), literal);
                    lines.push(format!(
                        "variable {} {{ default = {} }}",
                        quote(&input.name),
                        literal.to_hcl()
                    ));
                }
            }
        }
    }
    lines
}

fn module_lines(module: &ModuleSpec) -> Vec<String> {
    let mut assignments = vec![("source".to_string(), quote(&module.source))];
    for input in &module.inputs {
        let value = match &input.value {
            InputValue::Literal(_) => format!("var.{}", input.name),
            InputValue::Expression(expr) => expr.to_string(),
        };
        assignments.push((input.name.clone(), value));
    }

    let mut lines = vec![format!("module {} {{", quote(&module.name))];
    lines.extend(aligned(&assignments));
    lines.push("}".to_string());
    lines
}

fn output_lines(output: &OutputSpec) -> Vec<String> {
    let assignments = vec![
        ("description".to_string(), quote(&output.description)),
        ("value".to_string(), output.value.to_string()),
    ];
    let mut lines = vec![format!("output {} {{", quote(&output.name))];
    lines.extend(aligned(&assignments));
    lines.push("}".to_string());
    lines
}

/// Indents assignments and lines up their `=` the way `terraform fmt` does.
fn aligned(assignments: &[(String, String)]) -> Vec<String> {
    let width = assignments
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    assignments
        .iter()
        .map(|(name, value)| format!("  {name:<width$} = {value}"))
        .collect()
}
