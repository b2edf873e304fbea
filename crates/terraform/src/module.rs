use std::fmt;

/// An HCL expression emitted verbatim, e.g. `module.domain.zone_id`.
///
/// References between modules are never resolved here; Terraform does that
/// when it plans the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicExpr(String);

impl SymbolicExpr {
    pub fn raw(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// `module.<module>.<attribute>`
    pub fn module_output(module: &str, attribute: &str) -> Self {
        Self(format!("module.{module}.{attribute}"))
    }

    /// `var.<name>`
    pub fn var(name: &str) -> Self {
        Self(format!("var.{name}"))
    }

    /// A quoted string with `${...}` interpolation, passed through unescaped.
    pub fn interpolated(template: &str) -> Self {
        Self(format!("\"{template}\""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A literal value that is hoisted into a `variable` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Bool(bool),
    List(Vec<String>),
}

impl Literal {
    /// HCL rendering of the literal.
    pub fn to_hcl(&self) -> String {
        match self {
            Literal::String(value) => quote(value),
            Literal::Bool(flag) => flag.to_string(),
            Literal::List(items) => format!(
                "[{}]",
                items.iter().map(|item| quote(item)).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Literal(Literal),
    Expression(SymbolicExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputVariable {
    pub name: String,
    pub value: InputValue,
}

/// One `module` block contributed to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub source: String,
    pub inputs: Vec<InputVariable>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            inputs: Vec::new(),
        }
    }

    pub fn string(self, name: &str, value: impl Into<String>) -> Self {
        self.input(name, InputValue::Literal(Literal::String(value.into())))
    }

    pub fn flag(self, name: &str, value: bool) -> Self {
        self.input(name, InputValue::Literal(Literal::Bool(value)))
    }

    pub fn list(self, name: &str, values: Vec<String>) -> Self {
        self.input(name, InputValue::Literal(Literal::List(values)))
    }

    pub fn expr(self, name: &str, expr: SymbolicExpr) -> Self {
        self.input(name, InputValue::Expression(expr))
    }

    fn input(mut self, name: &str, value: InputValue) -> Self {
        self.inputs.push(InputVariable {
            name: name.to_string(),
            value,
        });
        self
    }
}

/// Quotes a string for HCL, keeping `${` from being read as interpolation.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                quoted.push(ch);
                quoted.push(ch);
            }
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
