use std::fmt;

/// Rendered `main.tf`, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationDocument {
    lines: Vec<String>,
}

impl ConfigurationDocument {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// File contents with a trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl fmt::Display for ConfigurationDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
