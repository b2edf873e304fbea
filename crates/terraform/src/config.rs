use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{AssembleError, Result};

pub const MODULE_SOURCE_ENV: &str = "BUCKET_SERVED_MODULE_SOURCE";
pub const MODULE_REF_ENV: &str = "BUCKET_SERVED_MODULE_REF";

/// Where generated module blocks point their `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraformConfig {
    /// Directory or git URL holding one sub-directory per module.
    pub module_source_root: String,
    /// Optional git ref appended as `?ref=`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_ref: Option<String>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            module_source_root: "./modules".into(),
            module_ref: None,
        }
    }
}

impl TerraformConfig {
    /// Reads a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AssembleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AssembleError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies non-empty overrides, typically read from the environment.
    pub fn with_overrides(
        mut self,
        source_root: Option<String>,
        module_ref: Option<String>,
    ) -> Self {
        if let Some(root) = source_root.filter(|value| !value.trim().is_empty()) {
            self.module_source_root = root;
        }
        if let Some(reference) = module_ref.filter(|value| !value.trim().is_empty()) {
            self.module_ref = Some(reference);
        }
        self
    }

    /// `source` string for the module stored under `dir`.
    pub fn module_source(&self, dir: &str) -> String {
        let root = self.module_source_root.trim_end_matches('/');
        let separator = if root.starts_with("git::") { "//" } else { "/" };
        match &self.module_ref {
            Some(reference) => format!("{root}{separator}{dir}?ref={reference}"),
            None => format!("{root}{separator}{dir}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_points_at_local_modules() {
        let config = TerraformConfig::default();
        assert_eq!(config.module_source("webapp-bucket"), "./modules/webapp-bucket");
    }

    #[test]
    fn git_sources_use_double_slash_and_ref() {
        let config = TerraformConfig::default().with_overrides(
            Some("git::https://git.example.com/infra/modules.git".into()),
            Some("v2".into()),
        );
        assert_eq!(
            config.module_source("certificate"),
            "git::https://git.example.com/infra/modules.git//certificate?ref=v2"
        );
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = TerraformConfig::default().with_overrides(Some("  ".into()), None);
        assert_eq!(config, TerraformConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"module_ref\": \"main\"}}").expect("write config");
        let config = TerraformConfig::from_file(file.path()).expect("config");
        assert_eq!(config.module_source_root, "./modules");
        assert_eq!(config.module_ref.as_deref(), Some("main"));
    }
}
