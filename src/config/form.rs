//! Form definitions loaded from TOML.
//!
//! ```toml
//! [[field]]
//! key = "phone"
//! mask = "111-111"
//! eventable = true
//!
//! [[field]]
//! key = "choice"
//! options = [{ value = "a" }, { value = "b", label = "Bee" }]
//! ```

use super::{ControlConfig, SelectOption};
use crate::error::{Result, UniversalInputError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One named control of a form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldConfig {
    pub key: String,
    #[serde(flatten)]
    pub control: ControlConfig,
}

impl FieldConfig {
    pub fn new(key: impl Into<String>, control: ControlConfig) -> Self {
        Self {
            key: key.into(),
            control,
        }
    }
}

/// An ordered list of fields.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FormConfig {
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    /// Default location: `<config_dir>/universal-input/form.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("universal-input").join("form.toml"))
    }

    /// Load and validate a form file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(UniversalInputError::FormNotFound {
                path: path.to_path_buf(),
            });
        }

        let source = std::fs::read_to_string(path).map_err(|e| {
            UniversalInputError::io(format!("Failed to read form {}", path.display()), e)
        })?;
        let form = Self::from_toml_str(&source)?;
        log::debug!(
            "loaded form {} with {} fields",
            path.display(),
            form.fields.len()
        );
        Ok(form)
    }

    /// Parse and validate a form definition.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let form: Self = toml::from_str(source)
            .map_err(|e| UniversalInputError::config(format!("Invalid form definition: {e}")))?;
        form.validate()?;
        Ok(form)
    }

    /// Keys must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.key.trim().is_empty() {
                return Err(UniversalInputError::config("Field key must not be empty"));
            }
            if !seen.insert(field.key.as_str()) {
                return Err(UniversalInputError::config(format!(
                    "Duplicate field key: {}",
                    field.key
                )));
            }
        }
        Ok(())
    }

    /// The built-in demo form: one field per common mode.
    pub fn demo() -> Self {
        let options = ["first element", "second element", "third element"]
            .into_iter()
            .map(SelectOption::new);

        Self {
            fields: vec![
                FieldConfig::new("quantity", ControlConfig::number().eventable()),
                FieldConfig::new("title", ControlConfig::text().eventable()),
                FieldConfig::new("notes", ControlConfig::multiline().eventable()),
                FieldConfig::new("phone", ControlConfig::masked("111-111").eventable()),
                FieldConfig::new("choice", ControlConfig::select(options)),
            ],
        }
    }
}
