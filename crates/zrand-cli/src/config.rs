use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use zrand_core::{Op, Recipe};

/// Top-level configuration (loaded from zrand.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZrandConfig {
    pub logging: LoggingConfig,
    pub generate: GenerateConfig,
    /// User-defined recipes; a name here shadows the built-in of the same name
    pub recipes: BTreeMap<String, Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Recipe used when --recipe is not given (default: password)
    pub recipe: String,
    /// Number of values printed per invocation (default: 1)
    pub count: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            recipe: "password".into(),
            count: 1,
        }
    }
}

impl ZrandConfig {
    /// Resolve a recipe by name: configured recipes first, then built-ins.
    pub fn recipe(&self, name: &str) -> Result<Recipe> {
        if let Some(recipe) = self.recipes.get(name) {
            return Ok(recipe.clone());
        }
        zrand_core::builtin(name).with_context(|| {
            format!("unknown recipe '{name}' (see `zrand recipes` for the available names)")
        })
    }

    /// Resolve a recipe by name and build its operation tree.
    pub fn op(&self, name: &str) -> Result<Op> {
        self.recipe(name)?
            .to_op()
            .with_context(|| format!("building recipe '{name}'"))
    }
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<ZrandConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(ZrandConfig::default())
    }
}
