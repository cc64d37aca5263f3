use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default fully-qualified name of the root reference type.
pub const DEFAULT_ROOT_CLASS: &str = "java.lang.Object";

/// Which classes a fresh [`crate::TypeModel`] starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Bootstrap {
    /// Only the root class.
    #[default]
    None,
    /// The root class plus a small `java.lang` / `java.util` skeleton.
    JavaLang,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Fully-qualified name of the universal supertype.
    #[serde(default = "default_root_class")]
    pub root_class: String,
    /// Allow `List<String> x = (List) y` at the top level of an assignment.
    ///
    /// Raw types are never accepted for a parameterized type nested inside another
    /// type, whatever this is set to.
    #[serde(default = "default_unchecked_raw_conversion")]
    pub unchecked_raw_conversion: bool,
    #[serde(default)]
    pub bootstrap: Bootstrap,
}

fn default_root_class() -> String {
    DEFAULT_ROOT_CLASS.to_string()
}

fn default_unchecked_raw_conversion() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            root_class: default_root_class(),
            unchecked_raw_conversion: default_unchecked_raw_conversion(),
            bootstrap: Bootstrap::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid root class name `{0}`")]
    InvalidRootClass(String),
}

impl ModelConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig =
            toml::from_str(text).map_err(|err| ConfigError::Toml(err.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid = !self.root_class.is_empty()
            && self
                .root_class
                .split('.')
                .all(|segment| !segment.is_empty() && !segment.contains(char::is_whitespace));
        if !valid {
            tracing::warn!(
                target: "jmodel.types",
                root_class = %self.root_class,
                "rejecting config with malformed root class"
            );
            return Err(ConfigError::InvalidRootClass(self.root_class.clone()));
        }
        Ok(())
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ModelConfig)
    }
}
