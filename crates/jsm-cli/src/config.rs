//! CLI configuration
//!
//! Sources, later ones winning: `jsm2cjs.{toml,yaml,json}` (or the file
//! given with `--config`), `JSM2CJS_*` environment variables, then flags.

use anyhow::Context;
use jsm_transform::{PathPattern, PathPatternSpec, TransformError, TransformOptions};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Literal prefix selecting the specifiers to rewrite
    #[serde(default)]
    pub prefix: Option<String>,

    /// Regex selecting the specifiers to rewrite
    #[serde(default)]
    pub regex: Option<String>,

    /// Remove the matched prefix from rewritten specifiers
    #[serde(default)]
    pub strip_prefix: bool,
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let builder = match path {
            Some(path) => config::Config::builder().add_source(config::File::from(path)),
            None => config::Config::builder()
                .add_source(config::File::with_name("jsm2cjs").required(false)),
        };

        builder
            .add_source(config::Environment::with_prefix("JSM2CJS"))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply command-line flags
    ///
    /// A pattern flag replaces both pattern settings from other sources.
    pub fn with_flags(
        mut self,
        prefix: Option<String>,
        regex: Option<String>,
        strip_prefix: bool,
    ) -> Self {
        if prefix.is_some() || regex.is_some() {
            self.prefix = prefix;
            self.regex = regex;
        }
        self.strip_prefix |= strip_prefix;
        self
    }

    /// Build transform options
    pub fn to_options(&self) -> Result<TransformOptions, TransformError> {
        let path_pattern = match (&self.prefix, &self.regex) {
            (None, None) => PathPattern::default(),
            (prefix, regex) => PathPatternSpec::Explicit {
                prefix: prefix.clone(),
                regex: regex.clone(),
            }
            .resolve()?,
        };

        Ok(TransformOptions::new()
            .with_path_pattern(path_pattern)
            .with_strip_prefix(self.strip_prefix))
    }
}
