//! Shared configuration loader for the texfmt toolchain.
//!
//! `defaults/texfmt.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TexfmtConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use texfmt_parser::latex::alignment::Padding;
use texfmt_parser::latex::catalog::{Catalog, ContentProcessor, EnvironmentInfo, MacroInfo};
use texfmt_parser::latex::FormatOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/texfmt.default.toml");

/// Project-local configuration file looked up by [`Loader::with_project_file`].
pub const PROJECT_FILE: &str = ".texfmt.toml";

/// Top-level configuration consumed by texfmt applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TexfmtConfig {
    pub format: FormatConfig,
    #[serde(default)]
    pub macros: BTreeMap<String, MacroConfig>,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

/// Mirrors [`FormatOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    pub print_width: usize,
    pub use_tabs: bool,
    pub tab_width: usize,
    pub align_padding: Padding,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    pub signature: Option<String>,
    pub in_par_mode: bool,
    pub hanging_indent: bool,
    pub break_before: bool,
    pub break_after: bool,
    pub math: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub signature: Option<String>,
    pub math: bool,
    pub aligned: bool,
    pub verbatim: bool,
    pub trim: bool,
}

impl MacroConfig {
    fn to_info(&self) -> MacroInfo {
        let mut info = MacroInfo {
            signature: self.signature.clone(),
            ..MacroInfo::default()
        };
        if self.in_par_mode {
            info = info.in_par_mode();
        }
        if self.hanging_indent {
            info = info.hanging_indent();
        }
        if self.break_before {
            info = info.break_before();
        }
        if self.break_after {
            info = info.break_after();
        }
        if let Some(math) = self.math {
            info = info.in_math_mode(math);
        }
        info
    }
}

impl EnvironmentConfig {
    fn to_info(&self) -> EnvironmentInfo {
        if self.verbatim {
            return EnvironmentInfo::verbatim();
        }
        let mut info = EnvironmentInfo {
            signature: self.signature.clone(),
            ..EnvironmentInfo::default()
        };
        if self.math {
            info = info.math();
        }
        if self.aligned {
            info = info.aligned();
        }
        if self.trim {
            info = info.processor(ContentProcessor::TrimWhitespace);
        }
        info
    }
}

impl TexfmtConfig {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            print_width: self.format.print_width,
            use_tabs: self.format.use_tabs,
            tab_width: self.format.tab_width,
            align_padding: self.format.align_padding,
        }
    }

    /// The built-in catalog with the configured definitions layered on top.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::latex2e();
        for (name, definition) in &self.macros {
            tracing::debug!(macro_name = %name, "defining macro from config");
            catalog.define_macro(name.as_str(), definition.to_info());
        }
        for (name, definition) in &self.environments {
            tracing::debug!(environment = %name, "defining environment from config");
            catalog.define_environment(name.as_str(), definition.to_info());
        }
        catalog
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `.texfmt.toml` from `dir` if present.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TexfmtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TexfmtConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.format_options(), FormatOptions::default());
        assert!(config.macros.is_empty());
        assert!(config.environments.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("format.print_width", 40)
            .expect("override to apply")
            .set_override("format.align_padding", "center")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.format.print_width, 40);
        assert_eq!(config.format.align_padding, Padding::Center);
    }

    #[test]
    fn user_file_defines_macros() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[format]\nuse_tabs = true\n\n[macros.pair]\nsignature = \"m m\"\n\n[environments.grid]\nsignature = \"m\"\naligned = true"
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(config.format.use_tabs);
        assert_eq!(config.format.print_width, 80);

        let catalog = config.catalog();
        assert_eq!(
            catalog.macro_info("pair").and_then(|i| i.signature.as_deref()),
            Some("m m")
        );
        assert!(catalog.environment_info("grid").unwrap().render_info.aligned_content);
        assert!(catalog.macro_info("section").is_some());
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/texfmt.toml").build().is_err());
    }

    #[test]
    fn missing_project_file_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Loader::new()
            .with_project_file(dir.path())
            .build()
            .expect("config to build");
        assert_eq!(config.format.tab_width, 2);
    }
}
