//! Shared configuration loader for the xwiki toolchain.
//!
//! `defaults/xwiki.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`XwikiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xwiki_babel::formats::HtmlOptions;
use xwiki_babel::FormatError;

const DEFAULT_TOML: &str = include_str!("../defaults/xwiki.default.toml");

/// Top-level configuration consumed by xwiki applications.
#[derive(Debug, Clone, Deserialize)]
pub struct XwikiConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    pub preview: PreviewConfig,
}

/// Where saved conversions are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertConfig {
    pub xwiki_output_folder: Option<PathBuf>,
    pub markdown_output_folder: Option<PathBuf>,
    pub html_output_folder: Option<PathBuf>,
}

impl ConvertConfig {
    /// Configured output folder for a target format. Blank folders count as unset.
    pub fn output_folder(&self, format: &str) -> Option<&Path> {
        let folder = match format {
            "xwiki" => self.xwiki_output_folder.as_deref(),
            "markdown" => self.markdown_output_folder.as_deref(),
            "html" => self.html_output_folder.as_deref(),
            _ => None,
        }?;
        (!folder.as_os_str().to_string_lossy().trim().is_empty()).then_some(folder)
    }

    /// Path a conversion of `input` to `format` is saved to.
    ///
    /// The file keeps its stem and takes `extension`. It lands in the configured folder for
    /// the format, or next to the input when there is none.
    pub fn output_path(&self, input: &Path, format: &str, extension: &str) -> PathBuf {
        let file_name = match input.file_stem() {
            Some(stem) => {
                let mut name = stem.to_os_string();
                name.push(".");
                name.push(extension);
                name
            }
            None => format!("output.{extension}").into(),
        };
        match self.output_folder(format) {
            Some(folder) => folder.join(file_name),
            None => input.with_file_name(file_name),
        }
    }
}

/// Preview rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    pub standalone: bool,
    pub title: String,
    pub workspace_root: Option<PathBuf>,
    pub resource_base: Option<String>,
    /// Path of a stylesheet appended to the built-in one.
    pub custom_css: Option<PathBuf>,
}

impl PreviewConfig {
    /// The settings as HTML format options. `custom_css` is a path and is left to the
    /// caller, which reads the file.
    pub fn format_options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        options.insert("standalone".to_string(), self.standalone.to_string());
        options.insert("title".to_string(), self.title.clone());
        if let Some(root) = &self.workspace_root {
            options.insert(
                "workspace-root".to_string(),
                root.to_string_lossy().into_owned(),
            );
        }
        if let Some(base) = &self.resource_base {
            options.insert("resource-base".to_string(), base.clone());
        }
        options
    }

    /// Validated renderer options.
    pub fn html_options(&self) -> Result<HtmlOptions, FormatError> {
        let mut options = HtmlOptions::default();
        options.apply(&self.format_options())?;
        Ok(options)
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<XwikiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<XwikiConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.convert.xwiki_output_folder.is_none());
        assert!(config.convert.markdown_output_folder.is_none());
        assert!(config.preview.standalone);
        assert_eq!(config.preview.title, "XWiki Preview");
        assert!(config.preview.resource_base.is_none());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.xwiki_output_folder", "out/wiki")
            .expect("override to apply")
            .set_override("preview.standalone", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(
            config.convert.xwiki_output_folder,
            Some(PathBuf::from("out/wiki"))
        );
        assert!(!config.preview.standalone);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("xwiki.toml");
        fs::write(
            &path,
            "[convert]\nmarkdown_output_folder = \"md\"\n\n[preview]\ntitle = \"Notes\"\n",
        )
        .expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(
            config.convert.markdown_output_folder,
            Some(PathBuf::from("md"))
        );
        assert_eq!(config.preview.title, "Notes");
        assert!(config.preview.standalone);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
        assert!(Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .is_ok());
    }

    #[test]
    fn output_path_next_to_input_or_in_folder() {
        let mut convert = ConvertConfig::default();
        let input = Path::new("notes/guide.md");
        assert_eq!(
            convert.output_path(input, "xwiki", "xwiki"),
            PathBuf::from("notes/guide.xwiki")
        );

        convert.xwiki_output_folder = Some(PathBuf::from("wiki"));
        assert_eq!(
            convert.output_path(input, "xwiki", "xwiki"),
            PathBuf::from("wiki/guide.xwiki")
        );
        assert_eq!(
            convert.output_path(Path::new("a.xwiki"), "markdown", "md"),
            PathBuf::from("a.md")
        );

        convert.markdown_output_folder = Some(PathBuf::from("  "));
        assert_eq!(
            convert.output_path(Path::new("a.xwiki"), "markdown", "md"),
            PathBuf::from("a.md")
        );
    }

    #[test]
    fn preview_settings_become_html_options() {
        let config = Loader::new()
            .set_override("preview.resource_base", "https://files.local/")
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.preview.html_options().expect("valid options");
        assert!(options.standalone);
        assert_eq!(options.title.as_deref(), Some("XWiki Preview"));
        assert_eq!(
            options.resource_base.map(|u| u.to_string()),
            Some("https://files.local/".to_string())
        );

        let broken = Loader::new()
            .set_override("preview.resource_base", "no scheme")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(broken.preview.html_options().is_err());
    }
}
