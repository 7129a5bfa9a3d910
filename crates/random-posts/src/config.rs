//! The `random-posts.toml` configuration file.

use std::path::{Path, PathBuf};

use ecow::{eco_format, EcoString};
use serde::{Deserialize, Serialize};

use crate::cleanup::CleanupOptions;
use crate::error::{Error, Result};
use crate::generate::GenerateOptions;
use crate::model::DEFAULT_MARKER_KEY;

/// The file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "random-posts.toml";

/// The store file used when neither the CLI nor the config names one.
pub const STORE_FILE: &str = "random-posts.json";

/// Defaults of the command line, read from TOML.
///
/// ```toml
/// marker-key = "_jwrp_test_data"
/// store = "content.json"
///
/// [generate]
/// count = 20
/// taxonomies = ["category"]
///
/// [generate.content]
/// max-depth = 6
///
/// [cleanup]
/// force-delete = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Meta key marking generated content, shared by both commands.
    pub marker_key: EcoString,
    /// Path of the JSON store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    /// Defaults of `generate`.
    pub generate: GenerateOptions,
    /// Defaults of `cleanup`.
    pub cleanup: CleanupOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_key: DEFAULT_MARKER_KEY.into(),
            store: None,
            generate: GenerateOptions::default(),
            cleanup: CleanupOptions::default(),
        }
    }
}

impl Config {
    /// Parses a config from TOML.
    ///
    /// The top-level `marker-key` applies to `[generate]` and `[cleanup]`
    /// unless the section sets its own.
    pub fn from_toml(content: &str, source_name: &str) -> Result<Self> {
        let parse_error = |err: toml::de::Error| Error::Parse {
            source_name: source_name.into(),
            message: eco_format!("{err}"),
        };
        let table: toml::Table = toml::from_str(content).map_err(parse_error)?;
        let mut config: Config = toml::from_str(content).map_err(parse_error)?;

        let sets_marker = |section: &str| {
            table
                .get(section)
                .and_then(toml::Value::as_table)
                .is_some_and(|section| section.contains_key("marker-key"))
        };
        if !sets_marker("generate") {
            config.generate.marker_key = config.marker_key.clone();
        }
        if !sets_marker("cleanup") {
            config.cleanup.marker_key = config.marker_key.clone();
        }
        Ok(config)
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Reads `explicit` if given, else [`CONFIG_FILE`] in `dir` if it exists,
    /// else returns the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::load(path);
        }

        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            log::debug!("loading config from {}", path.display());
            return Self::load(&path);
        }
        Ok(Self::default())
    }

    /// Writes the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::Parse {
            source_name: "config".into(),
            message: eco_format!("{err}"),
        })
    }

    /// The store path, falling back to [`STORE_FILE`].
    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::ContentKind;
    use crate::model::{AuthorRef, ImageSize, ImageType};

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("", "inline").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.generate.count, 10);
        assert_eq!(config.generate.term_count, 3);
        assert_eq!(config.generate.post_status, "publish");
        assert_eq!(config.generate.image_size, ImageSize::default());
        assert_eq!(config.store_path(), PathBuf::from(STORE_FILE));
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::from_toml(
            r#"
marker-key = "_seeded"
store = "content.json"

[generate]
count = 3
post-type = "page"
taxonomies = ["category", "post_tag"]
author = "editor@example.org"
image-size = "640,480"
image-type = "cats"

[generate.content]
kind = "paragraphs"
max-depth = 7

[cleanup]
force-delete = true
media = true
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.store_path(), PathBuf::from("content.json"));
        let generate = &config.generate;
        assert_eq!(generate.count, 3);
        assert_eq!(generate.post_type, "page");
        assert_eq!(generate.taxonomies, ["category", "post_tag"]);
        assert_eq!(generate.author, AuthorRef::Email("editor@example.org".into()));
        assert_eq!(generate.image_size, ImageSize { width: 640, height: 480 });
        assert_eq!(generate.image_type, ImageType::Cats);
        assert_eq!(generate.content.kind, ContentKind::Paragraphs);
        assert_eq!(generate.content.max_depth, 7);
        assert_eq!(generate.content.max_width, 4);
        assert_eq!(generate.marker_key, "_seeded");
        assert!(config.cleanup.force_delete && config.cleanup.media);
        assert_eq!(config.cleanup.marker_key, "_seeded");
    }

    #[test]
    fn section_marker_keys_win_over_the_top_level_one() {
        let config =
            Config::from_toml("[cleanup]\nmarker-key = \"_custom\"\n", "inline").unwrap();
        assert_eq!(config.cleanup.marker_key, "_custom");
        assert_eq!(config.generate.marker_key, DEFAULT_MARKER_KEY);

        let config = Config::from_toml(
            "marker-key = \"_shared\"\n[generate]\nmarker-key = \"_own\"\n",
            "inline",
        )
        .unwrap();
        assert_eq!(config.generate.marker_key, "_own");
        assert_eq!(config.cleanup.marker_key, "_shared");
    }

    #[test]
    fn printed_config_keeps_section_marker_keys() {
        let mut config = Config::default();
        config.cleanup.marker_key = "_custom".into();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text, "inline").unwrap(), config);
    }

    #[test]
    fn invalid_values_are_parse_errors() {
        for input in [
            "[generate]\nimage-size = \"1024\"",
            "[generate]\nimage-type = \"kittens\"",
            "[generate]\ncount = -1",
        ] {
            let err = Config::from_toml(input, "inline").unwrap_err();
            assert!(matches!(err, Error::Parse { .. }), "{input}");
        }
    }

    #[test]
    fn discovers_the_working_directory_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "[generate]\ncount = 2\n").unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap().generate.count, 2);

        let other = dir.path().join("other.toml");
        std::fs::write(&other, "[generate]\ncount = 5\n").unwrap();
        let config = Config::discover(Some(&other), dir.path()).unwrap();
        assert_eq!(config.generate.count, 5);
    }

    #[test]
    fn default_config_round_trips() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text, "inline").unwrap(), Config::default());
    }
}
