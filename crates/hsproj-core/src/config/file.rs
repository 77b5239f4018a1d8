//! The user's TOML configuration file

use super::{CustomPrelude, GhcVersion, License, PartialConfig};
use crate::decision::Decision;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of the configuration file.
///
/// Absent booleans are `Unknown` decisions; present ones map directly to `Yes`/`No`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ghc_versions: Vec<GhcVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appveyor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bscript: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bench: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_upload: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prelude: Option<CustomPrelude>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

impl From<ConfigFile> for PartialConfig {
    fn from(file: ConfigFile) -> Self {
        PartialConfig {
            owner: file.owner,
            full_name: file.full_name,
            email: file.email,
            license: file.license,
            ghc_versions: file.ghc_versions.into_iter().collect(),
            cabal: file.cabal.into(),
            stack: file.stack.into(),
            github: file.github.into(),
            travis: file.travis.into(),
            appveyor: file.appveyor.into(),
            private: file.private.into(),
            bscript: file.bscript.into(),
            lib: file.lib.into(),
            exe: file.exe.into(),
            test: file.test.into(),
            bench: file.bench.into(),
            prelude: file.prelude,
            extensions: file.extensions.into_iter().collect(),
            warnings: file.warnings.into_iter().collect(),
            no_upload: file.no_upload.into(),
        }
    }
}

impl From<&PartialConfig> for ConfigFile {
    fn from(partial: &PartialConfig) -> Self {
        let opt = Decision::as_bool;
        ConfigFile {
            owner: partial.owner.clone(),
            full_name: partial.full_name.clone(),
            email: partial.email.clone(),
            license: partial.license,
            ghc_versions: partial.ghc_versions.as_slice().to_vec(),
            cabal: opt(partial.cabal),
            stack: opt(partial.stack),
            github: opt(partial.github),
            travis: opt(partial.travis),
            appveyor: opt(partial.appveyor),
            private: opt(partial.private),
            bscript: opt(partial.bscript),
            lib: opt(partial.lib),
            exe: opt(partial.exe),
            test: opt(partial.test),
            bench: opt(partial.bench),
            no_upload: opt(partial.no_upload),
            extensions: partial.extensions.as_slice().to_vec(),
            warnings: partial.warnings.as_slice().to_vec(),
            prelude: partial.prelude.clone(),
        }
    }
}
