// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! Every key is optional. A typical `viewgen.toml`:
//!
//! ```toml
//! suffix = "View"
//! grid_suffix = "GridView"
//! package = "crate::views"
//! derives = ["Debug", "Clone", "Default", "PartialEq", "serde::Serialize"]
//! passthrough = ["serde"]
//! accessor = { style = "getter", prefix = "" }
//!
//! [containers]
//! "smallvec::SmallVec" = "collection"
//! ```
//!
//! Entries under `[containers]` are added to the built-in registry rather
//! than replacing it.

use std::{
    collections::BTreeMap,
    fs,
    path::Path
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How generated code reads a field from a source value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AccessorStyle {
    /// Direct field access: `v.customer`.
    #[default]
    Field,

    /// Getter call: `v.{prefix}customer()`.
    ///
    /// Getters of `Option` fields must return `Option<&T>`, all others `&T`.
    Getter {
        /// Method name prefix, e.g. `get_`.
        #[serde(default)]
        prefix: String
    }
}

/// Element-wise conversion shape of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Contiguous sequence, converted with `from_list`.
    List,
    /// Any other collection, converted with `from_collection`.
    Collection
}

impl ContainerKind {
    /// Name of the generated conversion entry point.
    pub fn entry(self) -> &'static str {
        match self {
            Self::List => "from_list",
            Self::Collection => "from_collection"
        }
    }
}

/// Recognized container types, keyed by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerRegistry(BTreeMap<String, ContainerKind>);

impl Default for ContainerRegistry {
    fn default() -> Self {
        let mut registry = Self(BTreeMap::new());
        for prefix in ["", "std::vec::", "alloc::vec::"] {
            registry.register(format!("{prefix}Vec"), ContainerKind::List);
        }
        for name in ["VecDeque", "LinkedList", "BTreeSet", "HashSet"] {
            for prefix in ["", "std::collections::", "alloc::collections::"] {
                registry.register(format!("{prefix}{name}"), ContainerKind::Collection);
            }
        }
        registry
    }
}

impl ContainerRegistry {
    /// Registry with no entries.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace an entry.
    pub fn register(&mut self, name: impl Into<String>, kind: ContainerKind) {
        self.0.insert(name.into(), kind);
    }

    /// Kind of the container named `name`, if recognized.
    pub fn kind_of(&self, name: &str) -> Option<ContainerKind> {
        self.0.get(name).copied()
    }
}

fn default_suffix() -> String {
    "View".to_string()
}

fn default_grid_suffix() -> String {
    "GridView".to_string()
}

fn default_derives() -> Vec<String> {
    ["Debug", "Clone", "Default", "PartialEq"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_passthrough() -> Vec<String> {
    vec!["serde".to_string()]
}

/// Generator-wide settings shared by every scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Suffix of default and scene views (`Order` -> `OrderView`).
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Suffix of grid views (`Order` -> `OrderGridView`).
    #[serde(default = "default_grid_suffix")]
    pub grid_suffix: String,

    /// Target module for views without a per-spec package.
    /// Defaults to the source type's own module.
    #[serde(default)]
    pub package: Option<String>,

    /// Derives placed on every view.
    #[serde(default = "default_derives")]
    pub derives: Vec<String>,

    /// Attribute names carried from sources into views.
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,

    /// Field access convention of generated code.
    #[serde(default)]
    pub accessor: AccessorStyle,

    /// Extra container types.
    #[serde(default, deserialize_with = "merge_containers")]
    pub containers: ContainerRegistry
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            suffix:      default_suffix(),
            grid_suffix: default_grid_suffix(),
            package:     None,
            derives:     default_derives(),
            passthrough: default_passthrough(),
            accessor:    AccessorStyle::default(),
            containers:  ContainerRegistry::default()
        }
    }
}

fn merge_containers<'de, D>(deserializer: D) -> Result<ContainerRegistry, D::Error>
where
    D: serde::Deserializer<'de>
{
    let extra = BTreeMap::<String, ContainerKind>::deserialize(deserializer)?;
    let mut registry = ContainerRegistry::default();
    for (name, kind) in extra {
        registry.register(name, kind);
    }
    Ok(registry)
}

impl GeneratorConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source
        })?;
        Self::from_toml_str(&text)
    }

    /// Whether attributes named `name` are carried into views.
    pub fn is_passthrough(&self, name: &str) -> bool {
        self.passthrough.iter().any(|p| p == name)
    }
}
