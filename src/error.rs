// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy for view generation.
//!
//! Errors are split by the stage that raises them:
//!
//! | Error | Stage | Scope |
//! |-------|-------|-------|
//! | [`ResolutionError`] | Path resolution, composition | Fatal to one scene |
//! | [`EmissionError`] | Rendering, output sink | Fatal to one scene |
//! | [`SceneError`] | Scene multiplexer | Wraps both of the above |
//! | [`ConfigWarning`] | Composition | Non-fatal, logged |
//! | [`ConfigError`] | TOML configuration loading | Host adapter |
//! | [`MetadataError`] | JSON metadata loading | Host adapter |
//! | [`SourceError`] | Rust source frontend | Host adapter |
//!
//! Scene-level errors never abort a batch: the [`Generator`](crate::Generator)
//! catches them at the scene boundary and records a [`SceneFailure`].

use std::{fmt, path::PathBuf};

/// A path expression could not be resolved against the metadata graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// A segment names no field on the current type or any of its parents.
    #[error("field `{segment}` not found on `{type_name}` while resolving `{expression}`")]
    FieldNotFound {
        /// Type the segment was looked up on.
        type_name:  String,
        /// The failing segment.
        segment:    String,
        /// Full path expression.
        expression: String
    },

    /// A non-terminal segment has a type the resolver cannot descend into.
    #[error(
        "segment `{segment}` of `{expression}` has type `{type_name}`, which cannot be traversed"
    )]
    NotTraversable {
        /// Declared type of the segment.
        type_name:  String,
        /// The failing segment.
        segment:    String,
        /// Full path expression.
        expression: String
    },

    /// A requested source type is unknown to the provider.
    #[error("type `{type_name}` is not known to the metadata provider")]
    UnknownType {
        /// The missing type name.
        type_name: String
    }
}

/// The assembled view could not be rendered or persisted.
#[derive(Debug, thiserror::Error)]
pub enum EmissionError {
    /// A generated field or type name is not a valid Rust identifier.
    #[error("`{name}` is not a valid identifier in view `{view}`")]
    InvalidIdent {
        /// View being emitted.
        view: String,
        /// The offending name.
        name: String
    },

    /// A type could not be parsed back into a Rust type or path.
    #[error("type `{ty}` in view `{view}` is invalid: {reason}")]
    InvalidType {
        /// View being emitted.
        view:   String,
        /// The offending type text.
        ty:     String,
        /// Parser message.
        reason: String
    },

    /// A carried attribute could not be parsed.
    #[error("attribute `{attr}` in view `{view}` is invalid: {reason}")]
    InvalidAttribute {
        /// View being emitted.
        view:   String,
        /// The offending attribute text.
        attr:   String,
        /// Parser message.
        reason: String
    },

    /// Another scene already claimed this output name.
    #[error("view `{package}::{name}` was already emitted")]
    Collision {
        /// Target module path.
        package: String,
        /// Generated type name.
        name:    String
    },

    /// The output file could not be written.
    #[error("failed to write `{}`: {source}", .path.display())]
    Io {
        /// Destination path.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    }
}

/// Failure of a single scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Path resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Rendering or writing failed.
    #[error(transparent)]
    Emission(#[from] EmissionError)
}

/// A failed scene together with its identifying context.
#[derive(Debug)]
pub struct SceneFailure {
    /// Source type name.
    pub source: String,
    /// Scene label (`default` when the spec has no scene name).
    pub scene:  String,
    /// What went wrong.
    pub error:  SceneError
}

impl fmt::Display for SceneFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.source, self.scene, self.error)
    }
}

/// Non-fatal configuration issue found while composing a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    /// An explicit declaration replaced an auto-discovered field.
    #[error("explicit field `{name}` shadows the discovered field of `{source_type}` [{scene}]")]
    Shadowed {
        /// Source type name.
        source_type: String,
        /// Scene label.
        scene:       String,
        /// Field name.
        name:        String
    },

    /// The same explicit name was declared more than once.
    #[error("explicit field `{name}` of `{source_type}` [{scene}] is declared twice, keeping the first")]
    DuplicateExplicit {
        /// Source type name.
        source_type: String,
        /// Scene label.
        scene:       String,
        /// Field name.
        name:        String
    }
}

/// Generator configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config `{}`: {source}", .path.display())]
    Io {
        /// Config path.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },

    /// The TOML document is malformed.
    #[error("invalid generator config: {0}")]
    Parse(#[from] toml::de::Error)
}

/// A serialized metadata graph could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The JSON document or a type text in it is malformed.
    #[error("invalid metadata document: {0}")]
    Parse(#[from] serde_json::Error)
}

/// Rust sources could not be turned into metadata.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file is not valid Rust.
    #[error("failed to parse source: {0}")]
    Parse(#[from] syn::Error),

    /// A `#[view(...)]` attribute is malformed.
    #[error("invalid view attribute: {0}")]
    Attribute(#[from] darling::Error)
}
