// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **Driver**: [`Generator`] runs every requested view and reports
//! - **Specs**: [`ProjectionSpec`] and [`ExplicitField`]
//! - **Metadata**: [`TypeMetadataProvider`], [`MetadataGraph`], [`SourceModel`]
//! - **Output**: [`OutputSink`], [`MemorySink`], [`DirSink`]
//! - **Configuration**: [`GeneratorConfig`]
//!
//! # Pipeline
//!
//! ```text
//! SourceModel / MetadataGraph::from_json_str
//!        │
//!        ▼
//! Generator::run ── per (source, spec), in parallel ──┐
//!        │                                            │
//!        ▼                                            │
//! Composer ── PathResolver + Classifier               │
//!        │                                            │
//!        ▼                                            │
//! Emitter ── ProjectionDef ── AccessorExpr            │
//!        │                                            │
//!        ▼                                            │
//! OutputSink ◀────────────────────────────────────────┘
//! ```
//!
//! # Naming
//!
//! | Spec | View of `Order` |
//! |------|-----------------|
//! | default | `OrderView` |
//! | `scene = "summary"` | `OrderSummaryView` |
//! | `grid` | `OrderGridView` |
//!
//! # Errors
//!
//! Scene-level failures ([`ResolutionError`], [`EmissionError`]) are caught
//! per unit and returned in the [`GenerationReport`]; they never abort a run.

mod config;
mod error;
mod metadata;
mod utils;
mod view;

pub use config::{AccessorStyle, ContainerKind, ContainerRegistry, GeneratorConfig};
pub use error::{
    ConfigError, ConfigWarning, EmissionError, MetadataError, ResolutionError, SceneError,
    SceneFailure, SourceError
};
pub use metadata::{
    FieldDef, FieldMarkers, MetadataGraph, ParentLink, TypeDef, TypeMetadataProvider, TypeRef
};
pub use view::{
    AccessChain, AccessStep, AccessorExpr, Classification, Classifier, Composer, Composition,
    DirSink, Emitter, ExplicitField, FieldOrigin, GeneratedUnit, GeneratedView,
    GenerationReport, Generator, MemorySink, Operation, OutputSink, PathResolver,
    ProjectedField, ProjectionDef, ProjectionSpec, ResolvedFieldDescriptor, ResolvedPath,
    SceneOutput, SourceModel, Substitution, TypeDescriptor, ViewRequest, synthesize
};
