// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! View generation pipeline.
//!
//! # Architecture
//!
//! ```text
//! view.rs (coordinator, Generator)
//! ├── parse/          - ProjectionSpec, Rust source frontend
//! ├── resolve.rs      - dotted path resolution
//! ├── classify.rs     - field type shapes
//! ├── compose.rs      - explicit + discovered field set
//! ├── accessor.rs     - null-safe accessor chains
//! ├── projection.rs   - ProjectionDef and code rendering
//! └── sink.rs         - output sinks
//! ```
//!
//! Each (source, spec) pair is one independent unit of work:
//!
//! ```text
//! ViewRequest { source, specs: [default, summary, grid] }
//!        │
//!        ├──▶ compose ─▶ emit ─▶ render ─▶ sink   (OrderView)
//!        ├──▶ compose ─▶ emit ─▶ render ─▶ sink   (OrderSummaryView)
//!        └──▶ compose ─▶ emit ─▶ render ─▶ sink   (OrderGridView)
//! ```
//!
//! A failing unit is recorded in the [`GenerationReport`] and never stops
//! the others.

mod accessor;
mod classify;
mod compose;
pub mod parse;
mod projection;
mod resolve;
mod sink;


pub use accessor::{AccessChain, AccessorExpr, synthesize};
pub use classify::{Classification, Classifier, TypeDescriptor};
pub use compose::{Composer, Composition, FieldOrigin, ResolvedFieldDescriptor, Substitution};
pub use parse::{ExplicitField, ProjectionSpec, SourceModel};
pub use projection::{Emitter, Operation, ProjectedField, ProjectionDef};
use rayon::prelude::*;
pub use resolve::{AccessStep, PathResolver, ResolvedPath};
use serde::{Deserialize, Serialize};
pub use sink::{DirSink, GeneratedUnit, MemorySink, OutputSink};
use tracing::{error, info};

use crate::{
    config::GeneratorConfig,
    error::{ConfigWarning, ResolutionError, SceneError, SceneFailure},
    metadata::{TypeDef, TypeMetadataProvider}
};

/// Views requested for one source type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRequest {
    /// Qualified or simple source type name.
    pub source: String,

    /// One spec per generated view.
    #[serde(default)]
    pub specs: Vec<ProjectionSpec>
}

impl ViewRequest {
    /// A request without specs.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            specs:  Vec::new()
        }
    }

    /// Add a spec.
    #[must_use]
    pub fn with_spec(mut self, spec: ProjectionSpec) -> Self {
        self.specs.push(spec);
        self
    }
}

/// Result of one successful unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOutput {
    /// The view description.
    pub definition: ProjectionDef,
    /// Rendered output.
    pub unit:       GeneratedUnit,
    /// Non-fatal issues found while composing.
    pub warnings:   Vec<ConfigWarning>
}

/// A view written to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedView {
    /// Source type name as requested.
    pub source:  String,
    /// Scene label.
    pub scene:   String,
    /// Target module path.
    pub package: String,
    /// View type name.
    pub name:    String
}

/// Outcome of [`Generator::run`].
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Views written, in request order.
    pub generated: Vec<GeneratedView>,
    /// Failed units, in request order.
    pub failures:  Vec<SceneFailure>,
    /// Warnings of the successful units.
    pub warnings:  Vec<ConfigWarning>
}

impl GenerationReport {
    /// Whether every unit succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives view generation over a metadata provider.
///
/// # Example
///
/// ```rust
/// use viewgen::{
///     ExplicitField, FieldDef, Generator, GeneratorConfig, MemorySink, MetadataGraph,
///     ProjectionSpec, TypeDef, TypeRef, ViewRequest
/// };
///
/// let mut graph = MetadataGraph::new();
/// graph.insert(
///     TypeDef::new("Customer")
///         .in_package("crate::model")
///         .with_field(FieldDef::new("name", TypeRef::named("String")))
/// );
/// graph.insert(
///     TypeDef::new("Order")
///         .in_package("crate::model")
///         .with_field(FieldDef::new("id", TypeRef::named("i64")))
///         .with_field(FieldDef::new("customer", TypeRef::parse("Option<Customer>").unwrap()))
/// );
///
/// let config = GeneratorConfig::default();
/// let sink = MemorySink::new();
/// let requests = [ViewRequest::new("Order").with_spec(
///     ProjectionSpec::new().field(ExplicitField::path("customerName", "customer.name"))
/// )];
///
/// let report = Generator::new(&graph, &config).run(&requests, &sink);
/// assert!(report.is_success());
/// assert_eq!(report.generated[0].name, "OrderView");
/// ```
pub struct Generator<'a, P: ?Sized> {
    provider: &'a P,
    config:   &'a GeneratorConfig
}

impl<'a, P> Generator<'a, P>
where
    P: TypeMetadataProvider + ?Sized
{
    /// Create a generator.
    pub fn new(provider: &'a P, config: &'a GeneratorConfig) -> Self {
        Self {
            provider,
            config
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Compose the field set of one view without rendering it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnknownType`] for an unknown source and
    /// any error raised while resolving its fields.
    pub fn compose(&self, source: &str, spec: &ProjectionSpec) -> Result<Composition, ResolutionError> {
        let ty = self.source_type(source)?;
        Composer::new(self.provider, self.classifier()).compose(ty, spec)
    }

    /// Compose, describe, and render one view.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Resolution`] when composition fails and
    /// [`SceneError::Emission`] when the view cannot be rendered.
    pub fn generate_scene(
        &self,
        source: &str,
        spec: &ProjectionSpec
    ) -> Result<SceneOutput, SceneError> {
        let ty = self.source_type(source)?;
        let composition = Composer::new(self.provider, self.classifier()).compose(ty, spec)?;
        let definition = Emitter::new(self.config).emit(ty, spec, &composition.fields);
        let unit = definition.to_unit(self.config)?;
        Ok(SceneOutput {
            definition,
            unit,
            warnings: composition.warnings
        })
    }

    /// Generate every requested view in parallel and write it to `sink`.
    ///
    /// Units are independent: a failure is logged and recorded in the
    /// report without affecting the others. Report entries keep request
    /// order.
    pub fn run<S>(&self, requests: &[ViewRequest], sink: &S) -> GenerationReport
    where
        P: Sync,
        S: OutputSink + ?Sized
    {
        let units: Vec<(&ViewRequest, &ProjectionSpec)> = requests
            .iter()
            .flat_map(|request| request.specs.iter().map(move |spec| (request, spec)))
            .collect();
        info!(sources = requests.len(), views = units.len(), "generating views");

        let outcomes: Vec<_> = units
            .par_iter()
            .map(|&(request, spec)| {
                let outcome = self
                    .generate_scene(&request.source, spec)
                    .and_then(|output| {
                        let view = GeneratedView {
                            source:  request.source.clone(),
                            scene:   spec.label().to_string(),
                            package: output.unit.package.clone(),
                            name:    output.unit.name.clone()
                        };
                        sink.write(output.unit)?;
                        Ok((view, output.warnings))
                    });
                (request, spec, outcome)
            })
            .collect();

        let mut report = GenerationReport::default();
        for (request, spec, outcome) in outcomes {
            match outcome {
                Ok((view, warnings)) => {
                    report.generated.push(view);
                    report.warnings.extend(warnings);
                }
                Err(err) => {
                    error!(source = %request.source, scene = spec.label(), error = %err, "view generation failed");
                    report.failures.push(SceneFailure {
                        source: request.source.clone(),
                        scene:  spec.label().to_string(),
                        error:  err
                    });
                }
            }
        }

        for request in requests {
            let generated: Vec<&str> = report
                .generated
                .iter()
                .filter(|view| view.source == request.source)
                .map(|view| view.name.as_str())
                .collect();
            if !generated.is_empty() {
                info!(source = %request.source, views = ?generated, "generated views");
            }
        }

        report
    }

    fn source_type(&self, source: &str) -> Result<&'a TypeDef, ResolutionError> {
        self.provider
            .type_def(source)
            .ok_or_else(|| ResolutionError::UnknownType {
                type_name: source.to_string()
            })
    }

    fn classifier(&self) -> Classifier<'a> {
        Classifier::new(&self.config.containers)
    }
}
