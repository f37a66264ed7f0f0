// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust source frontend.
//!
//! Reads struct definitions with `syn` and `#[view(...)]` attributes with
//! `darling`, producing a [`MetadataGraph`] of every named struct and one
//! [`ViewRequest`] per annotated struct.
//!
//! # Attributes
//!
//! | Level | Attribute | Effect |
//! |-------|-----------|--------|
//! | struct | `#[view]` | Default view |
//! | struct | `#[view(scene = "..", package = "..")]` | Named scene, target module |
//! | struct | `#[view(exclude(a, b))]` | Drop fields from discovery |
//! | struct | `#[view(field(name = "..", expr = "..", carry = false))]` | Explicit field (repeatable) |
//! | struct | `#[view(only_explicit)]`, `#[view(grid)]` | Discovery mode |
//! | field | `#[view(skip)]`, `#[view(skip_in(a, b))]` | Exclusion marker |
//! | field | `#[view(transient)]`, `#[view(relation)]` | Transient / relationship marker |
//! | field | `#[view(parent)]` | Field embeds the parent type |
//! | field | `#[view(project = "ItemView")]` | Substitute another view |
//!
//! `view` is not a real attribute, so annotated sources that must still
//! compile write it as `#[cfg_attr(viewgen, view(...))]`; both forms are
//! accepted.

use darling::{
    FromMeta,
    util::{Flag, PathList}
};
use quote::ToTokens;
use syn::{Attribute, Fields, Item, ItemStruct, Meta, Path, Token, punctuated::Punctuated};

use super::spec::{ExplicitField, ProjectionSpec};
use crate::{
    config::GeneratorConfig,
    error::SourceError,
    metadata::{FieldDef, FieldMarkers, MetadataGraph, ParentLink, TypeDef, TypeRef},
    utils::docs::docs_text,
    view::{ViewRequest, classify::Classifier}
};

/// Struct-level `#[view(...)]`.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
struct ViewAttr {
    package:       Option<String>,
    scene:         Option<String>,
    exclude:       PathList,
    #[darling(multiple, rename = "field")]
    fields:        Vec<FieldAttr>,
    only_explicit: Flag,
    grid:          Flag
}

/// `field(name = "..", expr = "..", carry = ..)` inside a struct-level view.
#[derive(Debug, FromMeta)]
struct FieldAttr {
    name:  String,
    #[darling(default)]
    expr:  Option<String>,
    #[darling(default)]
    carry: Option<bool>
}

/// Field-level `#[view(...)]`.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
struct FieldViewAttr {
    skip:      Flag,
    skip_in:   PathList,
    transient: Flag,
    relation:  Flag,
    parent:    Flag,
    project:   Option<String>
}

impl From<ViewAttr> for ProjectionSpec {
    fn from(attr: ViewAttr) -> Self {
        Self {
            package:       attr.package,
            scene:         attr.scene,
            exclude:       attr.exclude.iter().map(path_name).collect(),
            fields:        attr
                .fields
                .into_iter()
                .map(|f| ExplicitField {
                    name:  f.name,
                    expr:  f.expr,
                    carry: f.carry.unwrap_or(true)
                })
                .collect(),
            only_explicit: attr.only_explicit.is_present(),
            grid:          attr.grid.is_present()
        }
    }
}

/// Metadata and view requests read from Rust sources.
///
/// # Example
///
/// ```rust
/// use viewgen::{GeneratorConfig, SourceModel, TypeMetadataProvider};
///
/// let model = SourceModel::from_source(
///     "crate::model",
///     r#"
///         pub struct Customer { pub name: String }
///
///         #[cfg_attr(viewgen, view(field(name = "customerName", expr = "customer.name")))]
///         pub struct Order {
///             pub id: i64,
///             pub customer: Option<Customer>,
///         }
///     "#,
///     &GeneratorConfig::default()
/// )
/// .unwrap();
///
/// assert!(model.graph().type_def("crate::model::Customer").is_some());
/// assert_eq!(model.requests()[0].source, "crate::model::Order");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    graph:    MetadataGraph,
    requests: Vec<ViewRequest>
}

impl SourceModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one file whose items live in module `package`.
    ///
    /// # Errors
    ///
    /// See [`add_source`](Self::add_source).
    pub fn from_source(
        package: &str,
        source: &str,
        config: &GeneratorConfig
    ) -> Result<Self, SourceError> {
        let mut model = Self::new();
        model.add_source(package, source, config)?;
        Ok(model)
    }

    /// Parse a file and add its structs.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] when `source` is not valid Rust and
    /// [`SourceError::Attribute`] with every malformed `#[view]` attribute.
    pub fn add_source(
        &mut self,
        package: &str,
        source: &str,
        config: &GeneratorConfig
    ) -> Result<(), SourceError> {
        let file = syn::parse_file(source)?;
        self.add_items(package, &file.items, config)
    }

    /// Add the structs of already parsed items, descending into inline
    /// modules.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Attribute`] with every malformed `#[view]`
    /// attribute.
    pub fn add_items(
        &mut self,
        package: &str,
        items: &[Item],
        config: &GeneratorConfig
    ) -> Result<(), SourceError> {
        let mut errors = darling::Error::accumulator();
        self.collect(package, items, config, &mut errors);
        errors.finish()?;
        Ok(())
    }

    /// Metadata of every struct read so far.
    pub fn graph(&self) -> &MetadataGraph {
        &self.graph
    }

    /// One request per annotated struct, in source order.
    pub fn requests(&self) -> &[ViewRequest] {
        &self.requests
    }

    /// Split into the graph and the requests.
    pub fn into_parts(self) -> (MetadataGraph, Vec<ViewRequest>) {
        (self.graph, self.requests)
    }

    fn collect(
        &mut self,
        package: &str,
        items: &[Item],
        config: &GeneratorConfig,
        errors: &mut darling::error::Accumulator
    ) {
        for item in items {
            match item {
                Item::Struct(item) => self.add_struct(package, item, config, errors),
                Item::Mod(module) => {
                    if let Some((_, nested)) = &module.content {
                        let package = if package.is_empty() {
                            module.ident.to_string()
                        } else {
                            format!("{package}::{}", module.ident)
                        };
                        self.collect(&package, nested, config, errors);
                    }
                }
                _ => {}
            }
        }
    }

    fn add_struct(
        &mut self,
        package: &str,
        item: &ItemStruct,
        config: &GeneratorConfig,
        errors: &mut darling::error::Accumulator
    ) {
        let named = match &item.fields {
            Fields::Named(named) => Some(named),
            Fields::Unit => None,
            Fields::Unnamed(_) => return
        };
        let generics: Vec<String> = item
            .generics
            .type_params()
            .map(|param| param.ident.to_string())
            .collect();

        let mut ty = TypeDef::new(item.ident.to_string()).in_package(package);
        ty.generics = generics.clone();
        ty.docs = docs_text(&item.attrs);
        ty.attrs = passthrough(&item.attrs, config);

        for field in named.into_iter().flat_map(|named| &named.named) {
            let Some(ident) = &field.ident else {
                continue;
            };
            let name = ident.to_string();
            let field_ty = TypeRef::from_syn(&field.ty, &generics);

            let mut markers = FieldMarkers::default();
            for meta in view_metas(&field.attrs) {
                let Some(attr) = errors.handle(parse_view::<FieldViewAttr>(&meta)) else {
                    continue;
                };
                if attr.skip.is_present() {
                    markers.exclude = Some(Vec::new());
                } else if !attr.skip_in.is_empty() && markers.exclude.is_none() {
                    markers.exclude = Some(attr.skip_in.iter().map(path_name).collect());
                }
                markers.transient |= attr.transient.is_present();
                markers.relation |= attr.relation.is_present();
                if attr.project.is_some() {
                    markers.project = attr.project;
                }
                if attr.parent.is_present() {
                    ty.parent = Some(ParentLink {
                        type_name: Classifier::peel(&field_ty).0.path().to_string(),
                        via:       Some(name.clone())
                    });
                }
            }

            let mut def = FieldDef::new(name, field_ty).with_markers(markers);
            def.docs = docs_text(&field.attrs);
            def.attrs = passthrough(&field.attrs, config);
            ty.fields.push(def);
        }

        let specs: Vec<ProjectionSpec> = view_metas(&item.attrs)
            .iter()
            .filter_map(|meta| errors.handle(parse_view::<ViewAttr>(meta)))
            .map(ProjectionSpec::from)
            .collect();
        if !specs.is_empty() {
            self.requests.push(ViewRequest {
                source: ty.qualified_name(),
                specs
            });
        }
        self.graph.insert(ty);
    }
}

/// Parse a `view` meta; a bare `view` is the default.
fn parse_view<T: FromMeta + Default>(meta: &Meta) -> darling::Result<T> {
    match meta {
        Meta::Path(_) => Ok(T::default()),
        _ => T::from_meta(meta).map_err(|err| err.with_span(meta))
    }
}

/// `view` metas written directly or inside `cfg_attr(.., view(..))`.
fn view_metas(attrs: &[Attribute]) -> Vec<Meta> {
    let mut metas = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("view") {
            metas.push(attr.meta.clone());
        } else if attr.path().is_ident("cfg_attr")
            && let Ok(nested) =
                attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        {
            metas.extend(
                nested
                    .into_iter()
                    .skip(1)
                    .filter(|meta| meta.path().is_ident("view"))
            );
        }
    }
    metas
}

/// Passthrough attributes as meta text.
fn passthrough(attrs: &[Attribute], config: &GeneratorConfig) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| {
            attr.path()
                .get_ident()
                .is_some_and(|ident| config.is_passthrough(&ident.to_string()))
        })
        .map(|attr| attr.meta.to_token_stream().to_string())
        .collect()
}

fn path_name(path: &Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}
