// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field set composition.
//!
//! Merges explicit declarations with the auto-discovered fields of the
//! source type:
//!
//! ```text
//! explicit ──resolve──▶ [customer_name ← customer.name]
//!                                │
//! discovered ──filter──▶ [id, customer, status]
//!                         │   │         └── transient: dropped
//!                         │   └── traversed by customer.name: absorbed
//!                         └── kept
//!                                │
//! merged ───────────────▶ [customer_name, id]
//! ```
//!
//! | Rule | Normal mode | Grid mode |
//! |------|-------------|-----------|
//! | `exclude` names | dropped | kept |
//! | `skip` / `skip_in` marker | dropped when it applies to the scene | kept |
//! | `transient` marker | dropped | dropped |
//! | relationships | kept | dropped |
//! | parent embedding field | dropped | dropped |
//! | first segment of a nested explicit path | dropped | dropped |
//!
//! Explicit declarations are exempt from every rule above.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use super::{
    classify::{Classifier, TypeDescriptor},
    parse::ProjectionSpec,
    resolve::{PathResolver, ResolvedPath}
};
use crate::{
    error::{ConfigWarning, ResolutionError},
    metadata::{FieldDef, TypeDef, TypeMetadataProvider}
};

/// Where a composed field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    /// Declared in the projection spec.
    Explicit,
    /// Found on the source type.
    Discovered
}

/// Replacement of a field type by another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// View type path, e.g. `ItemView`.
    pub projection: String,

    /// Type names replaced by the view. For containers, the element
    /// arguments; for scalars, the field type itself.
    pub replaces: BTreeSet<String>
}

/// A field of the view being composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFieldDescriptor {
    /// Field name in the view.
    pub name: String,

    /// Resolved source path.
    pub path: ResolvedPath,

    /// Substitution requested by the terminal field.
    pub substitution: Option<Substitution>,

    /// Carried documentation.
    pub docs: Option<String>,

    /// Carried passthrough attributes.
    pub attrs: Vec<String>,

    /// Origin.
    pub origin: FieldOrigin
}

impl ResolvedFieldDescriptor {
    /// Shape of the terminal field type.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.path.descriptor
    }

    /// Source path expression.
    pub fn expression(&self) -> &str {
        &self.path.expression
    }
}

/// Result of composing one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    /// Fields in emission order.
    pub fields:   Vec<ResolvedFieldDescriptor>,
    /// Non-fatal issues.
    pub warnings: Vec<ConfigWarning>
}

impl Composition {
    /// Field names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Builds the field set of a view.
pub struct Composer<'a, P: ?Sized> {
    provider:   &'a P,
    classifier: Classifier<'a>
}

impl<'a, P> Composer<'a, P>
where
    P: TypeMetadataProvider + ?Sized
{
    /// Create a composer.
    pub fn new(provider: &'a P, classifier: Classifier<'a>) -> Self {
        Self {
            provider,
            classifier
        }
    }

    /// Compose the fields of `spec` over `source`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolutionError`] raised by an explicit
    /// declaration or by a discovered field.
    pub fn compose(
        &self,
        source: &'a TypeDef,
        spec: &ProjectionSpec
    ) -> Result<Composition, ResolutionError> {
        let resolver = PathResolver::new(self.provider, self.classifier);
        let scene = spec.label();
        let mut composition = Composition::default();
        let mut taken = HashSet::new();
        let mut absorbed = HashSet::new();

        for explicit in &spec.fields {
            let name = explicit.target_name();
            if !taken.insert(name.clone()) {
                composition.warnings.push(ConfigWarning::DuplicateExplicit {
                    source_type: source.name.clone(),
                    scene:       scene.to_string(),
                    name
                });
                continue;
            }

            let path = resolver.resolve(source, explicit.expression())?;
            if path.is_nested() {
                absorbed.insert(path.head().to_string());
            }
            let attrs = if explicit.carry {
                path.field.attrs.clone()
            } else {
                Vec::new()
            };
            composition.fields.push(ResolvedFieldDescriptor {
                substitution: self.substitution(&path),
                docs: path.field.docs.clone(),
                attrs,
                name,
                path,
                origin: FieldOrigin::Explicit
            });
        }

        if !spec.only_explicit {
            let via = source.parent.as_ref().and_then(|link| link.via.as_deref());
            for field in self.provider.own_fields(source) {
                if via == Some(field.name.as_str()) || !self.discoverable(field, spec) {
                    continue;
                }
                if taken.contains(&field.name) {
                    composition.warnings.push(ConfigWarning::Shadowed {
                        source_type: source.name.clone(),
                        scene:       scene.to_string(),
                        name:        field.name.clone()
                    });
                    continue;
                }
                if absorbed.contains(&field.name) {
                    debug!(source = %source.name, scene, field = %field.name, "absorbed by nested path");
                    continue;
                }

                let path = resolver.resolve(source, &field.name)?;
                taken.insert(field.name.clone());
                composition.fields.push(ResolvedFieldDescriptor {
                    name: field.name.clone(),
                    substitution: self.substitution(&path),
                    docs: field.docs.clone(),
                    attrs: field.attrs.clone(),
                    path,
                    origin: FieldOrigin::Discovered
                });
            }
        }

        for field in &composition.fields {
            debug!(
                source = %source.name,
                scene,
                field = %field.name,
                expression = field.expression(),
                origin = ?field.origin,
                "composed field"
            );
        }
        for warning in &composition.warnings {
            warn!(source = %source.name, scene, "{warning}");
        }

        Ok(composition)
    }

    /// Whether a discovered field survives the mode's exclusion rules.
    fn discoverable(&self, field: &FieldDef, spec: &ProjectionSpec) -> bool {
        if field.markers.transient {
            return false;
        }
        if spec.grid {
            return !self.is_relationship(field);
        }
        !spec.excludes(&field.name) && !field.markers.excludes_scene(spec.scene_name())
    }

    fn is_relationship(&self, field: &FieldDef) -> bool {
        if field.markers.relation {
            return true;
        }
        let descriptor = self.classifier.classify(&field.ty);
        if descriptor.is_container() {
            descriptor.args.iter().any(|arg| self.provider.is_record(arg))
        } else {
            !descriptor.variable && self.provider.is_record(&descriptor.name)
        }
    }

    fn substitution(&self, path: &ResolvedPath) -> Option<Substitution> {
        let projection = self.classifier.classify_field(&path.field).substitution?;
        let descriptor = &path.descriptor;
        let replaces = if descriptor.is_container() {
            let records: BTreeSet<String> = descriptor
                .args
                .iter()
                .filter(|arg| self.provider.is_record(arg))
                .cloned()
                .collect();
            if records.is_empty() {
                descriptor.args.clone()
            } else {
                records
            }
        } else {
            BTreeSet::from([descriptor.name.clone()])
        };
        Some(Substitution {
            projection,
            replaces
        })
    }
}
