// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dotted path resolution.
//!
//! A path expression such as `customer.address.city` is resolved segment by
//! segment against the metadata provider:
//!
//! ```text
//! Order ──customer: Option<Customer>──▶ Customer ──address: Address──▶ Address ──city: String
//!        (optional step)                         (plain step)                  (terminal)
//! ```
//!
//! Each segment is looked up on the current type first, then on its parent
//! chain. An embedded parent (`via = Some("audit")`) adds a hop through the
//! embedding field; a `Deref` parent adds nothing. The walk performs at most
//! one lookup per segment, so cyclic graphs terminate.

use std::collections::HashSet;

use super::classify::{Classifier, TypeDescriptor};
use crate::{
    error::ResolutionError,
    metadata::{FieldDef, TypeDef, TypeMetadataProvider}
};

/// One field access in a generated accessor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessStep {
    /// Field name.
    pub name:     String,
    /// The field is an `Option` and is read with `and_then`.
    pub optional: bool
}

/// A fully resolved path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The expression as written.
    pub expression: String,

    /// Segments of the expression.
    pub segments: Vec<String>,

    /// Field accesses from the source to the terminal field, parent hops
    /// included.
    pub steps: Vec<AccessStep>,

    /// The terminal field.
    pub field: FieldDef,

    /// Qualified name of the type declaring the terminal field.
    pub owner: String,

    /// Shape of the terminal field type.
    pub descriptor: TypeDescriptor
}

impl ResolvedPath {
    /// Whether the expression has more than one segment.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// First segment, i.e. the own field the path traverses.
    pub fn head(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }
}

/// Resolves path expressions against a metadata provider.
pub struct PathResolver<'a, P: ?Sized> {
    provider:   &'a P,
    classifier: Classifier<'a>
}

impl<'a, P> PathResolver<'a, P>
where
    P: TypeMetadataProvider + ?Sized
{
    /// Create a resolver.
    pub fn new(provider: &'a P, classifier: Classifier<'a>) -> Self {
        Self {
            provider,
            classifier
        }
    }

    /// Resolve `expression` starting at `start`.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::FieldNotFound`] when a segment names no field on
    ///   the current type or its parents.
    /// - [`ResolutionError::NotTraversable`] when a non-terminal segment is a
    ///   container or a type the provider does not describe.
    pub fn resolve(
        &self,
        start: &'a TypeDef,
        expression: &str
    ) -> Result<ResolvedPath, ResolutionError> {
        let segments: Vec<String> = expression
            .split('.')
            .map(|segment| segment.trim().to_string())
            .collect();
        let (last, init) = segments
            .split_last()
            .ok_or_else(|| ResolutionError::FieldNotFound {
                type_name:  start.name.clone(),
                segment:    String::new(),
                expression: expression.to_string()
            })?;

        let mut current = start;
        let mut steps = Vec::new();

        for segment in init {
            let (_, field, hops) = self.lookup(current, segment, expression)?;
            let descriptor = self.classifier.classify(&field.ty);
            steps.extend(hops);
            steps.push(AccessStep {
                name:     field.name.clone(),
                optional: descriptor.optional
            });

            current = if descriptor.variable {
                start
            } else if descriptor.is_container() {
                return Err(not_traversable(field, segment, expression));
            } else {
                self.provider
                    .type_def(&descriptor.name)
                    .ok_or_else(|| not_traversable(field, segment, expression))?
            };
        }

        let (owner, field, hops) = self.lookup(current, last, expression)?;
        let descriptor = self.classifier.classify(&field.ty);
        steps.extend(hops);
        steps.push(AccessStep {
            name:     field.name.clone(),
            optional: descriptor.optional
        });

        Ok(ResolvedPath {
            expression: expression.to_string(),
            segments: segments.clone(),
            steps,
            field: field.clone(),
            owner: owner.qualified_name(),
            descriptor
        })
    }

    /// Find `segment` on `ty` or its parent chain.
    fn lookup(
        &self,
        ty: &'a TypeDef,
        segment: &str,
        expression: &str
    ) -> Result<(&'a TypeDef, &'a FieldDef, Vec<AccessStep>), ResolutionError> {
        let mut visited = HashSet::new();
        let mut hops = Vec::new();
        let mut current = ty;

        while visited.insert(current.qualified_name()) {
            if let Some(field) = self
                .provider
                .own_fields(current)
                .iter()
                .find(|field| field.name == segment)
            {
                return Ok((current, field, hops));
            }

            let (Some(link), Some(parent)) = (&current.parent, self.provider.parent(current))
            else {
                break;
            };
            if let Some(via) = &link.via {
                let optional = self
                    .provider
                    .own_fields(current)
                    .iter()
                    .find(|field| &field.name == via)
                    .is_some_and(|field| Classifier::peel(&field.ty).1);
                hops.push(AccessStep {
                    name: via.clone(),
                    optional
                });
            }
            current = parent;
        }

        Err(ResolutionError::FieldNotFound {
            type_name:  ty.name.clone(),
            segment:    segment.to_string(),
            expression: expression.to_string()
        })
    }
}

fn not_traversable(field: &FieldDef, segment: &str, expression: &str) -> ResolutionError {
    ResolutionError::NotTraversable {
        type_name:  field.ty.to_string(),
        segment:    segment.to_string(),
        expression: expression.to_string()
    }
}
