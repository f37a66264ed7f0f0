// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative projection specification.

use convert_case::{Boundary, Case, Casing};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;

fn default_carry() -> bool {
    true
}

/// An explicitly declared view field.
///
/// | Field | Description |
/// |-------|-------------|
/// | `name` | Target field name; camelCase is normalized to snake_case |
/// | `expr` | Dotted path from the source (defaults to `name`) |
/// | `carry` | Copy passthrough attributes of the terminal field |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitField {
    /// Target field name.
    pub name: String,

    /// Path expression, e.g. `customer.address.city`.
    #[serde(default)]
    pub expr: Option<String>,

    /// Carry passthrough attributes of the terminal field.
    #[serde(default = "default_carry")]
    pub carry: bool
}

impl ExplicitField {
    /// A field read from the source field of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            expr:  None,
            carry: true
        }
    }

    /// A field read through a path expression.
    pub fn path(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            expr:  Some(expr.into()),
            carry: true
        }
    }

    /// Do not carry passthrough attributes.
    #[must_use]
    pub fn without_carry(mut self) -> Self {
        self.carry = false;
        self
    }

    /// The path expression, defaulting to the declared name.
    pub fn expression(&self) -> &str {
        match self.expr.as_deref() {
            Some(expr) if !expr.trim().is_empty() => expr.trim(),
            _ => &self.name
        }
    }

    /// Field name in the generated view.
    ///
    /// Names without uppercase letters are used as written. camelCase is
    /// converted to snake_case with digits attached to the preceding word,
    /// so `addressLine1` matches the source field `address_line1`.
    pub fn target_name(&self) -> String {
        if !self.name.chars().any(char::is_uppercase) {
            return self.name.clone();
        }
        self.name
            .remove_boundaries(&Boundary::digits())
            .to_case(Case::Snake)
    }
}

/// One projection of a source type (a "scene").
///
/// # Naming
///
/// | Spec | Generated name for `Order` |
/// |------|----------------------------|
/// | default | `OrderView` |
/// | `scene = "summary"` | `OrderSummaryView` |
/// | `grid` | `OrderGridView` (takes precedence over `scene`) |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionSpec {
    /// Target module path override.
    pub package: Option<String>,

    /// Scene name.
    pub scene: Option<String>,

    /// Field names dropped from auto-discovery.
    pub exclude: Vec<String>,

    /// Explicit declarations, in order.
    pub fields: Vec<ExplicitField>,

    /// Suppress auto-discovery.
    pub only_explicit: bool,

    /// Grid mode: discovery drops relationship fields instead of excluded ones.
    pub grid: bool
}

impl ProjectionSpec {
    /// Default spec: every discoverable field, no scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene name.
    #[must_use]
    pub fn scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    /// Set the target module path.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Exclude a field from discovery.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Add an explicit declaration.
    #[must_use]
    pub fn field(mut self, field: ExplicitField) -> Self {
        self.fields.push(field);
        self
    }

    /// Only include explicit declarations.
    #[must_use]
    pub fn only_explicit(mut self) -> Self {
        self.only_explicit = true;
        self
    }

    /// Switch to grid mode.
    #[must_use]
    pub fn grid(mut self) -> Self {
        self.grid = true;
        self
    }

    /// Scene name, ignoring blank names.
    pub fn scene_name(&self) -> Option<&str> {
        self.scene
            .as_deref()
            .map(str::trim)
            .filter(|scene| !scene.is_empty())
    }

    /// Label used in diagnostics.
    pub fn label(&self) -> &str {
        match self.scene_name() {
            Some(scene) => scene,
            None if self.grid => "grid",
            None => "default"
        }
    }

    /// Whether `name` is in the exclusion list.
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    /// Generated type name for a source named `base`.
    pub fn view_name(&self, base: &str, config: &GeneratorConfig) -> String {
        if self.grid {
            return format!("{base}{}", config.grid_suffix);
        }
        match self.scene_name() {
            Some(scene) => format!("{base}{}{}", scene.to_case(Case::Pascal), config.suffix),
            None => format!("{base}{}", config.suffix)
        }
    }
}
