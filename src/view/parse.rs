// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projection specifications and the Rust source frontend.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── spec.rs    - ProjectionSpec / ExplicitField (the declarative surface)
//! └── source.rs  - SourceModel: syn + darling over `#[view(...)]` sources
//! ```
//!
//! A [`ProjectionSpec`] can be built in code, deserialized with serde, or
//! read from a struct attribute by [`SourceModel`]:
//!
//! ```rust,ignore
//! #[view(
//!     scene = "summary",
//!     exclude(internal_note),
//!     field(name = "customer_name", expr = "customer.name")
//! )]
//! pub struct Order { /* ... */ }
//!
//! // Parses to:
//! // ProjectionSpec {
//! //     scene: Some("summary"),
//! //     exclude: ["internal_note"],
//! //     fields: [ExplicitField { name: "customer_name", expr: Some("customer.name"), carry: true }],
//! //     only_explicit: false,
//! //     grid: false,
//! //     package: None
//! // }
//! ```

mod source;
mod spec;

pub use source::SourceModel;
pub use spec::{ExplicitField, ProjectionSpec};
