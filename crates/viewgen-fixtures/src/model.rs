// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Order model.

use serde::Serialize;

/// A customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(viewgen, view)]
pub struct Customer {
    /// Display name.
    pub name: String,

    #[serde(rename = "mail")]
    pub email: Option<String>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(viewgen, view)]
pub struct Item {
    pub sku:      String,
    pub quantity: u32
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Auditable {
    pub created_by: String
}

/// A placed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(viewgen, view(field(name = "customerName", expr = "customer.name")))]
#[cfg_attr(viewgen, view(grid))]
#[cfg_attr(
    viewgen,
    view(
        scene = "summary",
        only_explicit,
        field(name = "id"),
        field(name = "customerEmail", expr = "customer.email"),
        field(name = "createdBy", expr = "created_by")
    )
)]
#[cfg_attr(viewgen, view(scene = "detail", exclude(notes)))]
pub struct Order {
    pub id: i64,

    pub title: String,

    #[cfg_attr(viewgen, view(project = "CustomerView"))]
    pub customer: Option<Customer>,

    #[serde(skip)]
    #[cfg_attr(viewgen, view(transient))]
    pub status: String,

    #[cfg_attr(viewgen, view(project = "ItemView"))]
    pub items: Vec<Item>,

    #[cfg_attr(viewgen, view(skip_in(summary)))]
    pub notes: String,

    #[cfg_attr(viewgen, view(parent))]
    pub audit: Auditable
}
