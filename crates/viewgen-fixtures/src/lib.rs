// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Annotated model and the views generated from it by `build.rs`.

pub mod model;

/// Generated views.
pub mod views {
    include!(concat!(env!("OUT_DIR"), "/views.rs"));
}
