// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for code generation.
//!
//! # Submodules
//!
//! - [`docs`] - Doc comment extraction from source attributes
//! - [`fields`] - Field definitions and assignments of generated views
//! - [`marker`] - Generated code markers
//! - [`syntax`] - Checked conversion of names and type text into syn nodes

pub mod docs;
pub mod fields;
pub mod marker;
pub mod syntax;
