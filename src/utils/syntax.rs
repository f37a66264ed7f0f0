// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Checked conversion of metadata strings into syn nodes.
//!
//! Metadata arrives as plain text, so every name, type, and attribute is
//! parsed before it reaches `quote!`. Failures become [`EmissionError`]s
//! naming the view being emitted instead of panics inside `format_ident!`.

use syn::{Ident, Meta, Path, Type};

use crate::error::EmissionError;

/// Parse an identifier, retrying as a raw identifier for keywords.
pub fn ident(name: &str, view: &str) -> Result<Ident, EmissionError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| EmissionError::InvalidIdent {
            view: view.to_string(),
            name: name.to_string()
        })
}

/// Parse type text.
pub fn ty(text: &str, view: &str) -> Result<Type, EmissionError> {
    syn::parse_str::<Type>(text).map_err(|err| EmissionError::InvalidType {
        view:   view.to_string(),
        ty:     text.to_string(),
        reason: err.to_string()
    })
}

/// Parse a path such as `crate::views::ItemView` or `serde::Serialize`.
pub fn path(text: &str, view: &str) -> Result<Path, EmissionError> {
    syn::parse_str::<Path>(text).map_err(|err| EmissionError::InvalidType {
        view:   view.to_string(),
        ty:     text.to_string(),
        reason: err.to_string()
    })
}

/// Parse attribute meta text such as `serde(rename = "id")`.
pub fn meta(text: &str, view: &str) -> Result<Meta, EmissionError> {
    syn::parse_str::<Meta>(text).map_err(|err| EmissionError::InvalidAttribute {
        view:   view.to_string(),
        attr:   text.to_string(),
        reason: err.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(ident("type", "V").unwrap().to_string(), "r#type");
        assert_eq!(ident("r#type", "V").unwrap().to_string(), "r#type");
        assert_eq!(ident("name", "V").unwrap().to_string(), "name");
    }

    #[test]
    fn invalid_identifier_names_the_view() {
        let err = ident("customer-name", "OrderView").unwrap_err();
        assert!(matches!(
            err,
            EmissionError::InvalidIdent { ref view, ref name } if view == "OrderView" && name == "customer-name"
        ));
    }

    #[test]
    fn invalid_type_text() {
        assert!(ty("Vec<", "V").is_err());
        assert!(ty("Vec<crate::model::Item>", "V").is_ok());
    }

    #[test]
    fn attribute_meta() {
        assert!(meta("serde(rename = \"id\")", "V").is_ok());
        assert!(matches!(meta("serde(", "V"), Err(EmissionError::InvalidAttribute { .. })));
    }
}
