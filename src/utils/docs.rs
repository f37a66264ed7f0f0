// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation carry-over.
//!
//! Doc comments on source structs and fields are read as plain text when
//! metadata is built, and written back as `#[doc = "..."]` attributes on the
//! generated view:
//!
//! ```rust,ignore
//! /// Customer placing the order.
//! pub customer: Option<Customer>,
//!
//! // Read as:      Some("Customer placing the order.")
//! // Emitted as:   #[doc = " Customer placing the order."]
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, MetaNameValue};

/// Documentation text of a struct or field.
///
/// Joins `///`, `/** */` and `#[doc = "..."]` attributes line by line.
/// The indentation shared by all lines is removed and deeper indentation is
/// kept, so code blocks and nested lists survive. Paragraph breaks collapse
/// to one blank line; leading and trailing blank lines are dropped.
/// `#[doc(hidden)]` carries no text. Returns `None` when nothing is left.
pub fn docs_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(doc_value)
        .flat_map(|value| {
            value
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()?;

    let mut text = String::new();
    let mut paragraph = false;
    for line in &lines {
        if line.trim().is_empty() {
            paragraph = !text.is_empty();
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        if paragraph {
            text.push('\n');
            paragraph = false;
        }
        text.push_str(&line[indent..]);
    }
    Some(text)
}

fn doc_value(attr: &Attribute) -> Option<String> {
    if !attr.path().is_ident("doc") {
        return None;
    }
    match &attr.meta {
        Meta::NameValue(MetaNameValue {
            value: Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }),
            ..
        }) => Some(lit.value()),
        _ => None
    }
}

/// Render documentation text as one `#[doc]` attribute per line.
pub fn doc_attrs(docs: Option<&str>) -> Vec<TokenStream> {
    docs.map(|text| {
        text.lines()
            .map(|line| {
                let line = if line.is_empty() {
                    String::new()
                } else {
                    format!(" {line}")
                };
                quote! { #[doc = #line] }
            })
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attrs(input: &str) -> Vec<Attribute> {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        item.attrs
    }

    #[test]
    fn joins_lines() {
        let attrs = parse_attrs(
            r#"
            /// First line.
            /// Second line.
            struct Foo;
        "#
        );
        assert_eq!(docs_text(&attrs), Some("First line.\nSecond line.".to_string()));
    }

    #[test]
    fn keeps_one_blank_line_between_paragraphs() {
        let attrs = parse_attrs(
            r#"
            ///
            /// Summary.
            ///
            ///
            /// Details here.
            ///
            struct Foo;
        "#
        );
        assert_eq!(docs_text(&attrs), Some("Summary.\n\nDetails here.".to_string()));
    }

    #[test]
    fn keeps_relative_indentation() {
        let attrs = parse_attrs(
            r#"
            /// Usage:
            ///
            /// - outer
            ///   - inner
            struct Foo;
        "#
        );
        assert_eq!(
            docs_text(&attrs),
            Some("Usage:\n\n- outer\n  - inner".to_string())
        );
    }

    #[test]
    fn splits_multi_line_attributes() {
        let attrs = parse_attrs(
            r#"
            #[doc = "First.\nSecond."]
            #[doc(hidden)]
            struct Foo;
        "#
        );
        assert_eq!(docs_text(&attrs), Some("First.\nSecond.".to_string()));
    }

    #[test]
    fn no_docs() {
        let attrs = parse_attrs(
            r#"
            #[derive(Debug)]
            ///
            struct Foo;
        "#
        );
        assert_eq!(docs_text(&attrs), None);
    }

    #[test]
    fn doc_attrs_one_per_line() {
        let attrs = doc_attrs(Some("Summary.\n\nDetails."));
        assert_eq!(attrs.len(), 3);
        assert!(attrs[0].to_string().contains("\" Summary.\""));
        assert!(attrs[1].to_string().contains("\"\""));
    }

    #[test]
    fn doc_attrs_without_docs() {
        assert!(doc_attrs(None).is_empty());
    }
}
