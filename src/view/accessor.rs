// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Null-safe accessor synthesis.
//!
//! Every view field is read from `source: Option<&Source>` through a chain
//! of `Option` combinators, so a missing link anywhere yields a default
//! value instead of a panic:
//!
//! | Step | Field style | Getter style |
//! |------|-------------|--------------|
//! | plain field | `.map(\|v\| &v.name)` | `.map(\|v\| v.name())` |
//! | `Option` field | `.and_then(\|v\| v.name.as_ref())` | `.and_then(\|v\| v.name())` |
//!
//! The chain is then closed according to the field's [`AccessorExpr`]:
//!
//! ```rust,ignore
//! // Chain
//! customer_name: source.and_then(|v| v.customer.as_ref()).map(|v| &v.name).cloned().unwrap_or_default(),
//! // ContainerSubstitution
//! items: source.map(|v| &v.items).map(|v| <ItemView>::from_list(v)).unwrap_or_default(),
//! // ScalarSubstitution
//! customer: <CustomerView>::from_source(source.and_then(|v| v.customer.as_ref())),
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{compose::ResolvedFieldDescriptor, resolve::AccessStep};
use crate::{
    config::{AccessorStyle, ContainerKind},
    error::EmissionError,
    utils::syntax
};

/// Field accesses from the source value to the terminal field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessChain {
    /// Steps in access order.
    pub steps: Vec<AccessStep>
}

impl AccessChain {
    /// Render the chain, starting at the `source` binding.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError::InvalidIdent`] for a step that is not a
    /// valid field or method name.
    pub fn to_tokens(&self, style: &AccessorStyle, view: &str) -> Result<TokenStream, EmissionError> {
        let mut tokens = quote! { source };
        for step in &self.steps {
            let access = match style {
                AccessorStyle::Field => {
                    let name = syntax::ident(&step.name, view)?;
                    if step.optional {
                        quote! { .and_then(|v| v.#name.as_ref()) }
                    } else {
                        quote! { .map(|v| &v.#name) }
                    }
                }
                AccessorStyle::Getter { prefix } => {
                    let method = syntax::ident(&format!("{prefix}{}", step.name), view)?;
                    if step.optional {
                        quote! { .and_then(|v| v.#method()) }
                    } else {
                        quote! { .map(|v| v.#method()) }
                    }
                }
            };
            tokens.extend(access);
        }
        Ok(tokens)
    }
}

/// How one view field is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorExpr {
    /// Clone the terminal value, defaulting when a link is absent.
    Chain {
        /// Access chain.
        chain:    AccessChain,
        /// The terminal field is an `Option` and is kept as one.
        optional: bool
    },

    /// Convert a container element-wise through another view.
    ContainerSubstitution {
        /// Access chain to the container.
        chain:      AccessChain,
        /// View type converting the elements.
        projection: String,
        /// Selects `from_list` or `from_collection`.
        kind:       ContainerKind
    },

    /// Convert a nested record through another view.
    ScalarSubstitution {
        /// Access chain to the record.
        chain:      AccessChain,
        /// View type converting the record.
        projection: String
    }
}

/// Build the accessor of a composed field.
pub fn synthesize(field: &ResolvedFieldDescriptor) -> AccessorExpr {
    let chain = AccessChain {
        steps: field.path.steps.clone()
    };
    let descriptor = field.descriptor();
    match (&field.substitution, descriptor.container) {
        (Some(substitution), Some(kind)) => AccessorExpr::ContainerSubstitution {
            chain,
            projection: substitution.projection.clone(),
            kind
        },
        (Some(substitution), None) => AccessorExpr::ScalarSubstitution {
            chain,
            projection: substitution.projection.clone()
        },
        (None, _) => AccessorExpr::Chain {
            chain,
            optional: descriptor.optional
        }
    }
}

impl AccessorExpr {
    /// Render the field initializer expression.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError`] when a step or projection name cannot be
    /// parsed.
    pub fn to_tokens(&self, style: &AccessorStyle, view: &str) -> Result<TokenStream, EmissionError> {
        match self {
            Self::Chain {
                chain,
                optional
            } => {
                let chain = chain.to_tokens(style, view)?;
                Ok(if *optional {
                    quote! { #chain.cloned() }
                } else {
                    quote! { #chain.cloned().unwrap_or_default() }
                })
            }
            Self::ContainerSubstitution {
                chain,
                projection,
                kind
            } => {
                let chain = chain.to_tokens(style, view)?;
                let projection = syntax::ty(projection, view)?;
                let entry = format_ident!("{}", kind.entry());
                Ok(quote! { #chain.map(|v| <#projection>::#entry(v)).unwrap_or_default() })
            }
            Self::ScalarSubstitution {
                chain,
                projection
            } => {
                let chain = chain.to_tokens(style, view)?;
                let projection = syntax::ty(projection, view)?;
                Ok(quote! { <#projection>::from_source(#chain) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, optional: bool) -> AccessStep {
        AccessStep {
            name: name.to_string(),
            optional
        }
    }

    fn chain(steps: &[(&str, bool)]) -> AccessChain {
        AccessChain {
            steps: steps.iter().map(|(n, o)| step(n, *o)).collect()
        }
    }

    #[test]
    fn plain_chain_defaults() {
        let expr = AccessorExpr::Chain {
            chain:    chain(&[("customer", true), ("name", false)]),
            optional: false
        };
        let tokens = expr.to_tokens(&AccessorStyle::Field, "OrderView").unwrap();
        let expected = quote! {
            source.and_then(|v| v.customer.as_ref()).map(|v| &v.name).cloned().unwrap_or_default()
        };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn optional_terminal_stays_optional() {
        let expr = AccessorExpr::Chain {
            chain:    chain(&[("email", true)]),
            optional: true
        };
        let tokens = expr.to_tokens(&AccessorStyle::Field, "V").unwrap();
        let expected = quote! { source.and_then(|v| v.email.as_ref()).cloned() };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn getter_style() {
        let expr = AccessorExpr::Chain {
            chain:    chain(&[("customer", true), ("name", false)]),
            optional: false
        };
        let style = AccessorStyle::Getter {
            prefix: "get_".to_string()
        };
        let tokens = expr.to_tokens(&style, "V").unwrap();
        let expected = quote! {
            source.and_then(|v| v.get_customer()).map(|v| v.get_name()).cloned().unwrap_or_default()
        };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn container_substitution() {
        let expr = AccessorExpr::ContainerSubstitution {
            chain:      chain(&[("items", false)]),
            projection: "ItemView".to_string(),
            kind:       ContainerKind::Collection
        };
        let tokens = expr.to_tokens(&AccessorStyle::Field, "V").unwrap();
        let expected = quote! {
            source.map(|v| &v.items).map(|v| <ItemView>::from_collection(v)).unwrap_or_default()
        };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn scalar_substitution() {
        let expr = AccessorExpr::ScalarSubstitution {
            chain:      chain(&[("customer", true)]),
            projection: "crate::views::CustomerView".to_string()
        };
        let tokens = expr.to_tokens(&AccessorStyle::Field, "V").unwrap();
        let expected = quote! {
            <crate::views::CustomerView>::from_source(source.and_then(|v| v.customer.as_ref()))
        };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn keyword_fields_use_raw_identifiers() {
        let tokens = chain(&[("type", false)])
            .to_tokens(&AccessorStyle::Field, "V")
            .unwrap();
        assert!(tokens.to_string().contains("r#type"));
    }

    #[test]
    fn invalid_projection_is_an_emission_error() {
        let expr = AccessorExpr::ScalarSubstitution {
            chain:      chain(&[("customer", true)]),
            projection: "Customer View".to_string()
        };
        assert!(matches!(
            expr.to_tokens(&AccessorStyle::Field, "OrderView"),
            Err(EmissionError::InvalidType { .. })
        ));
    }
}
