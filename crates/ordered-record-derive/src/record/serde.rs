//! Serde attribute parsing for key naming.
//!
//! Only the attributes that decide a field's serialized name are read: `rename` on fields and
//! `rename_all` on containers. Every other serde attribute is consumed and ignored; encoding
//! directives like `skip_serializing_if` are exactly what the converter bypasses.

use syn::{Attribute, LitStr, Token, meta::ParseNestedMeta};

use crate::diagnostics::Diagnostics;

/// Attributes defined within a `#[serde(...)]` container attribute.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct SerdeContainer {
    /// Rename rule for all fields
    pub rename_all: Option<RenameRule>,
}

impl SerdeContainer {
    fn parse_attribute(&mut self, attr: &Attribute) -> syn::Result<()> {
        if !attr.path().is_ident("serde") {
            return Ok(());
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(rule) = parse_serialize_name(&meta)? {
                    self.rename_all = Some(RenameRule::from_lit(&rule)?);
                }
            } else {
                skip_value(&meta)?;
            }

            Ok(())
        })
    }
}

/// Parse serde container attributes from a list of attributes
pub fn parse_container(attributes: &[Attribute]) -> syn::Result<SerdeContainer> {
    let mut container = SerdeContainer::default();

    for attr in attributes {
        container.parse_attribute(attr)?;
    }

    Ok(container)
}

/// Attributes defined within a `#[serde(...)]` field attribute.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SerdeValue {
    /// Serialized field name
    pub rename: Option<String>,
}

impl SerdeValue {
    fn parse_attribute(&mut self, attr: &Attribute) -> syn::Result<()> {
        if !attr.path().is_ident("serde") {
            return Ok(());
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = parse_serialize_name(&meta)? {
                    self.rename = Some(name.value());
                }
            } else {
                skip_value(&meta)?;
            }

            Ok(())
        })
    }
}

/// Parse serde field attributes from a list of attributes
pub fn parse_value(attributes: &[Attribute]) -> syn::Result<SerdeValue> {
    let mut value = SerdeValue::default();

    for attr in attributes {
        value.parse_attribute(attr)?;
    }

    Ok(value)
}

/// Read `key = "..."` or `key(serialize = "...", deserialize = "...")`, keeping the serialize
/// side.
fn parse_serialize_name(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }

    let mut serialize = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            serialize = Some(nested.value()?.parse()?);
        } else {
            skip_value(&nested)?;
        }
        Ok(())
    })?;

    Ok(serialize)
}

/// Consume whatever follows an attribute key we do not interpret.
fn skip_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }

    Ok(())
}

/// A `rename_all` rule, applied to field names the way serde applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lowercase,
    Uppercase,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

const RENAME_RULES: &[(&str, RenameRule)] = &[
    ("lowercase", RenameRule::Lowercase),
    ("UPPERCASE", RenameRule::Uppercase),
    ("PascalCase", RenameRule::PascalCase),
    ("camelCase", RenameRule::CamelCase),
    ("snake_case", RenameRule::SnakeCase),
    ("SCREAMING_SNAKE_CASE", RenameRule::ScreamingSnakeCase),
    ("kebab-case", RenameRule::KebabCase),
    ("SCREAMING-KEBAB-CASE", RenameRule::ScreamingKebabCase),
];

impl RenameRule {
    pub fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        let value = lit.value();
        if let Some((_, rule)) = RENAME_RULES.iter().find(|(name, _)| *name == value) {
            return Ok(*rule);
        }

        let valid = RENAME_RULES
            .iter()
            .map(|(name, _)| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(
            Diagnostics::with_span(lit.span(), format!("Unknown rename rule: {value}"))
                .help(format!("Valid rename rules are {valid}"))
                .into(),
        )
    }

    /// Rename a field, assumed to be written in snake_case.
    ///
    /// Field names that are not snake_case pass through the case-preserving rules unchanged,
    /// so keys match serde's for the same `rename_all`.
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::Lowercase | Self::SnakeCase => field.to_owned(),
            Self::Uppercase | Self::ScreamingSnakeCase => field.to_ascii_uppercase(),
            Self::PascalCase => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            Self::CamelCase => {
                let pascal = Self::PascalCase.apply_to_field(field);
                let mut chars = pascal.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_lowercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            }
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}
