//! Procedural macros for ordered-record.
//!
//! This crate provides the `ToOrdered` derive macro, which describes a struct's fields to the
//! converter in declaration order.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```ignore
//! #[derive(ordered_record::ToOrdered)]
//! struct User {
//!     pub id: u64,
//!     pub name: String,
//!     email: Option<String>,
//! }
//!
//! let map = ordered_record::convert(&user, false)?;
//! ```
//!
//! ## Custom Attributes
//!
//! ```ignore
//! #[derive(ordered_record::ToOrdered)]
//! #[ordered(rename_all = "camelCase")]
//! struct Config {
//!     #[ordered(rename = "port")]
//!     listen_port: u16,
//!
//!     #[ordered(skip)]
//!     cache: std::cell::RefCell<Vec<u8>>,
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{DeriveInput, parse_macro_input};

mod diagnostics;
mod record;
mod type_tree;

use record::Record;

/// Derive macro for converting structs into ordered maps.
///
/// This macro implements `ToOrdered` by reflecting every named field, in declaration order,
/// together with its serialization key and whether it is declared `pub`.
///
/// # Examples
///
/// ```ignore
/// #[derive(ordered_record::ToOrdered)]
/// struct Sample {
///     pub foo: String,
///     pub bar: i64,
/// }
/// ```
///
/// # Attributes
///
/// ## Container attributes (`#[ordered(...)]`)
///
/// * `rename_all = "..."` - Rename all fields (e.g., "camelCase", "SCREAMING_SNAKE_CASE")
/// * `bound = "..."` - Where predicates replacing the default `T: ToOrdered` bound on every
///   type parameter
///
/// ## Field attributes (`#[ordered(...)]`)
///
/// * `rename = "..."` - Emit this field under a different key
/// * `skip` - Leave the field out entirely; its type does not need to implement `ToOrdered`
///
/// # Key resolution
///
/// A field's key is the first of `#[ordered(rename)]`, `#[serde(rename)]`, the container
/// rename rule (`#[ordered(rename_all)]`, then `#[serde(rename_all)]`) applied to the field
/// name, and finally the field name itself. An empty rename falls back to the field name.
///
/// # Serde compatibility
///
/// Only serde's naming attributes are read. Encoding directives such as `skip_serializing_if`,
/// `skip` or `default` are ignored: every field is emitted, zero values included.
///
/// # Function fields
///
/// Fields holding `fn` pointers or `dyn Fn*` trait objects (also behind `Option`, `Box`, `Rc`,
/// `Arc` or a reference) are reflected as opaque and dropped by the converter, so their types
/// need no `ToOrdered` implementation.
#[proc_macro_derive(ToOrdered, attributes(ordered))]
pub fn derive_to_ordered(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match Record::new(input) {
        Ok(record) => record.into_token_stream().into(),
        Err(diagnostics) => diagnostics.into_token_stream().into(),
    }
}
