//! # ordered-record
//!
//! Convert records into insertion-ordered maps that keep declared field order.
//!
//! This crate provides the main API, re-exporting all types from the `ordered-record-core`
//! crate and the `ToOrdered` derive macro from `ordered-record-derive` (when the `macros`
//! feature is enabled).
//!
//! ```ignore
//! use ordered_record::ToOrdered;
//!
//! #[derive(serde::Serialize, ToOrdered)]
//! struct Settings {
//!     #[serde(rename = "foo", skip_serializing_if = "String::is_empty")]
//!     pub foo: String,
//!     #[serde(rename = "bar", skip_serializing_if = "is_zero")]
//!     pub bar: i64,
//! }
//!
//! let settings = Settings { foo: String::new(), bar: 0 };
//! assert_eq!(serde_json::to_string(&settings)?, "{}");
//!
//! let map = ordered_record::convert(&settings, false)?.expect("records are never null");
//! assert_eq!(serde_json::to_string(&map)?, r#"{"foo":"","bar":0}"#);
//! ```

// Re-export ordered_record_core for the derive macro (generated code references ::ordered_record)
#[doc(hidden)]
pub use ordered_record_core;
// Re-export all main types at the crate root for convenience
pub use ordered_record_core::{
    ConvertError, Field, Opaque, OrderedMap, OrderedValue, Reflect, Result, Shape, ToOrdered,
    convert,
};
// Re-export the derive macro when the macros feature is enabled
#[cfg(feature = "macros")]
#[cfg_attr(docsrs, doc(cfg(feature = "macros")))]
pub use ordered_record_derive::ToOrdered;
