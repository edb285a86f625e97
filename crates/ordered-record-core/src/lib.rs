//! # ordered-record-core
//!
//! Core types and traits for ordered-record.
//!
//! This crate converts records into [`OrderedMap`]s whose keys follow the records' declared field
//! order, so serializing them keeps that order and never drops zero-valued fields. Values are
//! walked through the [`ToOrdered`] introspection trait, which exposes one level of structure at
//! a time as a [`Reflect`] view.

mod convert;
mod error;
mod map;
mod reflect;
mod shape;
mod value;

pub use convert::convert;
pub use error::{ConvertError, Result};
pub use map::OrderedMap;
pub use reflect::{Field, Opaque, Reflect, ToOrdered};
pub use shape::Shape;
pub use value::OrderedValue;
