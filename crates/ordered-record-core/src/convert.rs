//! The record to ordered-map converter.

use crate::{ConvertError, OrderedMap, OrderedValue, Reflect, ToOrdered, error::Result};

/// Convert a record, or a reference to one, into an [`OrderedMap`].
///
/// Fields are emitted in declaration order under their serialization key, zero values
/// included. Fields of an unsupported shape (channels, functions, raw pointers) are dropped, as
/// are non-`pub` fields when `public_only` is set. Keyed collections nested anywhere in the
/// record are emitted with their keys sorted.
///
/// Returns `Ok(None)` when `value` is a null reference (`None`, JSON `null`).
///
/// # Errors
///
/// [`ConvertError::UnsupportedType`] when `value` is neither a record nor a reference to one.
/// [`ConvertError::InvariantViolation`] when a keyed collection holds two keys with the same
/// string form, or a field holds a non-null reference to an opaque value.
///
/// # Examples
///
/// ```ignore
/// #[derive(ToOrdered)]
/// struct Point {
///     pub y: i32,
///     pub x: i32,
/// }
///
/// let map = convert(&Point { y: 0, x: 0 }, true)?.expect("records are never null");
/// assert_eq!(serde_json::to_string(&map)?, r#"{"y":0,"x":0}"#);
/// ```
pub fn convert<T>(value: &T, public_only: bool) -> Result<Option<OrderedMap>>
where
    T: ToOrdered + ?Sized,
{
    let mut current = value.reflect();
    loop {
        current = match current {
            Reflect::Pointer(None) | Reflect::Interface(None) => return Ok(None),
            Reflect::Pointer(Some(referent)) | Reflect::Interface(Some(referent)) => *referent,
            record @ Reflect::Struct(_) => return convert_record(record, public_only).map(Some),
            other => {
                return Err(ConvertError::UnsupportedType {
                    shape: other.shape(),
                });
            }
        };
    }
}

fn convert_record(value: Reflect<'_>, public_only: bool) -> Result<OrderedMap> {
    let shape = value.shape();
    let Reflect::Struct(fields) = value else {
        return Err(ConvertError::invariant(format!(
            "argument must be struct, found {shape}"
        )));
    };

    let mut map = OrderedMap::with_capacity(fields.len());
    for field in fields {
        let value = field.value().reflect();
        let shape = value.shape();
        if !shape.is_supported() {
            tracing::trace!(field = field.name(), %shape, "skipping field of unsupported shape");
            continue;
        }
        if public_only && !field.is_exported() {
            tracing::trace!(field = field.name(), "skipping non-public field");
            continue;
        }

        let key = field.key();
        let converted = convert_value(value, public_only)?;
        if map.insert(key, converted).is_some() {
            tracing::debug!(key, field = field.name(), "field replaced an earlier entry");
        }
    }

    Ok(map)
}

fn convert_map(value: Reflect<'_>, public_only: bool) -> Result<OrderedMap> {
    let shape = value.shape();
    let Reflect::Map(mut entries) = value else {
        return Err(ConvertError::invariant(format!(
            "argument must be map, found {shape}"
        )));
    };

    // Collections iterate in arbitrary order; sort so output is deterministic.
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    // Distinct keys sharing one string form have no stable order.
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(ConvertError::invariant(format!(
            "map has more than one entry with key {:?}",
            pair[0].0
        )));
    }

    let mut map = OrderedMap::with_capacity(entries.len());
    for (key, value) in entries {
        map.insert(key, convert_value(value.reflect(), public_only)?);
    }

    Ok(map)
}

fn convert_sequence(value: Reflect<'_>, public_only: bool) -> Result<Vec<OrderedValue>> {
    match value {
        Reflect::Array(items) | Reflect::Slice(items) => items
            .into_iter()
            .map(|item| convert_value(item.reflect(), public_only))
            .collect(),
        other => Err(ConvertError::invariant(format!(
            "argument must be array or slice, found {}",
            other.shape()
        ))),
    }
}

fn convert_value(value: Reflect<'_>, public_only: bool) -> Result<OrderedValue> {
    let converted = match value {
        Reflect::Bool(value) => OrderedValue::Bool(value),
        Reflect::Int(value) => OrderedValue::Int(value),
        Reflect::Uint(value) => OrderedValue::Uint(value),
        Reflect::Float(value) => OrderedValue::Float(value),
        Reflect::String(value) => OrderedValue::String(value.to_owned()),
        Reflect::Pointer(referent) | Reflect::Interface(referent) => match referent {
            Some(referent) => convert_value(*referent, public_only)?,
            None => OrderedValue::Null,
        },
        sequence @ (Reflect::Array(_) | Reflect::Slice(_)) => {
            OrderedValue::List(convert_sequence(sequence, public_only)?)
        }
        map @ Reflect::Map(_) => OrderedValue::Map(convert_map(map, public_only)?),
        record @ Reflect::Struct(_) => OrderedValue::Map(convert_record(record, public_only)?),
        Reflect::Opaque(shape) => {
            return Err(ConvertError::invariant(format!("unsupported type: {shape}")));
        }
    };

    Ok(converted)
}
