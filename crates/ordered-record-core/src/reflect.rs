//! Structural introspection of values.
//!
//! [`ToOrdered`] exposes one level of a value's structure as a [`Reflect`] view. The converter
//! walks these views recursively; implementations never convert anything themselves.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap, VecDeque},
    fmt,
    hash::BuildHasher,
    rc::Rc,
    sync::{
        Arc,
        mpsc::{Receiver, Sender, SyncSender},
    },
};

use indexmap::IndexMap;

use crate::Shape;

/// Trait for values that can be walked by the converter.
///
/// This trait is typically implemented via the `#[derive(ToOrdered)]` macro for records and
/// there is usually no need to implement it manually. Implementations for the standard
/// scalars, strings, references, sequences and string-keyed maps are provided.
///
/// # Examples
///
/// ```ignore
/// #[derive(ToOrdered)]
/// struct User {
///     pub id: u64,
///     pub name: String,
/// }
/// ```
pub trait ToOrdered {
    /// Describe the top level of this value.
    fn reflect(&self) -> Reflect<'_>;
}

/// One level of a value's structure.
///
/// Scalars are already widened to the largest representation of their category. Containers
/// borrow their children as `&dyn ToOrdered` so they are only reflected when the walk reaches
/// them.
#[derive(Debug)]
pub enum Reflect<'a> {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(&'a str),
    /// A reference that may be null (`None`).
    Pointer(Option<Box<Reflect<'a>>>),
    /// A dynamically typed wrapper that may be empty (`None`).
    Interface(Option<Box<Reflect<'a>>>),
    /// A fixed-size sequence.
    Array(Vec<&'a dyn ToOrdered>),
    /// A growable sequence.
    Slice(Vec<&'a dyn ToOrdered>),
    /// A keyed collection, entries in the collection's own iteration order.
    Map(Vec<(&'a str, &'a dyn ToOrdered)>),
    /// A record, fields in declaration order.
    Struct(Vec<Field<'a>>),
    /// A value the converter cannot represent.
    Opaque(Shape),
}

impl Reflect<'_> {
    /// The shape category of this view.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Bool(_) => Shape::Bool,
            Self::Int(_) => Shape::Int,
            Self::Uint(_) => Shape::Uint,
            Self::Float(_) => Shape::Float,
            Self::String(_) => Shape::String,
            Self::Pointer(_) => Shape::Pointer,
            Self::Interface(_) => Shape::Interface,
            Self::Array(_) => Shape::Array,
            Self::Slice(_) => Shape::Slice,
            Self::Map(_) => Shape::Map,
            Self::Struct(_) => Shape::Struct,
            Self::Opaque(shape) => *shape,
        }
    }
}

impl fmt::Debug for dyn ToOrdered + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ToOrdered")
            .field(&self.reflect().shape())
            .finish()
    }
}

/// A record field as seen by the converter.
///
/// Built by the derive macro; hand-written [`ToOrdered`] impls for records use the same
/// builder:
///
/// ```ignore
/// Field::new("display_name", &self.display_name)
///     .rename("displayName")
///     .exported(true)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    rename: Option<&'static str>,
    exported: bool,
    value: &'a dyn ToOrdered,
}

impl<'a> Field<'a> {
    /// A private field without a rename.
    pub fn new(name: &'static str, value: &'a dyn ToOrdered) -> Self {
        Self {
            name,
            rename: None,
            exported: false,
            value,
        }
    }

    /// Override the emitted key.
    pub fn rename(mut self, key: &'static str) -> Self {
        self.rename = Some(key);
        self
    }

    /// Mark the field as part of the record's public API.
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// The declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The emitted key: the rename when present and non-empty, the declared name otherwise.
    pub fn key(&self) -> &'static str {
        match self.rename {
            Some(key) if !key.is_empty() => key,
            _ => self.name,
        }
    }

    /// Whether the field is declared `pub`.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// The field's value.
    pub fn value(&self) -> &'a dyn ToOrdered {
        self.value
    }
}

/// Stand-in for values of an opaque shape.
///
/// The derive macro reflects function-typed fields through [`Opaque::FUNC`] so their types do
/// not need a [`ToOrdered`] impl; the converter then drops them like any other unsupported
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opaque(Shape);

impl Opaque {
    /// A channel endpoint.
    pub const CHAN: Opaque = Opaque(Shape::Chan);
    /// A function pointer or closure.
    pub const FUNC: Opaque = Opaque(Shape::Func);
    /// A complex number.
    pub const COMPLEX: Opaque = Opaque(Shape::Complex);
    /// A raw pointer.
    pub const RAW_POINTER: Opaque = Opaque(Shape::RawPointer);

    /// The opaque shape this stands for.
    pub const fn shape(&self) -> Shape {
        self.0
    }
}

impl ToOrdered for Opaque {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(self.0)
    }
}

impl ToOrdered for bool {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Bool(*self)
    }
}

macro_rules! impl_int {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl ToOrdered for $ty {
                fn reflect(&self) -> Reflect<'_> {
                    Reflect::$variant(*self as $wide)
                }
            }
        )+
    };
}

impl_int!(Int as i64: i8, i16, i32, i64, isize);
impl_int!(Uint as u64: u8, u16, u32, u64, usize);

impl ToOrdered for f32 {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Float(f64::from(*self))
    }
}

impl ToOrdered for f64 {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Float(*self)
    }
}

impl ToOrdered for str {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::String(self)
    }
}

impl ToOrdered for String {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::String(self.as_str())
    }
}

impl ToOrdered for Cow<'_, str> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::String(self.as_ref())
    }
}

impl<T: ToOrdered> ToOrdered for Option<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Pointer(self.as_ref().map(|value| Box::new(value.reflect())))
    }
}

macro_rules! impl_pointer {
    ($($ptr:ty),+) => {
        $(
            impl<T: ToOrdered + ?Sized> ToOrdered for $ptr {
                fn reflect(&self) -> Reflect<'_> {
                    Reflect::Pointer(Some(Box::new((**self).reflect())))
                }
            }
        )+
    };
}

impl_pointer!(Box<T>, Rc<T>, Arc<T>, &T, &mut T);

fn elements<'a, T, I>(items: I) -> Vec<&'a dyn ToOrdered>
where
    T: ToOrdered + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| item as &dyn ToOrdered)
        .collect()
}

impl<T: ToOrdered, const N: usize> ToOrdered for [T; N] {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Array(elements(self))
    }
}

impl<T: ToOrdered> ToOrdered for [T] {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Slice(elements(self))
    }
}

impl<T: ToOrdered> ToOrdered for Vec<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Slice(elements(self))
    }
}

impl<T: ToOrdered> ToOrdered for VecDeque<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Slice(elements(self))
    }
}

fn entries<'a, K, V, I>(items: I) -> Vec<(&'a str, &'a dyn ToOrdered)>
where
    K: AsRef<str> + 'a,
    V: ToOrdered + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    items
        .into_iter()
        .map(|(key, value)| (key.as_ref(), value as &dyn ToOrdered))
        .collect()
}

impl<K: AsRef<str>, V: ToOrdered, S: BuildHasher> ToOrdered for HashMap<K, V, S> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Map(entries(self))
    }
}

impl<K: AsRef<str>, V: ToOrdered> ToOrdered for BTreeMap<K, V> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Map(entries(self))
    }
}

impl<K: AsRef<str>, V: ToOrdered, S: BuildHasher> ToOrdered for IndexMap<K, V, S> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Map(entries(self))
    }
}

impl ToOrdered for serde_json::Map<String, serde_json::Value> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Map(entries(self))
    }
}

/// A JSON value is a dynamic wrapper around whatever it currently holds.
impl ToOrdered for serde_json::Value {
    fn reflect(&self) -> Reflect<'_> {
        use serde_json::Value;

        let held = match self {
            Value::Null => return Reflect::Interface(None),
            Value::Bool(value) => Reflect::Bool(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Reflect::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Reflect::Uint(value)
                } else {
                    Reflect::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(value) => Reflect::String(value),
            Value::Array(items) => Reflect::Slice(elements(items)),
            Value::Object(map) => Reflect::Map(entries(map)),
        };
        Reflect::Interface(Some(Box::new(held)))
    }
}

impl<T> ToOrdered for Sender<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(Shape::Chan)
    }
}

impl<T> ToOrdered for SyncSender<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(Shape::Chan)
    }
}

impl<T> ToOrdered for Receiver<T> {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(Shape::Chan)
    }
}

impl<T: ?Sized> ToOrdered for *const T {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(Shape::RawPointer)
    }
}

impl<T: ?Sized> ToOrdered for *mut T {
    fn reflect(&self) -> Reflect<'_> {
        Reflect::Opaque(Shape::RawPointer)
    }
}
