//! Shape categories of reflected values.

use std::fmt;

/// The structural category of a value, analogous to a dynamic type tag.
///
/// Every [`Reflect`](crate::Reflect) variant maps to exactly one shape. The converter only
/// descends into supported shapes; opaque shapes (channels, functions, complex numbers and raw
/// pointers) are dropped when they appear as record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `bool`
    Bool,
    /// Signed integers of any width.
    Int,
    /// Unsigned integers of any width.
    Uint,
    /// Floating point numbers of any width.
    Float,
    /// String slices and owned strings.
    String,
    /// Nullable references: `Option`, `Box`, `Rc`, `Arc` and borrowed references.
    Pointer,
    /// Dynamically typed wrappers such as `serde_json::Value`.
    Interface,
    /// Fixed-size sequences (`[T; N]`).
    Array,
    /// Growable sequences (`Vec`, `VecDeque`, `[T]`).
    Slice,
    /// Keyed collections with string keys.
    Map,
    /// Records with named fields.
    Struct,
    /// Channel endpoints.
    Chan,
    /// Function pointers and closures.
    Func,
    /// Complex numbers.
    Complex,
    /// Raw pointers.
    RawPointer,
}

impl Shape {
    /// Returns `true` when the converter knows how to represent values of this shape.
    pub const fn is_supported(self) -> bool {
        match self {
            Self::Bool
            | Self::Int
            | Self::Uint
            | Self::Float
            | Self::String
            | Self::Pointer
            | Self::Interface
            | Self::Array
            | Self::Slice
            | Self::Map
            | Self::Struct => true,
            Self::Chan | Self::Func | Self::Complex | Self::RawPointer => false,
        }
    }

    /// Short kind name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Pointer => "ptr",
            Self::Interface => "interface",
            Self::Array => "array",
            Self::Slice => "slice",
            Self::Map => "map",
            Self::Struct => "struct",
            Self::Chan => "chan",
            Self::Func => "func",
            Self::Complex => "complex",
            Self::RawPointer => "unsafe.Pointer",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
