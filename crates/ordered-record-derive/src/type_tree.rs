//! Field type analysis.
//!
//! Function-typed fields cannot implement `ToOrdered` generically (higher-ranked `fn`
//! pointers and `dyn Fn` objects have no blanket impl), so the derive recognizes them
//! syntactically and reflects them as opaque.

use syn::{GenericArgument, PathArguments, Type, TypeParamBound};

/// Smart pointers and optionals looked through when searching for a function type.
const WRAPPERS: &[&str] = &["Option", "Box", "Rc", "Arc"];

/// Closure traits that mark a trait object as a function.
const FN_TRAITS: &[&str] = &["Fn", "FnMut", "FnOnce"];

/// The value category of a field type, as far as the converter cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Anything expected to implement `ToOrdered`.
    Value,
    /// `fn(..)` pointers and `dyn Fn*` objects, possibly behind a reference, `Option`,
    /// `Box`, `Rc` or `Arc`.
    Function,
}

impl ValueType {
    /// Classify a field type.
    pub fn of(ty: &Type) -> Self {
        match ty {
            Type::BareFn(_) => ValueType::Function,
            Type::Paren(paren) => Self::of(&paren.elem),
            Type::Group(group) => Self::of(&group.elem),
            Type::Reference(reference) => Self::of(&reference.elem),
            Type::TraitObject(object) if Self::has_fn_bound(object.bounds.iter()) => {
                ValueType::Function
            }
            Type::Path(type_path) => {
                let Some(last) = type_path.path.segments.last() else {
                    return ValueType::Value;
                };
                if !WRAPPERS.iter().any(|wrapper| last.ident == wrapper) {
                    return ValueType::Value;
                }
                let PathArguments::AngleBracketed(args) = &last.arguments else {
                    return ValueType::Value;
                };
                match args.args.first() {
                    Some(GenericArgument::Type(inner)) => Self::of(inner),
                    _ => ValueType::Value,
                }
            }
            _ => ValueType::Value,
        }
    }

    fn has_fn_bound<'a>(mut bounds: impl Iterator<Item = &'a TypeParamBound>) -> bool {
        bounds.any(|bound| match bound {
            TypeParamBound::Trait(bound) => bound
                .path
                .segments
                .last()
                .is_some_and(|segment| FN_TRAITS.iter().any(|name| segment.ident == name)),
            _ => false,
        })
    }
}
