//! Code generation for the ToOrdered derive macro.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr, Token, Visibility,
    WherePredicate, ext::IdentExt, punctuated::Punctuated, spanned::Spanned,
};

use crate::{diagnostics::Diagnostics, type_tree::ValueType};

mod serde;

use serde::RenameRule;

/// Container attributes from `#[ordered(...)]`.
#[derive(Default)]
struct ContainerAttributes {
    rename_all: Option<RenameRule>,
    bound: Option<Punctuated<WherePredicate, Token![,]>>,
}

impl ContainerAttributes {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("ordered") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let lit: LitStr = meta.value()?.parse()?;
                    result.rename_all = Some(RenameRule::from_lit(&lit)?);
                } else if meta.path.is_ident("bound") {
                    let lit: LitStr = meta.value()?.parse()?;
                    result.bound = Some(lit.parse_with(Punctuated::parse_terminated)?);
                } else {
                    return Err(Diagnostics::with_span(
                        meta.path.span(),
                        "unknown ordered container attribute",
                    )
                    .help("Supported container attributes are `rename_all = \"...\"` and `bound = \"...\"`")
                    .into());
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

/// Field attributes from `#[ordered(...)]`.
#[derive(Default)]
struct FieldAttributes {
    rename: Option<String>,
    skip: bool,
}

impl FieldAttributes {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("ordered") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    result.rename = Some(lit.value());
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    return Err(Diagnostics::with_span(
                        meta.path.span(),
                        "unknown ordered field attribute",
                    )
                    .help("Supported field attributes are `rename = \"...\"` and `skip`")
                    .into());
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

/// A field as it will appear in the generated `Reflect::Struct`.
struct RecordField {
    member: Ident,
    name: String,
    rename: Option<String>,
    exported: bool,
    value_type: ValueType,
}

/// Generator for the ToOrdered derive macro.
pub struct Record {
    ident: Ident,
    generics: Generics,
    bound: Option<Punctuated<WherePredicate, Token![,]>>,
    fields: Vec<RecordField>,
}

impl Record {
    pub fn new(input: DeriveInput) -> Result<Self, Diagnostics> {
        let named = match input.data {
            Data::Struct(data) => match data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(fields) => {
                    return Err(Diagnostics::with_span(
                        fields.span(),
                        "ToOrdered cannot be derived for tuple structs",
                    )
                    .help("Name the fields: `struct Point { x: i32, y: i32 }`")
                    .note("Records are converted into maps keyed by field name"));
                }
                Fields::Unit => {
                    return Err(Diagnostics::with_span(
                        input.ident.span(),
                        "ToOrdered cannot be derived for unit structs",
                    )
                    .help("Use a struct with named fields, or `struct Empty {}` for an empty map")
                    .note("Records are converted into maps keyed by field name"));
                }
            },
            Data::Enum(data) => {
                return Err(Diagnostics::with_span(
                    data.enum_token.span(),
                    "ToOrdered cannot be derived for enums",
                )
                .help("ToOrdered can only be derived for structs with named fields")
                .note("Implement `ToOrdered` by hand to choose how each variant is reflected"));
            }
            Data::Union(data) => {
                return Err(Diagnostics::with_span(
                    data.union_token.span(),
                    "ToOrdered cannot be derived for unions",
                )
                .help("ToOrdered can only be derived for structs with named fields"));
            }
        };

        let container = ContainerAttributes::parse(&input.attrs)?;
        let serde_container = serde::parse_container(&input.attrs)?;
        let rename_all = container.rename_all.or(serde_container.rename_all);

        let mut fields = Vec::with_capacity(named.named.len());
        for field in named.named {
            let attributes = FieldAttributes::parse(&field.attrs)?;
            if attributes.skip {
                continue;
            }
            let serde_value = serde::parse_value(&field.attrs)?;

            let Some(member) = field.ident else {
                return Err(Diagnostics::with_span(field.ty.span(), "expected a named field"));
            };
            let name = member.unraw().to_string();
            let rename = attributes
                .rename
                .or(serde_value.rename)
                .or_else(|| rename_all.map(|rule| rule.apply_to_field(&name)));

            fields.push(RecordField {
                member,
                name,
                rename,
                exported: matches!(field.vis, Visibility::Public(_)),
                value_type: ValueType::of(&field.ty),
            });
        }

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            bound: container.bound,
            fields,
        })
    }
}

impl ToTokens for RecordField {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        let value = match self.value_type {
            ValueType::Value => {
                let member = &self.member;
                quote! { &self.#member }
            }
            ValueType::Function => quote! { &::ordered_record::Opaque::FUNC },
        };
        let rename = self.rename.as_ref().map(|key| quote! { .rename(#key) });
        let exported = self.exported;

        tokens.extend(quote! {
            ::ordered_record::Field::new(#name, #value) #rename .exported(#exported)
        });
    }
}

impl ToTokens for Record {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut where_clause = where_clause.map_or_else(|| syn::parse_quote!(where), |w| w.clone());

        // A custom bound replaces the default `ToOrdered` bound on every type parameter
        if let Some(bound) = &self.bound {
            where_clause.predicates.extend(bound.iter().cloned());
        } else {
            for param in self.generics.type_params() {
                let param_ident = &param.ident;
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#param_ident: ::ordered_record::ToOrdered));
            }
        }

        let fields = &self.fields;

        tokens.extend(quote! {
            #[automatically_derived]
            impl #impl_generics ::ordered_record::ToOrdered for #ident #ty_generics #where_clause {
                fn reflect(&self) -> ::ordered_record::Reflect<'_> {
                    ::ordered_record::Reflect::Struct(::std::vec![#(#fields),*])
                }
            }
        });
    }
}
