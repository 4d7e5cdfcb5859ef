//! Proc macros for the next-params crate.
//!
//! This crate provides the `#[derive(ParamTable)]` macro

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, Fields, Lit, Type, parse_macro_input, spanned::Spanned,
};

/// Container options parsed from `#[params(...)]`.
#[derive(Default)]
struct TableOptions {
    prefix: String,
}

impl TableOptions {
    fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();

        for attr in attrs {
            if attr.path().is_ident("params") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("prefix") {
                        options.prefix = lit_str(&meta.value()?.parse()?, "prefix")?;
                    } else {
                        return Err(syn::Error::new(
                            meta.path.span(),
                            format!("unknown params attribute: {:?}", meta.path.get_ident()),
                        ));
                    }
                    Ok(())
                })?;
            }
        }

        Ok(options)
    }
}

/// Field options parsed from `#[param(...)]`.
struct FieldOptions {
    id: u32,
    name: Option<String>,
    range: String,
    dimension: String,
    description: String,
}

impl FieldOptions {
    fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let mut id = None;
        let mut name = None;
        let mut range = String::new();
        let mut dimension = String::new();
        let mut description = String::new();

        for attr in &field.attrs {
            if attr.path().is_ident("param") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("id") {
                        let value: Expr = meta.value()?.parse()?;
                        if let Expr::Lit(expr_lit) = value {
                            if let Lit::Int(lit_int) = expr_lit.lit {
                                id = Some(lit_int.base10_parse::<u32>()?);
                            } else {
                                return Err(syn::Error::new(
                                    expr_lit.span(),
                                    "id must be an integer",
                                ));
                            }
                        } else {
                            return Err(syn::Error::new(value.span(), "id must be a literal"));
                        }
                    } else if meta.path.is_ident("name") {
                        name = Some(lit_str(&meta.value()?.parse()?, "name")?);
                    } else if meta.path.is_ident("range") {
                        range = lit_str(&meta.value()?.parse()?, "range")?;
                    } else if meta.path.is_ident("dimension") {
                        dimension = lit_str(&meta.value()?.parse()?, "dimension")?;
                    } else if meta.path.is_ident("description") {
                        description = lit_str(&meta.value()?.parse()?, "description")?;
                    } else {
                        return Err(syn::Error::new(
                            meta.path.span(),
                            format!("unknown param attribute: {:?}", meta.path.get_ident()),
                        ));
                    }
                    Ok(())
                })?;
            }
        }

        let id = id.ok_or_else(|| {
            syn::Error::new(
                field.span(),
                "missing required attribute: #[param(id = ...)]",
            )
        })?;

        Ok(Self {
            id,
            name,
            range,
            dimension,
            description,
        })
    }
}

fn lit_str(value: &Expr, key: &str) -> syn::Result<String> {
    match value {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str.value()),
        _ => Err(syn::Error::new(
            value.span(),
            format!("{key} must be a string literal"),
        )),
    }
}

/// Maps a primitive field type to its `ParamType` variant.
fn param_type(ty: &Type) -> syn::Result<proc_macro2::Ident> {
    let ident = match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last().map(|s| &s.ident),
        _ => None,
    };

    let variant = match ident.map(|i| i.to_string()).as_deref() {
        Some("i8") => "Int8",
        Some("i16") => "Int16",
        Some("i32") => "Int32",
        Some("i64") => "Int64",
        Some("u8") => "Uint8",
        Some("u16") => "Uint16",
        Some("u32") => "Uint32",
        Some("u64") => "Uint64",
        Some("f32") => "Float",
        Some("f64") => "Double",
        Some("String") => "String",
        Some("bool") => "Bool",
        _ => {
            return Err(syn::Error::new(
                ty.span(),
                "unsupported parameter type: expected an integer, f32, f64, bool or String",
            ));
        }
    };

    Ok(proc_macro2::Ident::new(variant, ty.span()))
}

/// Derive macro for the `ParamTable` trait.
///
/// Every named field becomes one parameter. Its type tag is inferred from
/// the field type, its value comes from `self` and its default from the
/// struct's `Default` impl, which is therefore required.
///
/// # Example
///
/// ```rust,ignore
/// use next_params::ParamTable;
///
/// #[derive(Debug, Default, ParamTable)]
/// #[params(prefix = "nav_")]
/// struct NavParams {
///     #[param(id = 1, range = "0..50", dimension = "m")]
///     waypoint_radius: f32,
///     #[param(id = 2, name = "nav_loiter", description = "Loiter at the end")]
///     loiter_at_end: bool,
/// }
/// ```
///
/// This expands to roughly:
///
/// ```rust,ignore
/// impl next_params::ParamTable for NavParams {
///     fn params(&self) -> Vec<next_params::Parameter> {
///         let defaults = Self::default();
///         vec![
///             next_params::Parameter {
///                 id: 1,
///                 name: "nav_waypoint_radius".into(),
///                 value: self.waypoint_radius.to_string(),
///                 default_value: defaults.waypoint_radius.to_string(),
///                 range: "0..50".into(),
///                 ty: next_params::ParamType::Float,
///                 dimension: "m".into(),
///                 description: "".into(),
///             },
///             // ...
///         ]
///     }
///
///     fn apply(&mut self, registry: &next_params::ParamRegistry) -> next_params::Result<()> {
///         self.waypoint_radius = registry.get_as("nav_waypoint_radius")?;
///         self.loiter_at_end = registry.get_as("nav_loiter")?;
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_derive(ParamTable, attributes(params, param))]
pub fn derive_param_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_param_table_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_param_table_impl(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let options = TableOptions::from_attrs(&input.attrs)?;
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "ParamTable requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "ParamTable can only be derived for structs",
            ));
        }
    };

    let mut records = Vec::new();
    let mut assignments = Vec::new();

    for field in fields {
        let field_options = FieldOptions::from_field(field)?;
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
        let variant = param_type(&field.ty)?;
        let param_name = field_options
            .name
            .unwrap_or_else(|| format!("{}{}", options.prefix, ident));

        let id = field_options.id;
        let range = &field_options.range;
        let dimension = &field_options.dimension;
        let description = &field_options.description;

        records.push(quote! {
            ::next_params::Parameter {
                id: #id,
                name: ::std::string::String::from(#param_name),
                value: ::std::string::ToString::to_string(&self.#ident),
                default_value: ::std::string::ToString::to_string(&defaults.#ident),
                range: ::std::string::String::from(#range),
                ty: ::next_params::ParamType::#variant,
                dimension: ::std::string::String::from(#dimension),
                description: ::std::string::String::from(#description),
            }
        });
        assignments.push(quote! {
            self.#ident = registry.get_as(#param_name)?;
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::next_params::ParamTable for #name #ty_generics #where_clause {
            fn params(&self) -> ::std::vec::Vec<::next_params::Parameter> {
                let defaults = <Self as ::core::default::Default>::default();
                ::std::vec![#(#records),*]
            }

            fn apply(
                &mut self,
                registry: &::next_params::ParamRegistry,
            ) -> ::next_params::Result<()> {
                #(#assignments)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
